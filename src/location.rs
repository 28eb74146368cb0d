// navigator.geolocation plumbing: one-shot fixes and a position watch.
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Geolocation, Position, PositionError, PositionOptions};

use crate::error::LocationError;
use crate::model::LocationFix;

fn geolocation() -> Result<Geolocation, LocationError> {
    web_sys::window()
        .ok_or(LocationError::Unsupported)?
        .navigator()
        .geolocation()
        .map_err(|_| LocationError::Unsupported)
}

fn to_fix(pos: &Position) -> LocationFix {
    let c = pos.coords();
    LocationFix {
        latitude: c.latitude(),
        longitude: c.longitude(),
        accuracy_m: c.accuracy(),
    }
}

fn to_error(err: &PositionError) -> LocationError {
    LocationError::from_code(err.code())
}

/// Single high-accuracy fix. Exactly one of the callbacks fires.
pub fn request_fix(
    timeout_ms: u32,
    on_fix: impl FnOnce(LocationFix) + 'static,
    on_error: impl FnOnce(LocationError) + 'static,
) -> Result<(), LocationError> {
    let geo = geolocation()?;
    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(timeout_ms);
    options.set_maximum_age(0);
    let ok = Closure::once_into_js(move |pos: Position| on_fix(to_fix(&pos)));
    let err = Closure::once_into_js(move |e: PositionError| on_error(to_error(&e)));
    geo.get_current_position_with_error_callback_and_options(
        ok.unchecked_ref(),
        Some(err.unchecked_ref()),
        &options,
    )
    .map_err(|_| LocationError::Unavailable)
}

/// Live position watch; cleared on drop.
pub struct LocationWatch {
    id: i32,
    geo: Geolocation,
    _on_fix: Closure<dyn FnMut(Position)>,
    _on_error: Closure<dyn FnMut(PositionError)>,
}

impl LocationWatch {
    pub fn start(
        max_age_ms: u32,
        mut on_fix: impl FnMut(LocationFix) + 'static,
        mut on_error: impl FnMut(LocationError) + 'static,
    ) -> Result<Self, LocationError> {
        let geo = geolocation()?;
        let options = PositionOptions::new();
        options.set_enable_high_accuracy(true);
        options.set_maximum_age(max_age_ms);
        let fix_cb = Closure::wrap(Box::new(move |pos: Position| {
            on_fix(to_fix(&pos))
        }) as Box<dyn FnMut(_)>);
        let err_cb = Closure::wrap(Box::new(move |e: PositionError| {
            on_error(to_error(&e))
        }) as Box<dyn FnMut(_)>);
        let id = geo
            .watch_position_with_error_callback_and_options(
                fix_cb.as_ref().unchecked_ref(),
                Some(err_cb.as_ref().unchecked_ref()),
                &options,
            )
            .map_err(|_| LocationError::Unavailable)?;
        Ok(Self {
            id,
            geo,
            _on_fix: fix_cb,
            _on_error: err_cb,
        })
    }
}

impl Drop for LocationWatch {
    fn drop(&mut self) {
        self.geo.clear_watch(self.id);
    }
}
