// Formatting helpers and browser timer plumbing shared by the components.
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::EventTarget;

/// "8:00 AM" style label for a whole hour.
pub fn format_hour_label(hour: u8) -> String {
    let hour = hour.min(23);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", h12, suffix)
}

pub fn format_clock(at: &NaiveDateTime) -> String {
    at.format("%I:%M %p").to_string()
}

pub fn format_date(at: &NaiveDateTime) -> String {
    at.format("%A, %B %-d").to_string()
}

/// Value for an `<input type="time">`.
pub fn time_input_value(hour: u8) -> String {
    format!("{:02}:00", hour.min(23))
}

/// Hour part of an `<input type="time">` value ("HH:MM").
pub fn parse_time_input(raw: &str) -> Option<u8> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .ok()
        .map(|t| t.hour() as u8)
}

/// Fractional hour, for the chart's "now" marker.
pub fn fractional_hour(at: &NaiveDateTime) -> f64 {
    at.hour() as f64 + at.minute() as f64 / 60.0
}

/// One-shot `setTimeout`. Returns the handle, or `None` outside a browser.
pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
    let window = web_sys::window()?;
    let cb = Closure::once_into_js(f);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms as i32)
        .ok()
}

pub fn clear_timeout(handle: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(handle);
    }
}

/// Repeating `setInterval`; cleared when dropped.
pub struct Interval {
    id: i32,
    _cb: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(ms: u32, f: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                ms as i32,
            )
            .ok()?;
        Some(Self { id, _cb: cb })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

/// DOM listener removed from its target on drop.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    cb: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new<E: JsCast + 'static>(
        target: &EventTarget,
        event: &'static str,
        mut f: impl FnMut(E) + 'static,
    ) -> Self {
        let cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                f(e);
            }
        }) as Box<dyn FnMut(_)>);
        target
            .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            .ok();
        Self {
            target: target.clone(),
            event,
            cb,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.cb.as_ref().unchecked_ref());
    }
}
