use super::map_controls::MapControls;
use crate::error::DashboardError;
use crate::render::{FrameInput, MapRenderer, MapScene};
use crate::state::clock::FrameTick;
use crate::state::{FrameTicker, GestureController, GestureEffect, Point, SystemClock, Viewport};
use crate::util::Listener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent,
};
use yew::prelude::*;

const MAP_HEIGHT_PX: f64 = 400.0;

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub has_fix: bool,
    pub frame_interval_ms: u32,
    pub on_notice: Callback<String>,
}

/// Touch positions relative to the canvas, in list order.
fn touch_points(canvas: &HtmlCanvasElement, e: &TouchEvent) -> Vec<Point> {
    let rect = canvas.get_bounding_client_rect();
    let list = e.touches();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| {
            Point::new(
                t.client_x() as f64 - rect.left(),
                t.client_y() as f64 - rect.top(),
            )
        })
        .collect()
}

/// Mouse position relative to the canvas, valid for window-level events too.
fn mouse_point(canvas: &HtmlCanvasElement, e: &MouseEvent) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
    )
}

fn fit_canvas(canvas: &HtmlCanvasElement) {
    let width = match canvas.client_width() {
        w if w > 0 => w as u32,
        _ => 800,
    };
    canvas.set_width(width);
    canvas.set_height(MAP_HEIGHT_PX as u32);
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let viewport = use_mut_ref(Viewport::default);
    let gesture = use_mut_ref(GestureController::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let has_fix_flag = use_mut_ref(|| false);
    let notice_ref = use_mut_ref(|| props.on_notice.clone());
    let zoom_percent = use_state(|| 100u32);

    // Latest props for the long-lived closures, then repaint
    {
        let has_fix_flag = has_fix_flag.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(props.has_fix, move |has_fix| {
            *has_fix_flag.borrow_mut() = *has_fix;
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }
    {
        let notice_ref = notice_ref.clone();
        use_effect_with(props.on_notice.clone(), move |cb| {
            *notice_ref.borrow_mut() = cb.clone();
            || ()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let viewport = viewport.clone();
        let gesture = gesture.clone();
        let draw_ref = draw_ref.clone();
        let has_fix_flag = has_fix_flag.clone();
        let notice_ref = notice_ref.clone();
        let zoom_percent = zoom_percent.clone();
        let frame_interval_ms = props.frame_interval_ms;
        use_effect_with((), move |_| {
            let mut listeners: Vec<Listener> = Vec::new();
            let raf_id: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
            let loop_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));

            let window = web_sys::window();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let ctx = canvas
                .as_ref()
                .and_then(|c| c.get_context("2d").ok().flatten())
                .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());

            match (window, canvas, ctx) {
                (Some(window), Some(canvas), Some(ctx)) => {
                    fit_canvas(&canvas);
                    let renderer = RefCell::new(MapRenderer::new(MapScene::new(
                        canvas.width() as f64,
                        canvas.height() as f64,
                    )));
                    tracing::info!(
                        width = canvas.width(),
                        height = canvas.height(),
                        "map surface ready"
                    );

                    let paint: Rc<dyn Fn(&FrameTick)> = {
                        let canvas = canvas.clone();
                        let viewport = viewport.clone();
                        let has_fix_flag = has_fix_flag.clone();
                        Rc::new(move |tick: &FrameTick| {
                            if !canvas.is_connected() {
                                return;
                            }
                            let mut ctx = ctx.clone();
                            let frame = FrameInput {
                                surface_width: canvas.width() as f64,
                                surface_height: canvas.height() as f64,
                                time_secs: tick.time_secs,
                                hour: tick.hour,
                                has_fix: *has_fix_flag.borrow(),
                            };
                            let mut renderer = renderer.borrow_mut();
                            renderer.fit(frame.surface_width, frame.surface_height);
                            renderer.paint(&mut ctx, &viewport.borrow(), &frame);
                        })
                    };
                    // Immediate repaint after a transform change
                    let draw: Rc<dyn Fn()> = {
                        let paint = paint.clone();
                        Rc::new(move || paint(&FrameTick::at(&SystemClock, 0)))
                    };
                    *draw_ref.borrow_mut() = Some(draw.clone());
                    draw();

                    // RAF loop, rate-limited by the ticker
                    {
                        let raf_loop = raf_id.clone();
                        let window_loop = window.clone();
                        let cell = loop_cell.clone();
                        let mut ticker = FrameTicker::new(frame_interval_ms);
                        *loop_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                            if let Some(tick) = ticker.poll(&SystemClock) {
                                paint(&tick);
                            }
                            if let Some(cb) = cell.borrow().as_ref() {
                                if let Ok(id) =
                                    window_loop.request_animation_frame(cb.as_ref().unchecked_ref())
                                {
                                    *raf_loop.borrow_mut() = Some(id);
                                }
                            }
                        }) as Box<dyn FnMut()>));
                        if let Some(cb) = loop_cell.borrow().as_ref() {
                            if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                                *raf_id.borrow_mut() = Some(id);
                            }
                        }
                    }

                    let after = {
                        let draw = draw.clone();
                        let notice_ref = notice_ref.clone();
                        let zoom_percent = zoom_percent.clone();
                        move |effect: GestureEffect| {
                            if let GestureEffect::Zoomed { percent } = effect {
                                zoom_percent.set(percent);
                                notice_ref.borrow().emit(format!("Zoom: {}%", percent));
                            }
                            if effect.changed() {
                                draw();
                            }
                        }
                    };

                    let target: &EventTarget = canvas.as_ref();
                    {
                        let gesture = gesture.clone();
                        let canvas_md = canvas.clone();
                        listeners.push(Listener::new(target, "mousedown", move |e: MouseEvent| {
                            gesture.borrow_mut().pointer_down(mouse_point(&canvas_md, &e));
                        }));
                    }
                    // Move and release on the window so a drag survives leaving the canvas
                    {
                        let gesture = gesture.clone();
                        let viewport = viewport.clone();
                        let canvas_mm = canvas.clone();
                        let after = after.clone();
                        listeners.push(Listener::new(window.as_ref(), "mousemove", move |e: MouseEvent| {
                            let effect = gesture
                                .borrow_mut()
                                .pointer_move(mouse_point(&canvas_mm, &e), &mut viewport.borrow_mut());
                            after(effect);
                        }));
                    }
                    {
                        let gesture = gesture.clone();
                        listeners.push(Listener::new(window.as_ref(), "mouseup", move |_e: MouseEvent| {
                            gesture.borrow_mut().pointer_up();
                        }));
                    }
                    {
                        let gesture = gesture.clone();
                        let viewport = viewport.clone();
                        let after = after.clone();
                        listeners.push(Listener::new(target, "wheel", move |e: WheelEvent| {
                            let effect = gesture.borrow_mut().wheel(
                                e.delta_y(),
                                e.ctrl_key(),
                                &mut viewport.borrow_mut(),
                            );
                            if let Some(effect) = effect {
                                e.prevent_default();
                                after(effect);
                            }
                        }));
                    }
                    {
                        let gesture = gesture.clone();
                        let canvas_tc = canvas.clone();
                        listeners.push(Listener::new(target, "touchstart", move |e: TouchEvent| {
                            e.prevent_default();
                            gesture.borrow_mut().touch_start(&touch_points(&canvas_tc, &e));
                        }));
                    }
                    {
                        let gesture = gesture.clone();
                        let viewport = viewport.clone();
                        let canvas_tc = canvas.clone();
                        let after = after.clone();
                        listeners.push(Listener::new(target, "touchmove", move |e: TouchEvent| {
                            e.prevent_default();
                            let pts = touch_points(&canvas_tc, &e);
                            let effect = gesture
                                .borrow_mut()
                                .touch_move(&pts, &mut viewport.borrow_mut());
                            after(effect);
                        }));
                    }
                    for event in ["touchend", "touchcancel"] {
                        let gesture = gesture.clone();
                        let canvas_tc = canvas.clone();
                        listeners.push(Listener::new(target, event, move |e: TouchEvent| {
                            gesture.borrow_mut().touch_end(&touch_points(&canvas_tc, &e));
                        }));
                    }
                    {
                        let canvas_rs = canvas.clone();
                        let draw = draw.clone();
                        listeners.push(Listener::new(window.as_ref(), "resize", move |_e: web_sys::Event| {
                            fit_canvas(&canvas_rs);
                            draw();
                        }));
                    }
                }
                _ => {
                    let err = DashboardError::SurfaceUnavailable;
                    tracing::warn!(%err, "map rendering disabled");
                    notice_ref.borrow().emit(err.notice().to_string());
                }
            }

            move || {
                if let (Some(id), Some(window)) = (*raf_id.borrow(), web_sys::window()) {
                    let _ = window.cancel_animation_frame(id);
                }
                loop_cell.borrow_mut().take();
                draw_ref.borrow_mut().take();
                drop(listeners);
            }
        });
    }

    let on_zoom_in = {
        let gesture = gesture.clone();
        let viewport = viewport.clone();
        let draw_ref = draw_ref.clone();
        let zoom_percent = zoom_percent.clone();
        let on_notice = props.on_notice.clone();
        Callback::from(move |_| {
            if let GestureEffect::Zoomed { percent } =
                gesture.borrow().zoom_in(&mut viewport.borrow_mut())
            {
                zoom_percent.set(percent);
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            on_notice.emit("Map zoomed in".to_string());
        })
    };
    let on_zoom_out = {
        let gesture = gesture.clone();
        let viewport = viewport.clone();
        let draw_ref = draw_ref.clone();
        let zoom_percent = zoom_percent.clone();
        let on_notice = props.on_notice.clone();
        Callback::from(move |_| {
            if let GestureEffect::Zoomed { percent } =
                gesture.borrow().zoom_out(&mut viewport.borrow_mut())
            {
                zoom_percent.set(percent);
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            on_notice.emit("Map zoomed out".to_string());
        })
    };
    let on_locate = {
        let viewport = viewport.clone();
        let draw_ref = draw_ref.clone();
        let zoom_percent = zoom_percent.clone();
        let on_notice = props.on_notice.clone();
        let has_fix = props.has_fix;
        Callback::from(move |_| {
            if !has_fix {
                on_notice.emit("Location not available".to_string());
                return;
            }
            viewport.borrow_mut().reset();
            zoom_percent.set(viewport.borrow().zoom_percent());
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            on_notice.emit("Centered on your location".to_string());
        })
    };

    html! {<div style="position:relative; width:100%;">
        <canvas ref={canvas_ref}
            style={format!("display:block; width:100%; height:{}px; border-radius:8px; touch-action:none; cursor:grab;", MAP_HEIGHT_PX)} />
        <MapControls zoom_percent={*zoom_percent} {on_zoom_in} {on_zoom_out} {on_locate} />
    </div>}
}
