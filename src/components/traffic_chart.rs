use crate::render::{CHART_HEIGHT, CHART_WIDTH, paint_traffic_chart};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TrafficChartProps {
    pub curve: Vec<f64>,
    /// Fractional local hour for the "now" marker.
    pub now_hour: f64,
}

#[function_component(TrafficChart)]
pub fn traffic_chart(props: &TrafficChartProps) -> Html {
    let canvas_ref = use_node_ref();
    {
        let canvas_ref = canvas_ref.clone();
        let curve = props.curve.clone();
        let now_hour = props.now_hour;
        use_effect_with((curve, now_hour.to_bits()), move |(curve, _)| {
            let ctx = canvas_ref
                .cast::<HtmlCanvasElement>()
                .and_then(|c| c.get_context("2d").ok().flatten())
                .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
            match ctx {
                Some(mut ctx) => paint_traffic_chart(&mut ctx, curve, now_hour),
                None => tracing::warn!("traffic chart has no 2d context"),
            }
            || ()
        });
    }
    html! {<div>
        <canvas ref={canvas_ref}
            width={CHART_WIDTH.to_string()} height={CHART_HEIGHT.to_string()}
            style="max-width:100%; border-radius:6px;" />
        <p style="font-size:12px; color:#6c757d; margin:6px 0 0 0;">
            {"Congestion peaks around 7:30 AM and 5:00 PM."}
        </p>
    </div>}
}
