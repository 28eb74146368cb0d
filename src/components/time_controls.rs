use crate::util::{format_clock, format_date, format_hour_label, time_input_value};
use chrono::NaiveDateTime;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TimeControlsProps {
    pub now: NaiveDateTime,
    /// Departure hour shown by both the slider and the time input.
    pub hour: u8,
    pub refreshing: bool,
    pub on_slider: Callback<u8>,
    /// Raw "HH:MM" from the departure input.
    pub on_departure: Callback<String>,
    pub on_refresh: Callback<()>,
}

#[function_component(TimeControls)]
pub fn time_controls(props: &TimeControlsProps) -> Html {
    let on_slider = {
        let cb = props.on_slider.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                if let Ok(hour) = input.value().parse::<u8>() {
                    cb.emit(hour.min(23));
                }
            }
        })
    };
    let on_departure = {
        let cb = props.on_departure.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let refresh = {
        let cb = props.on_refresh.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<section style="background:#fff; border:1px solid #dee2e6; border-radius:8px; padding:12px 14px; display:flex; flex-direction:column; gap:8px; font-size:14px;">
        <div style="display:flex; justify-content:space-between; align-items:baseline;">
            <div>
                <div style="font-size:22px; font-weight:600; font-variant-numeric:tabular-nums;">{ format_clock(&props.now) }</div>
                <div style="color:#6c757d;">{ format_date(&props.now) }</div>
            </div>
            <button onclick={refresh} disabled={props.refreshing} style="padding:4px 10px; font-size:12px;">
                { if props.refreshing { "Refreshing..." } else { "Refresh" } }
            </button>
        </div>
        <label style="display:flex; flex-direction:column; gap:4px;">
            <span>{ format!("Departure: {}", format_hour_label(props.hour)) }</span>
            <input type="range" min="0" max="23" step="1"
                value={props.hour.to_string()}
                oninput={on_slider} />
        </label>
        <label style="display:flex; align-items:center; gap:8px;">
            <span>{"Leave at"}</span>
            <input type="time" value={time_input_value(props.hour)} onchange={on_departure} />
        </label>
    </section>}
}
