use crate::weather::WeatherReport;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WeatherTabProps {
    pub report: Option<WeatherReport>,
    pub has_location: bool,
    pub on_refresh: Callback<()>,
}

#[function_component(WeatherTab)]
pub fn weather_tab(props: &WeatherTabProps) -> Html {
    if !props.has_location {
        return html! {<p>{"Location required for weather data"}</p>};
    }
    let Some(w) = props.report.clone() else {
        return html! {<p>{"Loading weather..."}</p>};
    };
    let refresh = {
        let cb = props.on_refresh.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div>
        <div style="display:flex; align-items:center; gap:16px;">
            <div onclick={refresh} title="Refresh" style="font-size:42px; cursor:pointer;">{ w.icon }</div>
            <div>
                <h3 style="margin:0;">{ w.condition }</h3>
                <p style="margin:0;">{ format!("{:.1}°F ({:.1}°C)", w.temp_f, w.temp_c) }</p>
                <p style="margin:0;">{ format!("Wind: {:.1} mph {}", w.wind_mph, w.wind_dir) }</p>
            </div>
        </div>
        <p style="margin-top:10px;">{ w.advice }</p>
    </div>}
}
