use crate::model::LocationFix;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum LocationStatus {
    Detecting,
    Fixed(LocationFix),
    Failed(AttrValue),
}

impl LocationStatus {
    pub fn fix(&self) -> Option<LocationFix> {
        match self {
            LocationStatus::Fixed(fix) => Some(*fix),
            _ => None,
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LocationPanelProps {
    pub status: LocationStatus,
}

#[function_component(LocationPanel)]
pub fn location_panel(props: &LocationPanelProps) -> Html {
    let body = match &props.status {
        LocationStatus::Detecting => html! {<div>{"Detecting your location..."}</div>},
        LocationStatus::Fixed(fix) => html! {<>
            <div><strong>{"Latitude: "}</strong>{ format!("{:.6}", fix.latitude) }</div>
            <div><strong>{"Longitude: "}</strong>{ format!("{:.6}", fix.longitude) }</div>
            <div><strong>{"Accuracy: "}</strong>{ format!("±{} meters", fix.accuracy_m.round()) }</div>
        </>},
        LocationStatus::Failed(reason) => html! {
            <div style="color:#dc3545;">{ format!("⚠ {}", reason) }</div>
        },
    };
    html! {<section style="background:#fff; border:1px solid #dee2e6; border-radius:8px; padding:12px 14px; font-size:14px; display:flex; flex-direction:column; gap:4px;">
        <h3 style="margin:0 0 6px 0; font-size:15px;">{"Your Location"}</h3>
        { body }
    </section>}
}
