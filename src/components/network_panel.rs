use crate::network::NetworkReport;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NetworkPanelProps {
    pub report: Option<NetworkReport>,
    pub checking: bool,
    /// Last check failure, if the most recent check failed.
    pub error: Option<AttrValue>,
}

fn status_color(class: &str) -> &'static str {
    match class {
        "good" => "#28a745",
        "poor" => "#dc3545",
        _ => "#ffc107",
    }
}

#[function_component(NetworkPanel)]
pub fn network_panel(props: &NetworkPanelProps) -> Html {
    let row_style = "display:flex; justify-content:space-between; gap:8px;";
    let body = match (&props.report, &props.error) {
        (_, Some(err)) => html! {<div style="color:#dc3545;">{ err.clone() }</div>},
        (None, None) => html! {<div>{ if props.checking { "Checking network..." } else { "No data" } }</div>},
        (Some(r), None) => {
            let color = status_color(r.status_class);
            html! {<>
                <div style={format!("font-weight:600; color:{};", color)}>{ r.status_text }</div>
                <div style="height:8px; background:#e9ecef; border-radius:4px; overflow:hidden;">
                    <div style={format!("height:100%; width:{:.0}%; background:{};", r.quality_percent, color)}></div>
                </div>
                <div style={row_style}><span>{"Type"}</span><span>{ r.sample.effective_type.label() }</span></div>
                <div style={row_style}><span>{"Downlink"}</span><span>{ r.downlink_label() }</span></div>
                <div style={row_style}><span>{"Latency"}</span><span>{ format!("{} ms", r.sample.latency_ms) }</span></div>
            </>}
        }
    };
    html! {<section style="background:#fff; border:1px solid #dee2e6; border-radius:8px; padding:12px 14px; font-size:14px; display:flex; flex-direction:column; gap:6px;">
        <h3 style="margin:0 0 6px 0; font-size:15px;">{"Network"}</h3>
        { body }
    </section>}
}
