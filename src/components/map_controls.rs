use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MapControlsProps {
    pub zoom_percent: u32,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_locate: Callback<()>,
}

#[function_component(MapControls)]
pub fn map_controls(props: &MapControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let loc = {
        let cb = props.on_locate.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(255,255,255,0.92); border:1px solid #dee2e6; border-radius:8px; padding:6px; display:flex; gap:6px; align-items:center;">
        <button onclick={zo} title="Zoom out">{"-"}</button>
        <span style="min-width:44px; text-align:center; font-size:12px; font-variant-numeric:tabular-nums;">{ format!("{}%", props.zoom_percent) }</span>
        <button onclick={zi} title="Zoom in">{"+"}</button>
        <span style="width:6px;"></span>
        <button onclick={loc} title="Center on my location">{"Locate me"}</button>
    </div>}
}
