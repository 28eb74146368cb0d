use crate::weather::ALT_ROUTES;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AltRoutesProps {
    pub has_location: bool,
    pub on_select: Callback<&'static str>,
}

#[function_component(AltRoutes)]
pub fn alt_routes(props: &AltRoutesProps) -> Html {
    if !props.has_location {
        return html! {<p>{"Location required for route alternatives"}</p>};
    }
    html! {<div style="display:flex; flex-direction:column; gap:8px;">
        { for ALT_ROUTES.iter().map(|route| {
            let cb = props.on_select.clone();
            let title = route.title;
            html! {<div
                onclick={Callback::from(move |_| cb.emit(title))}
                style="cursor:pointer; border:1px solid #dee2e6; border-radius:8px; padding:10px 12px; background:#fff;">
                <div style="font-weight:600;">{ route.title }</div>
                <div style="font-size:13px; color:#6c757d;">{ route.summary }</div>
            </div>}
        }) }
    </div>}
}
