use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NotificationProps {
    pub message: Option<AttrValue>,
}

#[function_component(Notification)]
pub fn notification(props: &NotificationProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };
    html! {<div role="status" style="position:fixed; top:16px; right:16px; z-index:1000; background:#212529; color:#fff; border-radius:8px; padding:10px 16px; font-size:14px; box-shadow:0 4px 12px rgba(0,0,0,0.25);">
        { message }
    </div>}
}
