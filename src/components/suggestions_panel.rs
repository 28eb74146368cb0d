use crate::model::{ActionKind, CommuteOption};
use crate::state::SuggestionFeed;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SuggestionsPanelProps {
    pub feed: SuggestionFeed,
    pub on_select: Callback<ActionKind>,
}

#[derive(Properties, PartialEq, Clone)]
struct CardProps {
    option: CommuteOption,
    on_select: Callback<ActionKind>,
}

#[function_component(SuggestionCard)]
fn suggestion_card(props: &CardProps) -> Html {
    let opt = &props.option;
    let onclick = {
        let cb = props.on_select.clone();
        let action = opt.action;
        Callback::from(move |_| cb.emit(action))
    };
    let time = if opt.estimated_minutes == (0, 0) {
        "No commute".to_string()
    } else {
        opt.time_label()
    };
    html! {<div style={format!("background:#fff; border:1px solid #dee2e6; border-left:4px solid {}; border-radius:8px; padding:12px 14px; display:flex; flex-direction:column; gap:6px;", opt.tier.accent_color())}>
        <div style="display:flex; justify-content:space-between; align-items:baseline; gap:8px;">
            <span style="font-weight:600;">{ opt.name.clone() }</span>
            <span style="font-variant-numeric:tabular-nums; color:#495057;">{ time }</span>
        </div>
        <div style="font-size:13px; color:#6c757d;">{ opt.description.clone() }</div>
        <div style="display:flex; flex-wrap:wrap; gap:4px 12px; font-size:12px;">
            { for opt.details.iter().map(|(label, value)| html! {
                <span><strong>{ format!("{}: ", label) }</strong>{ value.clone() }</span>
            }) }
        </div>
        <button {onclick} style="align-self:flex-start; padding:4px 10px; font-size:13px;">{ opt.action.button_text() }</button>
    </div>}
}

#[function_component(SuggestionsPanel)]
pub fn suggestions_panel(props: &SuggestionsPanelProps) -> Html {
    let feed = &props.feed;
    if let Some(reason) = &feed.unavailable {
        return html! {<p>{ reason.clone() }</p>};
    }
    html! {<div style="display:flex; flex-direction:column; gap:10px;">
        if feed.loading && feed.cards.is_empty() {
            <p>{"Calculating best commute options..."}</p>
        }
        { for feed.cards.iter().map(|opt| html! {
            <SuggestionCard option={opt.clone()} on_select={props.on_select.clone()} />
        }) }
    </div>}
}
