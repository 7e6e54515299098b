//! Search input with an optional suggestion dropdown.

use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::core::search::MIN_QUERY_LEN;

#[derive(Properties, PartialEq)]
pub(crate) struct SearchBoxProps {
    pub value: String,
    pub placeholder: String,
    pub on_input: Callback<String>,
    /// `(id, label)` pairs shown under the box while typing.
    #[prop_or_default]
    pub suggestions: Vec<(i64, String)>,
    #[prop_or_default]
    pub on_pick: Callback<i64>,
    /// Row shown instead of suggestions when an active query matches
    /// nothing. Screens without suggestions leave this unset.
    #[prop_or_default]
    pub empty_label: Option<String>,
}

#[function_component(SearchBox)]
pub(crate) fn search_box(props: &SearchBoxProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            {
                on_input.emit(input.value());
            }
        })
    };

    html! {
        <div class="search-box">
            <input
                type="search"
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                {oninput}
            />
            { if props.suggestions.is_empty() {
                match &props.empty_label {
                    Some(label) if props.value.trim().chars().count() >= MIN_QUERY_LEN => html! {
                        <ul class="suggestions">
                            <li class="empty">{label.clone()}</li>
                        </ul>
                    },
                    _ => html! {},
                }
            } else {
                html! {
                    <ul class="suggestions">
                        {for props.suggestions.iter().map(|(id, label)| {
                            let id = *id;
                            let on_pick = props.on_pick.clone();
                            html! {
                                <li onclick={Callback::from(move |_| on_pick.emit(id))}>
                                    {label.clone()}
                                </li>
                            }
                        })}
                    </ul>
                }
            } }
        </div>
    }
}
