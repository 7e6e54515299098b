//! Numbered paginator with a sliding window around the current page.

use yew::prelude::*;

use crate::core::search::page_window;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[derive(Properties, PartialEq)]
pub(crate) struct PaginatorProps {
    pub current: usize,
    pub total: usize,
    pub on_select: Callback<usize>,
}

#[function_component(Paginator)]
pub(crate) fn paginator(props: &PaginatorProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    if props.total <= 1 {
        return html! {};
    }

    let window = page_window(props.current, props.total);
    let goto = |page: usize| {
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(page))
    };

    html! {
        <nav class="paginator">
            <button
                disabled={props.current <= 1}
                onclick={goto(props.current.saturating_sub(1))}
            >
                {bundle.text("pagination.prev", "« Anterior")}
            </button>
            { if window.show_first {
                html! {
                    <>
                        <button onclick={goto(1)}>{"1"}</button>
                        { if window.leading_gap { html! { <span class="gap">{"…"}</span> } } else { html! {} } }
                    </>
                }
            } else { html! {} } }
            {for window.pages.iter().map(|page| {
                let page = *page;
                let class = if page == props.current { "page active" } else { "page" };
                html! {
                    <button class={class} onclick={goto(page)}>{page}</button>
                }
            })}
            { if window.show_last {
                html! {
                    <>
                        { if window.trailing_gap { html! { <span class="gap">{"…"}</span> } } else { html! {} } }
                        <button onclick={goto(props.total)}>{props.total}</button>
                    </>
                }
            } else { html! {} } }
            <button
                disabled={props.current >= props.total}
                onclick={goto(props.current + 1)}
            >
                {bundle.text("pagination.next", "Següent »")}
            </button>
        </nav>
    }
}
