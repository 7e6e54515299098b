//! Sidebar shortcuts: import and exemplar search for staff, loans for
//! anyone signed in.

use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::core::screen::NavIntent;
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(Sidebar)]
pub(crate) fn sidebar() -> Html {
    let (store, dispatch) = use_store::<AppStore>();
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    if !store.session.is_authenticated() {
        return html! {};
    }

    let nav = |intent: NavIntent| {
        let dispatch = dispatch.clone();
        Callback::from(move |_| dispatch.reduce_mut(|store| store.navigate(intent)))
    };

    html! {
        <aside class="sidebar">
            { if store.session.is_staff() {
                html! {
                    <>
                        <button onclick={nav(NavIntent::CsvUpload)}>
                            {bundle.text("sidebar.csv", "")}
                        </button>
                        <button onclick={nav(NavIntent::Exemplars)}>
                            {bundle.text("sidebar.exemplars", "")}
                        </button>
                    </>
                }
            } else {
                html! {}
            } }
            <button onclick={nav(NavIntent::Loans)}>
                {bundle.text("sidebar.loans", "")}
            </button>
        </aside>
    }
}
