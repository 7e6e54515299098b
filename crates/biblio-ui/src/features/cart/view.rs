//! Review screen for the label selection.

use gloo::dialogs::confirm;
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::components::paginator::Paginator;
use crate::core::screen::NavIntent;
use crate::core::search::{CART_PAGE_SIZE, clamp_page, page_slice, total_pages};
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(CartPage)]
pub(crate) fn cart_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let (store, dispatch) = use_store::<AppStore>();
    let page = use_state(|| 1usize);

    let items = store.cart.items.clone();
    let total = total_pages(items.len(), CART_PAGE_SIZE);
    let current = clamp_page(*page, total);
    let visible = page_slice(&items, current, CART_PAGE_SIZE);

    let set_page = {
        let page = page.clone();
        Callback::from(move |next: usize| page.set(next))
    };
    let back = {
        let dispatch = dispatch.clone();
        Callback::from(move |_| dispatch.reduce_mut(|store| store.navigate(NavIntent::Exemplars)))
    };
    let clear = {
        let dispatch = dispatch.clone();
        let bundle = bundle.clone();
        Callback::from(move |_| {
            if confirm(&bundle.text("exemplars.confirm_clear_all", "")) {
                dispatch.reduce_mut(|store| store.cart.clear());
            }
        })
    };
    let print = {
        let dispatch = dispatch.clone();
        Callback::from(move |_| {
            dispatch.reduce_mut(|store| store.navigate(NavIntent::PrintPreview));
        })
    };

    html! {
        <section class="cart">
            <button onclick={back}>{bundle.text("exemplars.cart_close", "")}</button>
            <h1>{format!("{} {}", bundle.text("cart.count", ""), store.cart.len())}</h1>
            { if store.cart.is_empty() {
                html! { <p class="empty">{bundle.text("cart.empty", "")}</p> }
            } else {
                html! {
                    <table class="cart-table">
                        <tbody>
                            {for visible.iter().map(|exemplar| {
                                let id = exemplar.id;
                                let remove = {
                                    let dispatch = dispatch.clone();
                                    Callback::from(move |_| {
                                        dispatch.reduce_mut(move |store| store.cart.remove(id));
                                    })
                                };
                                html! {
                                    <tr key={id}>
                                        <td>{exemplar.registre.clone()}</td>
                                        <td>{exemplar.cataleg.titol.clone()}</td>
                                        <td>{exemplar.centre.nom.clone()}</td>
                                        <td>
                                            <button onclick={remove}>
                                                {bundle.text("exemplars.remove", "")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                }
            } }
            <Paginator current={current} total={total} on_select={set_page} />
            <div class="actions">
                <button onclick={clear} disabled={store.cart.is_empty()}>
                    {bundle.text("cart.clear", "")}
                </button>
                <button class="primary" onclick={print} disabled={store.cart.is_empty()}>
                    {bundle.text("cart.print", "")}
                </button>
            </div>
        </section>
    }
}
