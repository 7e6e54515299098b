//! Exemplar search screen with the label selection controls.

use std::cell::Cell;
use std::rc::Rc;

use biblio_api_models::Exemplar;
use gloo::dialogs::confirm;
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::app::ApiCtx;
use crate::components::paginator::Paginator;
use crate::components::search_box::SearchBox;
use crate::components::toast::Toaster;
use crate::core::screen::NavIntent;
use crate::core::search::{EXEMPLARS_PAGE_SIZE, SearchMode, clamp_page, page_slice, parse_query, total_pages};
use crate::core::store::AppStore;
use crate::features::exemplars::state::{filter, filtered_ids};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(ExemplarsPage)]
pub(crate) fn exemplars_page() -> Html {
    let api = use_context::<ApiCtx>().expect("api context");
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let toaster = use_context::<Toaster>();
    let (store, dispatch) = use_store::<AppStore>();

    let inventory = use_state(|| None::<Vec<Exemplar>>);
    let query = use_state(String::new);
    let page = use_state(|| 1usize);

    {
        let api = api;
        let inventory = inventory.clone();
        use_effect_with_deps(
            move |_| {
                let alive = Rc::new(Cell::new(true));
                {
                    let alive = alive.clone();
                    yew::platform::spawn_local(async move {
                        match api.client.fetch_exemplars().await {
                            Ok(list) if alive.get() => inventory.set(Some(list)),
                            Err(err) if alive.get() => {
                                if let Some(toaster) = &toaster {
                                    toaster.error(err.to_string());
                                }
                                inventory.set(Some(Vec::new()));
                            }
                            _ => {}
                        }
                    });
                }
                move || alive.set(false)
            },
            (),
        );
    }

    let set_query = {
        let query = query.clone();
        let page = page.clone();
        Callback::from(move |value: String| {
            query.set(value);
            page.set(1);
        })
    };
    let clear_query = {
        let query = query.clone();
        let page = page.clone();
        Callback::from(move |_| {
            query.set(String::new());
            page.set(1);
        })
    };
    let set_page = {
        let page = page.clone();
        Callback::from(move |next: usize| page.set(next))
    };
    let open_cart = {
        let dispatch = dispatch.clone();
        Callback::from(move |_| dispatch.reduce_mut(|store| store.navigate(NavIntent::Cart)))
    };

    let Some(list) = (*inventory).clone() else {
        return html! { <p class="loading">{bundle.text("exemplars.loading", "")}</p> };
    };

    let mode = parse_query(&query);
    let hits: Vec<Exemplar> = filter(&list, &mode).into_iter().cloned().collect();
    let total = total_pages(hits.len(), EXEMPLARS_PAGE_SIZE);
    let current = clamp_page(*page, total);
    let visible = page_slice(&hits, current, EXEMPLARS_PAGE_SIZE);

    let select_all = {
        let dispatch = dispatch.clone();
        let hits = hits.clone();
        Callback::from(move |_| {
            let hits = hits.clone();
            dispatch.reduce_mut(move |store| store.cart.add_many(&hits));
        })
    };
    let clear_all = {
        let dispatch = dispatch.clone();
        let visible_ids = filtered_ids(&list, &mode);
        let mode = mode.clone();
        let bundle = bundle.clone();
        Callback::from(move |_| {
            if mode == SearchMode::Inactive {
                if confirm(&bundle.text("exemplars.confirm_clear_all", "")) {
                    dispatch.reduce_mut(|store| store.cart.clear());
                }
            } else if confirm(&bundle.text("exemplars.confirm_clear_filtered", "")) {
                let ids = visible_ids.clone();
                dispatch.reduce_mut(move |store| store.cart.remove_all(&ids));
            }
        })
    };

    html! {
        <section class="exemplars">
            <div class="header">
                <h1>{bundle.text("exemplars.title", "")}</h1>
                <button class="cart-button" onclick={open_cart}>
                    {format!("{} {}", bundle.text("exemplars.cart_open", ""), store.cart.len())}
                </button>
            </div>
            <SearchBox
                value={(*query).clone()}
                placeholder={bundle.text("search.placeholder", "")}
                on_input={set_query}
            />
            { if mode == SearchMode::Inactive {
                html! {}
            } else {
                html! {
                    <div class="results-header">
                        <span>
                            {format!(
                                "{} \"{}\" — {} {}",
                                bundle.text("exemplars.results_for", ""),
                                query.trim(),
                                hits.len(),
                                bundle.text("exemplars.found_suffix", "")
                            )}
                        </span>
                        <button onclick={clear_query}>{bundle.text("exemplars.new_search", "")}</button>
                    </div>
                }
            } }
            <div class="bulk-actions">
                <button onclick={select_all}>{bundle.text("exemplars.select_all", "")}</button>
                <button onclick={clear_all}>{bundle.text("exemplars.clear_all", "")}</button>
            </div>
            <table class="exemplar-table">
                <tbody>
                    {for visible.iter().map(|exemplar| {
                        let in_cart = store.cart.contains(exemplar.id);
                        let toggle = {
                            let dispatch = dispatch.clone();
                            let exemplar = exemplar.clone();
                            Callback::from(move |_| {
                                let exemplar = exemplar.clone();
                                dispatch.reduce_mut(move |store| {
                                    if store.cart.contains(exemplar.id) {
                                        store.cart.remove(exemplar.id);
                                    } else {
                                        store.cart.add(exemplar);
                                    }
                                });
                            })
                        };
                        html! {
                            <tr key={exemplar.id}>
                                <td>{exemplar.registre.clone()}</td>
                                <td>{exemplar.cataleg.titol.clone()}</td>
                                <td>{exemplar.centre.nom.clone()}</td>
                                <td>{exemplar.tipus.clone()}</td>
                                <td>
                                    <button onclick={toggle}>
                                        { if in_cart {
                                            bundle.text("exemplars.remove", "")
                                        } else {
                                            bundle.text("exemplars.add", "")
                                        } }
                                    </button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
            <Paginator current={current} total={total} on_select={set_page} />
        </section>
    }
}
