//! Label sheet preview and the PDF download.

use std::cell::Cell;
use std::rc::Rc;

use futures::future::join_all;
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::app::ApiCtx;
use crate::components::toast::Toaster;
use crate::core::gateway::barcode_url;
use crate::core::labels::{LabelItem, page_slots, pages};
use crate::core::screen::NavIntent;
use crate::core::store::AppStore;
use crate::features::labels::pdf;
use crate::features::labels::state::{CduLookup, resolve_items};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::{barcode, download};

#[function_component(PrintPreviewPage)]
pub(crate) fn print_preview_page() -> Html {
    let api = use_context::<ApiCtx>().expect("api context");
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let toaster = use_context::<Toaster>();
    let (store, dispatch) = use_store::<AppStore>();

    let items = use_state(|| None::<Vec<LabelItem>>);
    let sheet = use_state(|| 0usize);
    let generating = use_state(|| false);
    let download_guard = use_mut_ref(|| false);

    {
        let api = api;
        let items = items.clone();
        let selection = store.cart.items.clone();
        use_effect_with_deps(
            move |selection: &Vec<biblio_api_models::Exemplar>| {
                let selection = selection.clone();
                items.set(None);
                let alive = Rc::new(Cell::new(true));
                {
                    let alive = alive.clone();
                    yew::platform::spawn_local(async move {
                        let lookups: Vec<CduLookup> = join_all(
                            selection.iter().map(|exemplar| {
                                let api = api.clone();
                                let registre = exemplar.registre.clone();
                                async move {
                                    let cdu = api.client.fetch_cdu(&registre).await.ok().flatten();
                                    (registre, cdu)
                                }
                            }),
                        )
                        .await;
                        if alive.get() {
                            items.set(Some(resolve_items(&selection, lookups)));
                        }
                    });
                }
                move || alive.set(false)
            },
            selection,
        );
    }

    let back = {
        let dispatch = dispatch;
        Callback::from(move |_| dispatch.reduce_mut(|store| store.navigate(NavIntent::Cart)))
    };

    let Some(batch) = (*items).clone() else {
        return html! { <p class="loading">{bundle.text("labels.preview.loading", "")}</p> };
    };

    let sheets = pages(&batch);
    let sheet_count = sheets.len().max(1);
    let current = (*sheet).min(sheet_count - 1);

    let prev = {
        let sheet = sheet.clone();
        Callback::from(move |_| sheet.set(current.saturating_sub(1)))
    };
    let next = {
        let sheet = sheet.clone();
        Callback::from(move |_| sheet.set((current + 1).min(sheet_count - 1)))
    };

    let save_pdf = {
        let batch = batch.clone();
        let generating = generating.clone();
        let download_guard = download_guard;
        let toaster = toaster;
        Callback::from(move |_| {
            if *download_guard.borrow() {
                return;
            }
            *download_guard.borrow_mut() = true;
            generating.set(true);
            download::set_busy_cursor(true);
            let batch = batch.clone();
            let generating = generating.clone();
            let download_guard = download_guard.clone();
            let toaster = toaster.clone();
            yew::platform::spawn_local(async move {
                let codes: Vec<String> =
                    batch.iter().map(|item| item.registre.clone()).collect();
                let barcodes = barcode::fetch_batch(&codes).await;
                let outcome = pdf::build_document(&pages(&batch), &barcodes).and_then(|bytes| {
                    download::save_bytes(&bytes, pdf::DOCUMENT_NAME, "application/pdf")
                });
                if let Err(err) = outcome {
                    if let Some(toaster) = &toaster {
                        toaster.error(err.to_string());
                    }
                }
                download::set_busy_cursor(false);
                generating.set(false);
                *download_guard.borrow_mut() = false;
            });
        })
    };

    let slots = sheets
        .get(current)
        .map(|page| page_slots(page))
        .unwrap_or_default();

    html! {
        <section class="print-preview">
            <div class="toolbar">
                <button onclick={back}>{bundle.text("labels.preview.back", "")}</button>
                <button class="primary" onclick={save_pdf} disabled={*generating || batch.is_empty()}>
                    { if *generating {
                        bundle.text("labels.preview.generating", "")
                    } else {
                        bundle.text("labels.preview.download", "")
                    } }
                </button>
            </div>
            <div class="sheet-nav">
                <button onclick={prev} disabled={current == 0}>
                    {bundle.text("labels.preview.prev", "")}
                </button>
                <span>
                    {format!(
                        "{} {} {} {}",
                        bundle.text("labels.preview.page", ""),
                        current + 1,
                        bundle.text("labels.preview.of", ""),
                        sheet_count
                    )}
                </span>
                <button onclick={next} disabled={current + 1 >= sheet_count}>
                    {bundle.text("labels.preview.next", "")}
                </button>
            </div>
            <div class="label-sheet">
                {for slots.iter().enumerate().map(|(index, slot)| match slot {
                    Some(item) => html! {
                        <div class="label" key={item.registre.clone()}>
                            <img src={barcode_url(&item.registre)} alt={item.registre.clone()} />
                            <span class="centre">{item.centre.clone()}</span>
                            <span class="registre">{item.registre.clone()}</span>
                            <span class="cdu">{item.cdu.clone()}</span>
                        </div>
                    },
                    None => html! { <div class="label empty" key={format!("empty-{index}")}></div> },
                })}
            </div>
        </section>
    }
}
