//! Bulk account import from a CSV file.

use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::app::ApiCtx;
use crate::core::gateway::ApiError;
use crate::core::screen::NavIntent;
use crate::core::store::AppStore;
use crate::features::csv::state::{UploadSummary, summarize};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(CsvUploadPage)]
pub(crate) fn csv_upload_page() -> Html {
    let api = use_context::<ApiCtx>().expect("api context");
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let (_, dispatch) = use_store::<AppStore>();

    let file = use_state(|| None::<File>);
    let busy = use_state(|| false);
    let summary = use_state(|| None::<UploadSummary>);
    let error = use_state(|| None::<String>);
    let input_node = use_node_ref();

    let pick_file = {
        let file = file.clone();
        let summary = summary.clone();
        let error = error.clone();
        Callback::from(move |event: Event| {
            let picked = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|list| list.get(0));
            file.set(picked);
            summary.set(None);
            error.set(None);
        })
    };

    let cancel = {
        let dispatch = dispatch;
        Callback::from(move |_| dispatch.reduce_mut(|store| store.navigate(NavIntent::Home)))
    };

    let submit = {
        let api = api;
        let file = file.clone();
        let busy = busy.clone();
        let summary = summary.clone();
        let error = error.clone();
        let bundle = bundle.clone();
        let input_node = input_node.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            let Some(picked) = (*file).clone() else {
                error.set(Some(bundle.text("csv.no_file", "")));
                return;
            };
            busy.set(true);
            summary.set(None);
            error.set(None);
            let api = api.clone();
            let file = file.clone();
            let busy = busy.clone();
            let summary = summary.clone();
            let error = error.clone();
            let bundle = bundle.clone();
            let input_node = input_node.clone();
            yew::platform::spawn_local(async move {
                match api.client.upload_csv(&picked).await {
                    Ok(report) => {
                        summary.set(Some(summarize(&report)));
                        file.set(None);
                        if let Some(input) = input_node.cast::<HtmlInputElement>() {
                            input.set_value("");
                        }
                    }
                    Err(ApiError::Http { message, .. }) => {
                        let message = if message.is_empty() {
                            bundle.text("csv.unknown_error", "")
                        } else {
                            message
                        };
                        error.set(Some(format!(
                            "{} {message}",
                            bundle.text("csv.error_prefix", "")
                        )));
                    }
                    Err(_) => error.set(Some(bundle.text("csv.network_error", ""))),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <section class="csv-upload">
            <h1>{bundle.text("csv.title", "")}</h1>
            <form onsubmit={submit}>
                <input ref={input_node.clone()} type="file" accept=".csv" onchange={pick_file} />
                <div class="actions">
                    <button type="button" onclick={cancel}>{bundle.text("csv.cancel", "")}</button>
                    <button type="submit" class="primary" disabled={*busy}>
                        { if *busy {
                            bundle.text("csv.busy", "")
                        } else {
                            bundle.text("csv.submit", "")
                        } }
                    </button>
                </div>
            </form>
            { if let Some(message) = (*error).clone() {
                html! { <p class="status error">{message}</p> }
            } else {
                html! {}
            } }
            { if let Some(summary) = (*summary).clone() {
                html! {
                    <div class="report">
                        <p class="status success">
                            {format!(
                                "{} {}",
                                bundle.text("csv.success_prefix", ""),
                                summary.created
                            )}
                        </p>
                        { if summary.failures.is_empty() {
                            html! {}
                        } else {
                            html! {
                                <>
                                    <h2>{bundle.text("csv.failures", "")}</h2>
                                    <ul class="failures">
                                        {for summary.failures.iter().map(|failure| html! {
                                            <li key={failure.who.clone()}>
                                                {format!("{}: {}", failure.who, failure.reason)}
                                            </li>
                                        })}
                                    </ul>
                                </>
                            }
                        } }
                    </div>
                }
            } else {
                html! {}
            } }
        </section>
    }
}
