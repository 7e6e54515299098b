//! Loan screens: per-user history and the staff creation form.

use std::cell::Cell;
use std::rc::Rc;

use biblio_api_models::{Exemplar, Loan, UserHit};
use chrono::NaiveDate;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::app::ApiCtx;
use crate::components::paginator::Paginator;
use crate::components::toast::Toaster;
use crate::core::screen::NavIntent;
use crate::core::search::{LOANS_PAGE_SIZE, MIN_QUERY_LEN, clamp_page, page_slice, total_pages};
use crate::core::store::AppStore;
use crate::features::loans::state::{DATE_FORMAT, LoanForm, lendable, sort_loans};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

/// Today according to the browser clock.
fn today_naive() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

#[function_component(LoansPage)]
pub(crate) fn loans_page() -> Html {
    let api = use_context::<ApiCtx>().expect("api context");
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let (store, _) = use_store::<AppStore>();
    let username = store.session.username.clone().unwrap_or_default();

    let loans = use_state(|| None::<Vec<Loan>>);
    let failed = use_state(|| false);
    let page = use_state(|| 1usize);

    {
        let api = api;
        let loans = loans.clone();
        let failed = failed.clone();
        use_effect_with_deps(
            move |username: &String| {
                let username = username.clone();
                loans.set(None);
                failed.set(false);
                let alive = Rc::new(Cell::new(true));
                {
                    let alive = alive.clone();
                    yew::platform::spawn_local(async move {
                        match api.client.fetch_loans(&username).await {
                            Ok(mut list) if alive.get() => {
                                sort_loans(&mut list);
                                loans.set(Some(list));
                            }
                            Err(_) if alive.get() => failed.set(true),
                            _ => {}
                        }
                    });
                }
                move || alive.set(false)
            },
            username.clone(),
        );
    }

    if *failed {
        return html! { <p class="error">{bundle.text("loans.error", "")}</p> };
    }
    let Some(list) = (*loans).clone() else {
        return html! { <p class="loading">{bundle.text("loans.loading", "")}</p> };
    };

    let total = total_pages(list.len(), LOANS_PAGE_SIZE);
    let current = clamp_page(*page, total);
    let visible = page_slice(&list, current, LOANS_PAGE_SIZE);
    let set_page = {
        let page = page.clone();
        Callback::from(move |next: usize| page.set(next))
    };
    let offset = (current - 1) * LOANS_PAGE_SIZE;

    html! {
        <section class="loans">
            <h1>{format!("{} {username}", bundle.text("loans.title_prefix", ""))}</h1>
            { if list.is_empty() {
                html! { <p class="empty">{bundle.text("loans.empty", "")}</p> }
            } else {
                html! {
                    <table class="loan-table">
                        <thead>
                            <tr>
                                <th>{bundle.text("loans.col_row", "")}</th>
                                <th>{bundle.text("loans.col_id", "")}</th>
                                <th>{bundle.text("loans.col_start", "")}</th>
                                <th>{bundle.text("loans.col_due", "")}</th>
                                <th>{bundle.text("loans.col_notes", "")}</th>
                                <th>{bundle.text("loans.col_title", "")}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for visible.iter().enumerate().map(|(index, loan)| html! {
                                <tr key={loan.id} class={if loan.is_open() { "open" } else { "" }}>
                                    <td>{offset + index + 1}</td>
                                    <td>{loan.id}</td>
                                    <td>{loan.data_prestec.format(DATE_FORMAT).to_string()}</td>
                                    <td>
                                        {loan.data_retorn.map_or_else(
                                            || bundle.text("loans.not_returned", ""),
                                            |date| date.format(DATE_FORMAT).to_string(),
                                        )}
                                    </td>
                                    <td>{loan.anotacions.clone().unwrap_or_default()}</td>
                                    <td>{loan.exemplar_titol.clone()}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            } }
            <Paginator current={current} total={total} on_select={set_page} />
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct LoanCreatePageProps {
    pub book_id: i64,
}

#[function_component(LoanCreatePage)]
pub(crate) fn loan_create_page(props: &LoanCreatePageProps) -> Html {
    let api = use_context::<ApiCtx>().expect("api context");
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let toaster = use_context::<Toaster>();
    let (store, dispatch) = use_store::<AppStore>();

    let form = use_state(|| LoanForm::new(today_naive()));
    let user_query = use_state(String::new);
    let user_hits = use_state(|| None::<Vec<UserHit>>);
    let selected_user = use_state(|| None::<UserHit>);
    let copies = use_state(|| None::<Vec<Exemplar>>);
    let status = use_state(|| None::<(bool, String)>);
    let busy = use_state(|| false);

    {
        let api = api.clone();
        let copies = copies.clone();
        let status = status.clone();
        let bundle = bundle.clone();
        use_effect_with_deps(
            move |book_id: &i64| {
                let book_id = *book_id;
                let alive = Rc::new(Cell::new(true));
                {
                    let alive = alive.clone();
                    yew::platform::spawn_local(async move {
                        match api.client.fetch_book_exemplars(book_id).await {
                            Ok(list) if alive.get() => copies.set(Some(list)),
                            Err(err) if alive.get() => {
                                status.set(Some((
                                    true,
                                    format!(
                                        "{} {err}",
                                        bundle.text("loans.form.exemplars_error_prefix", "")
                                    ),
                                )));
                                copies.set(Some(Vec::new()));
                            }
                            _ => {}
                        }
                    });
                }
                move || alive.set(false)
            },
            props.book_id,
        );
    }

    let search_users = {
        let api = api.clone();
        let user_query = user_query.clone();
        let user_hits = user_hits.clone();
        let status = status.clone();
        let bundle = bundle.clone();
        Callback::from(move |event: InputEvent| {
            let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let value = input.value();
            user_query.set(value.clone());
            if value.trim().chars().count() < MIN_QUERY_LEN {
                user_hits.set(None);
                return;
            }
            let api = api.clone();
            let user_hits = user_hits.clone();
            let status = status.clone();
            let bundle = bundle.clone();
            yew::platform::spawn_local(async move {
                match api.client.search_users(value.trim()).await {
                    Ok(hits) => user_hits.set(Some(hits)),
                    Err(_) => {
                        status.set(Some((true, bundle.text("loans.form.search_error", ""))));
                        user_hits.set(Some(Vec::new()));
                    }
                }
            });
        })
    };

    let pick_user = {
        let form = form.clone();
        let selected_user = selected_user.clone();
        let user_hits = user_hits.clone();
        let user_query = user_query.clone();
        Callback::from(move |hit: UserHit| {
            form.set(LoanForm {
                usuari: Some(hit.id),
                ..(*form).clone()
            });
            user_query.set(format!("{} {}", hit.first_name, hit.last_name));
            selected_user.set(Some(hit));
            user_hits.set(None);
        })
    };

    let pick_exemplar = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
            {
                form.set(LoanForm {
                    exemplar: select.value().parse::<i64>().ok(),
                    ..(*form).clone()
                });
            }
        })
    };

    let set_date = |field: fn(&mut LoanForm, String)| {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            {
                let mut next = (*form).clone();
                field(&mut next, input.value());
                form.set(next);
            }
        })
    };
    let set_prestec = set_date(|form, value| form.data_prestec = value);
    let set_retorn = set_date(|form, value| form.data_retorn = value);
    let set_notes = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(area) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlTextAreaElement>().ok())
            {
                form.set(LoanForm {
                    anotacions: area.value(),
                    ..(*form).clone()
                });
            }
        })
    };

    let back = {
        let dispatch = dispatch.clone();
        let book_id = props.book_id;
        Callback::from(move |_| {
            dispatch.reduce_mut(|store| store.navigate(NavIntent::OpenDetail { book_id }));
        })
    };

    let submit = {
        let api = api;
        let form = form.clone();
        let status = status.clone();
        let busy = busy.clone();
        let bundle = bundle.clone();
        let toaster = toaster;
        let has_token = store.session.is_authenticated();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            if !has_token {
                status.set(Some((true, bundle.text("loans.form.no_token", ""))));
                return;
            }
            let request = match form.to_request(today_naive()) {
                Ok(request) => request,
                Err(err) => {
                    status.set(Some((true, bundle.text(err.message_key(), ""))));
                    return;
                }
            };
            busy.set(true);
            status.set(None);
            let api = api.clone();
            let form = form.clone();
            let status = status.clone();
            let busy = busy.clone();
            let bundle = bundle.clone();
            let toaster = toaster.clone();
            yew::platform::spawn_local(async move {
                match api.client.create_loan(&request).await {
                    Ok(_) => {
                        let message = bundle.text("loans.form.success", "");
                        status.set(Some((false, message.clone())));
                        if let Some(toaster) = &toaster {
                            toaster.success(message);
                        }
                        form.set(LoanForm {
                            exemplar: None,
                            ..(*form).clone()
                        });
                    }
                    Err(err) => {
                        status.set(Some((
                            true,
                            format!("{} {err}", bundle.text("loans.form.error_prefix", "")),
                        )));
                    }
                }
                busy.set(false);
            });
        })
    };

    let offered = (*copies).clone();
    html! {
        <section class="loan-create">
            <h1>{bundle.text("loans.form.title", "")}</h1>
            <form onsubmit={submit}>
                <label>{bundle.text("loans.form.users", "")}</label>
                <input
                    type="text"
                    value={(*user_query).clone()}
                    placeholder={bundle.text("loans.form.search_placeholder", "")}
                    oninput={search_users}
                />
                { match (*user_hits).clone() {
                    Some(hits) if hits.is_empty() => html! {
                        <p class="empty">{bundle.text("loans.form.user_not_found", "")}</p>
                    },
                    Some(hits) => html! {
                        <ul class="user-hits">
                            {for hits.iter().map(|hit| {
                                let pick_user = pick_user.clone();
                                let candidate = hit.clone();
                                html! {
                                    <li key={hit.id} onclick={Callback::from(move |_| pick_user.emit(candidate.clone()))}>
                                        {format!("{} {} — {}", hit.first_name, hit.last_name, hit.email)}
                                    </li>
                                }
                            })}
                        </ul>
                    },
                    None => html! {},
                } }
                { if let Some(user) = (*selected_user).clone() {
                    html! {
                        <div class="selected-user">
                            <p>
                                {bundle.text("loans.form.selected", "")}{" "}
                                {format!("{} {}", user.first_name, user.last_name)}
                            </p>
                            { if let Some(phone) = &user.telefon {
                                html! { <p>{bundle.text("loans.form.phone", "")}{" "}{phone.clone()}</p> }
                            } else {
                                html! {}
                            } }
                            { if let Some(centre) = &user.centre {
                                html! { <p>{bundle.text("loans.form.centre", "")}{" "}{centre.clone()}</p> }
                            } else {
                                html! {}
                            } }
                        </div>
                    }
                } else {
                    html! {}
                } }

                <label>{bundle.text("loans.form.exemplars", "")}</label>
                { match &offered {
                    None => html! { <p class="loading">{bundle.text("loans.form.loading_exemplars", "")}</p> },
                    Some(list) => {
                        let options = lendable(list);
                        if options.is_empty() {
                            html! { <p class="empty">{bundle.text("loans.form.none", "")}</p> }
                        } else {
                            html! {
                                <select onchange={pick_exemplar}>
                                    <option value="" selected={form.exemplar.is_none()}>{"—"}</option>
                                    {for options.iter().map(|exemplar| html! {
                                        <option
                                            value={exemplar.id.to_string()}
                                            selected={form.exemplar == Some(exemplar.id)}
                                        >
                                            {format!(
                                                "{} {} · {} {}",
                                                bundle.text("loans.form.registre", ""),
                                                exemplar.registre,
                                                bundle.text("loans.form.exemplar_centre", ""),
                                                exemplar.centre.nom
                                            )}
                                        </option>
                                    })}
                                </select>
                            }
                        }
                    }
                } }

                <label>{bundle.text("loans.form.date", "")}</label>
                <input type="date" value={form.data_prestec.clone()} oninput={set_prestec} />
                <label>{bundle.text("loans.form.due_date", "")}</label>
                <input type="date" value={form.data_retorn.clone()} oninput={set_retorn} />
                <label>{bundle.text("loans.col_notes", "")}</label>
                <textarea value={form.anotacions.clone()} oninput={set_notes} />

                { if let Some((is_error, message)) = (*status).clone() {
                    let class = if is_error { "status error" } else { "status success" };
                    html! { <p class={class}>{message}</p> }
                } else {
                    html! {}
                } }
                { if *busy {
                    html! { <p class="busy">{bundle.text("loans.form.busy_note", "")}</p> }
                } else {
                    html! {}
                } }

                <div class="actions">
                    <button type="button" onclick={back}>{bundle.text("loans.form.back", "")}</button>
                    <button type="submit" class="primary" disabled={*busy}>
                        { if *busy {
                            bundle.text("loans.form.busy", "")
                        } else {
                            bundle.text("loans.form.confirm", "")
                        } }
                    </button>
                </div>
            </form>
        </section>
    }
}
