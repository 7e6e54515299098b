//! Catalogue screens: searchable list and the record detail page.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use biblio_api_models::{Book, Exemplar};
use yew::prelude::*;
use yew_router::prelude::use_navigator;
use yewdux::prelude::use_store;

use crate::app::{ApiCtx, Route};
use crate::components::paginator::Paginator;
use crate::components::search_box::SearchBox;
use crate::components::toast::Toaster;
use crate::core::screen::NavIntent;
use crate::core::search::{BOOKS_PAGE_SIZE, SearchMode, clamp_page, page_slice, parse_query, total_pages};
use crate::core::store::AppStore;
use crate::features::catalog::state::{availability, branch_holdings, filter_books, suggestions};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(CatalogPage)]
pub(crate) fn catalog_page() -> Html {
    let api = use_context::<ApiCtx>().expect("api context");
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let toaster = use_context::<Toaster>();
    let (_, dispatch) = use_store::<AppStore>();
    let navigator = use_navigator();

    let books = use_state(|| None::<Vec<Book>>);
    let exemplars = use_state(Vec::<Exemplar>::new);
    let query = use_state(String::new);
    let page = use_state(|| 1usize);

    {
        let api = api.clone();
        let books = books.clone();
        let exemplars = exemplars.clone();
        let toaster = toaster.clone();
        use_effect_with_deps(
            move |_| {
                let alive = Rc::new(Cell::new(true));
                {
                    let api = api.clone();
                    let alive = alive.clone();
                    yew::platform::spawn_local(async move {
                        match api.client.fetch_books(None).await {
                            Ok(list) if alive.get() => books.set(Some(list)),
                            Err(err) if alive.get() => {
                                if let Some(toaster) = &toaster {
                                    toaster.error(err.to_string());
                                }
                                books.set(Some(Vec::new()));
                            }
                            _ => {}
                        }
                    });
                }
                {
                    let alive = alive.clone();
                    yew::platform::spawn_local(async move {
                        // Availability is a nicety; a failure just hides the counts.
                        if let Ok(list) = api.client.fetch_exemplars().await {
                            if alive.get() {
                                exemplars.set(list);
                            }
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
    let open_detail = {
        let dispatch = dispatch.clone();
        let navigator = navigator.clone();
        Callback::from(move |book_id: i64| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Llibre { id: book_id });
            }
            dispatch.reduce_mut(|store| store.navigate(NavIntent::OpenDetail { book_id }));
        })
    };
    let set_page = {
        let page = page.clone();
        Callback::from(move |next: usize| page.set(next))
    };

    let mode = parse_query(&query);
    let Some(book_list) = (*books).clone() else {
        return html! { <p class="loading">{bundle.text("catalog.loading", "")}</p> };
    };
    let counts = availability(&exemplars);
    let hint_list = suggestions(&book_list, &query)
        .iter()
        .map(|book| (book.id, book.titol.clone()))
        .collect::<Vec<_>>();

    let body = if mode == SearchMode::Inactive {
        html! {
            <div class="prompt">
                <h2>{bundle.text("catalog.prompt_title", "")}</h2>
                <p>{bundle.text("catalog.prompt", "")}</p>
            </div>
        }
    } else {
        let hits = filter_books(&book_list, &mode);
        let total = total_pages(hits.len(), BOOKS_PAGE_SIZE);
        let current = clamp_page(*page, total);
        let visible = page_slice(&hits, current, BOOKS_PAGE_SIZE);
        html! {
            <>
                <div class="results-header">
                    <span>
                        {format!(
                            "{} \"{}\" — {} {}",
                            bundle.text("catalog.results_for", ""),
                            query.trim(),
                            hits.len(),
                            bundle.text("catalog.found_suffix", "")
                        )}
                    </span>
                    <button onclick={clear_query}>{bundle.text("catalog.new_search", "")}</button>
                </div>
                { if hits.is_empty() {
                    html! { <p class="empty">{bundle.text("catalog.none", "")}</p> }
                } else {
                    html! {
                        <div class="book-grid">
                            {for visible.iter().map(|book| book_card(book, &counts, &bundle, &open_detail))}
                        </div>
                    }
                } }
                <Paginator current={current} total={total} on_select={set_page} />
            </>
        }
    };

    html! {
        <section class="catalog">
            <SearchBox
                value={(*query).clone()}
                placeholder={bundle.text("search.placeholder", "")}
                on_input={set_query}
                suggestions={hint_list}
                on_pick={open_detail.clone()}
                empty_label={bundle.text("search.no_results", "")}
            />
            {body}
        </section>
    }
}

fn book_card(
    book: &Book,
    counts: &HashMap<i64, usize>,
    bundle: &TranslationBundle,
    open_detail: &Callback<i64>,
) -> Html {
    let book_id = book.id;
    let open = {
        let open_detail = open_detail.clone();
        Callback::from(move |_| open_detail.emit(book_id))
    };
    let available = counts.get(&book.id).copied().unwrap_or(0);
    html! {
        <article class="book-card" key={book.id}>
            { if let Some(url) = &book.thumbnail_url {
                html! { <img src={url.clone()} alt={book.titol.clone()} /> }
            } else {
                html! { <div class="cover placeholder"></div> }
            } }
            <h3>{book.titol.clone()}</h3>
            <p>
                {bundle.text("catalog.author", "")}{" "}
                {book.autor.clone().unwrap_or_else(|| bundle.text("catalog.author_missing", ""))}
            </p>
            { if let Some(editorial) = &book.editorial {
                html! { <p>{bundle.text("catalog.editorial", "")}{" "}{editorial.clone()}</p> }
            } else {
                html! {}
            } }
            { if let Some(isbn) = &book.isbn {
                html! { <p>{bundle.text("catalog.isbn", "")}{" "}{isbn.clone()}</p> }
            } else {
                html! {}
            } }
            <p>{bundle.text("catalog.available", "")}{" "}{available}</p>
            <button onclick={open}>{bundle.text("catalog.details", "")}</button>
        </article>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct DetailPageProps {
    pub book_id: i64,
}

#[function_component(DetailPage)]
pub(crate) fn detail_page(props: &DetailPageProps) -> Html {
    let api = use_context::<ApiCtx>().expect("api context");
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let (store, dispatch) = use_store::<AppStore>();
    let navigator = use_navigator();

    let book = use_state(|| None::<Book>);
    let holdings = use_state(Vec::<Exemplar>::new);
    let failed = use_state(|| false);

    {
        let api = api;
        let book = book.clone();
        let holdings = holdings.clone();
        let failed = failed.clone();
        use_effect_with_deps(
            move |book_id: &i64| {
                let book_id = *book_id;
                book.set(None);
                failed.set(false);
                let alive = Rc::new(Cell::new(true));
                {
                    let api = api.clone();
                    let alive = alive.clone();
                    yew::platform::spawn_local(async move {
                        match api.client.fetch_book(book_id).await {
                            Ok(record) if alive.get() => book.set(Some(record)),
                            Err(_) if alive.get() => failed.set(true),
                            _ => {}
                        }
                    });
                }
                {
                    let alive = alive.clone();
                    yew::platform::spawn_local(async move {
                        if let Ok(list) = api.client.fetch_book_exemplars(book_id).await {
                            if alive.get() {
                                holdings.set(list);
                            }
                        }
                    });
                }
                move || alive.set(false)
            },
            props.book_id,
        );
    }

    let back = {
        let dispatch = dispatch.clone();
        let navigator = navigator;
        Callback::from(move |_| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Home);
            }
            dispatch.reduce_mut(|store| store.navigate(NavIntent::Home));
        })
    };

    if *failed {
        return html! {
            <section class="detail">
                <button onclick={back}>{bundle.text("detail.back", "")}</button>
                <p class="error">{bundle.text("detail.error", "")}</p>
            </section>
        };
    }
    let Some(record) = (*book).clone() else {
        return html! { <p class="loading">{bundle.text("detail.loading", "")}</p> };
    };

    let lend = {
        let dispatch = dispatch;
        let book_id = props.book_id;
        Callback::from(move |_| {
            dispatch.reduce_mut(|store| store.navigate(NavIntent::CreateLoan { book_id }));
        })
    };
    let rows = branch_holdings(&holdings);

    html! {
        <section class="detail">
            <button onclick={back}>{bundle.text("detail.back", "")}</button>
            <h1>{bundle.text("detail.title", "")}</h1>
            <div class="record">
                { if let Some(url) = &record.thumbnail_url {
                    html! { <img src={url.clone()} alt={record.titol.clone()} /> }
                } else {
                    html! {}
                } }
                <h2>{record.titol.clone()}</h2>
                <dl>
                    <dt>{bundle.text("detail.id", "")}</dt>
                    <dd>{record.id}</dd>
                    <dt>{bundle.text("detail.author", "")}</dt>
                    <dd>{record.autor.clone().unwrap_or_else(|| bundle.text("detail.author_missing", ""))}</dd>
                    {field(&bundle, "detail.editorial", record.editorial.as_deref())}
                    {field(&bundle, "detail.isbn", record.isbn.as_deref())}
                    {field(&bundle, "detail.original_title", record.titol_original.as_deref())}
                    {field(&bundle, "detail.collection", record.colleccio.as_deref())}
                    {field(&bundle, "detail.edition_date", record.data_edicio.as_deref())}
                    {field(&bundle, "detail.pages", record.pagines.map(|p| p.to_string()).as_deref())}
                    {field(&bundle, "detail.language", record.llengua.as_ref().map(|l| l.nom.as_str()))}
                    {field(&bundle, "detail.country", record.pais.as_ref().map(|p| p.nom.as_str()))}
                    {field(&bundle, "detail.summary", record.resum.as_deref())}
                    {field(&bundle, "detail.notes", record.anotacions.as_deref())}
                </dl>
                { if let Some(url) = &record.info_url {
                    html! {
                        <a href={url.clone()} target="_blank" rel="noreferrer">
                            {bundle.text("detail.more_info", "")}
                        </a>
                    }
                } else {
                    html! {}
                } }
            </div>
            <h3>{bundle.text("detail.per_centre", "")}</h3>
            { if rows.is_empty() {
                html! { <p class="empty">{bundle.text("detail.no_centres", "")}</p> }
            } else {
                html! {
                    <table class="holdings">
                        <tbody>
                            {for rows.iter().map(|row| html! {
                                <tr key={row.centre.clone()}>
                                    <td>{row.centre.clone()}</td>
                                    <td>{bundle.text("detail.not_excluded", "")}{" "}{row.available}</td>
                                    <td>{bundle.text("detail.excluded", "")}{" "}{row.excluded}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            } }
            { if store.session.is_staff() {
                html! { <button class="primary" onclick={lend}>{bundle.text("detail.lend", "")}</button> }
            } else {
                html! {}
            } }
        </section>
    }
}

fn field(bundle: &TranslationBundle, key: &str, value: Option<&str>) -> Html {
    match value {
        Some(value) if !value.trim().is_empty() => html! {
            <>
                <dt>{bundle.text(key, "")}</dt>
                <dd>{value.to_string()}</dd>
            </>
        },
        _ => html! {},
    }
}
