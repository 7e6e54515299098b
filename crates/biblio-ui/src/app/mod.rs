//! Application shell: boot, persistence effects, routing, and the screen
//! switch.
//!
//! # Design
//! - The store's [`Screen`] is authoritative for what the shell shows; the
//!   router only exists so catalogue records stay deep-linkable.
//! - Session, selection, theme, and locale each have one persistence
//!   effect, so storage can never drift from the store.

use std::rc::Rc;

use gloo::utils::window;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector, use_store};

use crate::components::navbar::Navbar;
use crate::components::sidebar::Sidebar;
use crate::components::toast::{Toast, ToastHost, ToastKind, Toaster};
use crate::core::screen::{NavIntent, Screen};
use crate::core::session::{Role, Session, admin_console_url};
use crate::core::store::AppStore;
use crate::core::theme::ThemeMode;
use crate::features::auth::view::LoginPage;
use crate::features::cart::view::CartPage;
use crate::features::catalog::view::{CatalogPage, DetailPage};
use crate::features::csv::view::CsvUploadPage;
use crate::features::exemplars::view::ExemplarsPage;
use crate::features::labels::view::PrintPreviewPage;
use crate::features::loans::view::{LoanCreatePage, LoansPage};
use crate::features::profile::view::ProfilePage;
use crate::i18n::{LocaleCode, TranslationBundle};

mod api;
mod routes;
mod storage;

pub(crate) use api::ApiCtx;
pub(crate) use routes::Route;

#[function_component(BiblioApp)]
fn biblio_app() -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let api_ctx = use_memo(|_| ApiCtx::new(storage::api_base_url()), ());
    let theme = use_state(storage::load_theme);
    let locale = use_state(storage::load_locale);
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };
    let toasts = use_state(Vec::<Toast>::new);
    let toast_id = use_state(|| 0u64);

    let session = use_selector(|store: &AppStore| store.session.clone());
    let cart = use_selector(|store: &AppStore| store.cart.clone());

    // Boot: restore the stored session and selection, then let the store
    // take over. Administrators are handed off to the backend console.
    {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |_| {
                let session = storage::load_session();
                let cart = storage::load_cart();
                api_ctx.client.set_token(session.token.clone());
                if session.role == Role::Admin {
                    redirect_to_admin_console();
                } else {
                    dispatch.reduce_mut(|store| store.restore(session, cart));
                }
                || ()
            },
            (),
        );
    }
    {
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |session: &Rc<Session>| {
                api_ctx.client.set_token(session.token.clone());
                || ()
            },
            session,
        );
    }
    {
        use_effect_with_deps(
            move |cart: &Rc<crate::features::cart::state::CartState>| {
                storage::persist_cart(cart);
                || ()
            },
            cart,
        );
    }
    {
        let theme = *theme;
        use_effect_with_deps(
            move |_| {
                apply_theme(theme);
                storage::persist_theme(theme);
                || ()
            },
            theme,
        );
    }
    {
        let locale = *locale;
        use_effect_with_deps(
            move |_| {
                storage::persist_locale(locale);
                || ()
            },
            locale,
        );
    }

    let toaster = {
        let toasts = toasts.clone();
        let toast_id = toast_id.clone();
        Toaster(Callback::from(move |(kind, message): (ToastKind, String)| {
            push_toast(&toasts, &toast_id, kind, message);
        }))
    };
    let dismiss_toast = {
        let toasts = toasts.clone();
        Callback::from(move |id: u64| {
            toasts.set(
                (*toasts)
                    .iter()
                    .cloned()
                    .filter(|toast| toast.id != id)
                    .collect(),
            );
        })
    };

    let on_login = {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        Callback::from(move |session: Session| {
            storage::persist_session(&session);
            api_ctx.client.set_token(session.token.clone());
            if session.role == Role::Admin {
                redirect_to_admin_console();
                return;
            }
            dispatch.reduce_mut(|store| store.login(session));
        })
    };
    let on_logout = {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        Callback::from(move |()| {
            storage::clear_session();
            api_ctx.client.set_token(None);
            dispatch.reduce_mut(AppStore::logout);
        })
    };

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |()| theme.set(theme.toggled()))
    };
    let set_locale = {
        let locale = locale.clone();
        Callback::from(move |next: LocaleCode| locale.set(next))
    };

    let shell = {
        let theme = *theme;
        let locale = *locale;
        move |route: Route| {
            let deep_link = match route {
                Route::Llibre { id } => Some(id),
                Route::Home | Route::NotFound => None,
            };
            html! {
                <MainShell
                    {deep_link}
                    {theme}
                    on_toggle_theme={toggle_theme.clone()}
                    {locale}
                    on_locale={set_locale.clone()}
                    on_login={on_login.clone()}
                    on_logout={on_logout.clone()}
                />
            }
        }
    };

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <ContextProvider<Toaster> context={toaster}>
                    <BrowserRouter>
                        <Switch<Route> render={shell} />
                    </BrowserRouter>
                    <ToastHost toasts={(*toasts).clone()} on_dismiss={dismiss_toast} />
                </ContextProvider<Toaster>>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<ApiCtx>>
    }
}

#[derive(Properties, PartialEq)]
struct MainShellProps {
    deep_link: Option<i64>,
    theme: ThemeMode,
    on_toggle_theme: Callback<()>,
    locale: LocaleCode,
    on_locale: Callback<LocaleCode>,
    on_login: Callback<Session>,
    on_logout: Callback<()>,
}

#[function_component(MainShell)]
fn main_shell(props: &MainShellProps) -> Html {
    let (store, dispatch) = use_store::<AppStore>();

    // A deep link overrides the stored screen once per navigation.
    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |deep_link: &Option<i64>| {
                if let Some(book_id) = *deep_link {
                    dispatch.reduce_mut(|store| store.navigate(NavIntent::OpenDetail { book_id }));
                }
                || ()
            },
            props.deep_link,
        );
    }

    let screen = store.screen.clone();
    html! {
        <div class="shell">
            <Navbar
                theme={props.theme}
                on_toggle_theme={props.on_toggle_theme.clone()}
                locale={props.locale}
                on_locale={props.on_locale.clone()}
                on_logout={props.on_logout.clone()}
            />
            <div class="layout">
                <Sidebar />
                <main class="content">
                    { match screen {
                        Screen::Catalog => html! { <CatalogPage /> },
                        Screen::Login => html! { <LoginPage on_login={props.on_login.clone()} /> },
                        Screen::Detail { book_id } => html! { <DetailPage {book_id} /> },
                        Screen::LoanCreate { book_id } => html! { <LoanCreatePage {book_id} /> },
                        Screen::Loans => html! { <LoansPage /> },
                        Screen::Profile => html! { <ProfilePage /> },
                        Screen::CsvUpload => html! { <CsvUploadPage /> },
                        Screen::Exemplars => html! { <ExemplarsPage /> },
                        Screen::Cart => html! { <CartPage /> },
                        Screen::PrintPreview => html! { <PrintPreviewPage /> },
                    } }
                </main>
            </div>
        </div>
    }
}

fn push_toast(
    toasts: &UseStateHandle<Vec<Toast>>,
    next_id: &UseStateHandle<u64>,
    kind: ToastKind,
    message: String,
) {
    let id = **next_id + 1;
    next_id.set(id);
    let mut list = (**toasts).clone();
    list.push(Toast { id, kind, message });
    if list.len() > 4 {
        let drain = list.len() - 4;
        list.drain(0..drain);
    }
    toasts.set(list);
}

fn apply_theme(theme: ThemeMode) {
    if let Some(body) = window().document().and_then(|document| document.body()) {
        let _ = body.set_attribute("data-theme", theme.as_str());
    }
}

fn redirect_to_admin_console() {
    let _ = window()
        .location()
        .set_href(&admin_console_url(&storage::api_base_url()));
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<BiblioApp>::with_root(root).render();
    } else {
        yew::Renderer::<BiblioApp>::new().render();
    }
}
