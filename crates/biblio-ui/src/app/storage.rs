//! Persistence and environment helpers for the app shell.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use serde::Serialize;
use web_sys::Url;

use crate::core::session::{Role, Session};
use crate::core::theme::ThemeMode;
use crate::features::cart::state::CartState;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};

pub(crate) const TOKEN_KEY: &str = "biblio.token";
pub(crate) const ROLE_KEY: &str = "biblio.role";
pub(crate) const USERNAME_KEY: &str = "biblio.username";
pub(crate) const SELECTION_KEY: &str = "biblio.selection";
pub(crate) const THEME_KEY: &str = "biblio.theme";
pub(crate) const LOCALE_KEY: &str = "biblio.locale";

pub(crate) fn load_session() -> Session {
    let token = LocalStorage::get::<String>(TOKEN_KEY)
        .ok()
        .filter(|value| !value.trim().is_empty());
    if token.is_none() {
        return Session::default();
    }
    let role = LocalStorage::get::<String>(ROLE_KEY)
        .ok()
        .and_then(|value| Role::from_name(&value))
        .unwrap_or_default();
    let username = LocalStorage::get::<String>(USERNAME_KEY).ok();
    Session {
        token,
        role,
        username,
    }
}

pub(crate) fn persist_session(session: &Session) {
    match &session.token {
        Some(token) => set_storage(TOKEN_KEY, token),
        None => delete_storage(TOKEN_KEY),
    }
    set_storage(ROLE_KEY, session.role.as_str());
    match &session.username {
        Some(username) => set_storage(USERNAME_KEY, username),
        None => delete_storage(USERNAME_KEY),
    }
}

pub(crate) fn clear_session() {
    delete_storage(TOKEN_KEY);
    delete_storage(ROLE_KEY);
    delete_storage(USERNAME_KEY);
}

pub(crate) fn load_cart() -> CartState {
    LocalStorage::get::<CartState>(SELECTION_KEY).unwrap_or_default()
}

pub(crate) fn persist_cart(cart: &CartState) {
    if cart.is_empty() {
        delete_storage(SELECTION_KEY);
    } else {
        set_storage(SELECTION_KEY, cart);
    }
}

pub(crate) fn load_theme() -> ThemeMode {
    let stored = LocalStorage::get::<String>(THEME_KEY).ok();
    let prefers_dark = window()
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    ThemeMode::initial(stored.as_deref(), prefers_dark)
}

pub(crate) fn persist_theme(theme: ThemeMode) {
    set_storage(THEME_KEY, theme.as_str());
}

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = LocaleCode::from_lang_tag(&value) {
            return locale;
        }
    }
    if let Some(tag) = window().navigator().language() {
        if let Some(locale) = LocaleCode::from_lang_tag(&tag) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

pub(crate) fn persist_locale(locale: LocaleCode) {
    set_storage(LOCALE_KEY, locale.code());
}

/// Backend origin derived from the page location.
///
/// The dev server runs the frontend on port 8080 while the API listens on
/// 8000; served deployments share the origin.
pub(crate) fn api_base_url() -> String {
    let href = window()
        .location()
        .href()
        .unwrap_or_else(|_| "http://localhost:8080".to_string());

    if let Ok(url) = Url::new(&href) {
        let protocol = url.protocol();
        let host = url.hostname();
        let port = url.port();
        let mapped_port = match port.as_str() {
            "" => None,
            "8080" => Some("8000".to_string()),
            other => Some(other.to_string()),
        };

        let mut base = format!("{protocol}//{host}");
        if let Some(port) = mapped_port {
            base.push(':');
            base.push_str(&port);
        }
        return base;
    }

    "http://localhost:8000".to_string()
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn delete_storage(key: &'static str) {
    LocalStorage::delete(key);
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
