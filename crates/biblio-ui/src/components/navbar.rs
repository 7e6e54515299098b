//! Top navigation bar: brand, session links, theme and locale switches.

use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::core::screen::NavIntent;
use crate::core::store::AppStore;
use crate::core::theme::ThemeMode;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};

#[derive(Properties, PartialEq)]
pub(crate) struct NavbarProps {
    pub theme: ThemeMode,
    pub on_toggle_theme: Callback<()>,
    pub locale: LocaleCode,
    pub on_locale: Callback<LocaleCode>,
    pub on_logout: Callback<()>,
}

#[function_component(Navbar)]
pub(crate) fn navbar(props: &NavbarProps) -> Html {
    let (store, dispatch) = use_store::<AppStore>();
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");

    let nav = |intent: NavIntent| {
        let dispatch = dispatch.clone();
        Callback::from(move |_| dispatch.reduce_mut(|store| store.navigate(intent)))
    };
    let toggle_theme = {
        let on_toggle_theme = props.on_toggle_theme.clone();
        Callback::from(move |_| on_toggle_theme.emit(()))
    };
    let logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };
    let pick_locale = {
        let on_locale = props.on_locale.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
            {
                if let Some(locale) = LocaleCode::from_lang_tag(&select.value()) {
                    on_locale.emit(locale);
                }
            }
        })
    };

    let session = &store.session;
    html! {
        <header class="navbar">
            <button class="brand" onclick={nav(NavIntent::Home)}>
                {t("nav.brand")}
            </button>
            <nav class="links">
                { if session.is_authenticated() {
                    html! {
                        <>
                            <span class="greeting">
                                {format!(
                                    "{} {}",
                                    t("nav.greeting"),
                                    session.username.clone().unwrap_or_default()
                                )}
                            </span>
                            <button onclick={nav(NavIntent::Loans)}>{t("nav.my_loans")}</button>
                            <button onclick={nav(NavIntent::Profile)}>{t("nav.profile")}</button>
                            <button onclick={logout}>{t("nav.logout")}</button>
                        </>
                    }
                } else {
                    html! {
                        <button onclick={nav(NavIntent::Login)}>{t("nav.login")}</button>
                    }
                } }
            </nav>
            <div class="controls">
                <button
                    class="theme-toggle"
                    title={t("nav.theme")}
                    onclick={toggle_theme}
                >
                    { if props.theme == ThemeMode::Light { "🌙" } else { "☀" } }
                </button>
                <select value={props.locale.code().to_string()} onchange={pick_locale}>
                    {for LocaleCode::all().iter().map(|locale| html! {
                        <option
                            value={locale.code()}
                            selected={*locale == props.locale}
                        >
                            {locale.label()}
                        </option>
                    })}
                </select>
            </div>
        </header>
    }
}
