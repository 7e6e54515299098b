#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Browser client for a school library catalogue: book search, loan
//! creation and history, profile editing, bulk CSV account import, and a
//! barcode label print workflow for physical copies.
//!
//! DOM-free logic (search, selection, label layout, session rules) lives in
//! [`core`] and the feature `state` modules so it compiles and tests
//! natively; rendering, storage, and HTTP sit behind `wasm32` gates.

pub mod core;
pub mod features;
pub mod i18n;

#[cfg(target_arch = "wasm32")]
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

#[cfg(test)]
mod tests {
    use crate::core::search::{SearchMode, parse_query};
    use crate::i18n::{LocaleCode, TranslationBundle};

    #[test]
    fn translation_fallbacks_work() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(
            bundle.text("labels.preview.download", "X"),
            "Descarregar PDF"
        );
        assert_eq!(bundle.text("nav.missing_key", "Default"), "Default");
    }

    #[test]
    fn catalan_is_the_authoritative_bundle() {
        let bundle = TranslationBundle::new(LocaleCode::Ca);
        assert_eq!(
            bundle.text("loans.form.incomplete", ""),
            "Si us plau, completa tots els camps"
        );
    }

    #[test]
    fn short_queries_leave_search_inactive() {
        assert_eq!(parse_query("ab"), SearchMode::Inactive);
    }
}
