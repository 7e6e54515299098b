//! Catalogue browsing: book list, suggestions, and the detail record.

pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
