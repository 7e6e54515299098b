//! Label batch assembly, sheet preview, and PDF export.

pub mod pdf;
pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
