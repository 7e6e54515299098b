//! Exemplar search and selection for label printing.

pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
