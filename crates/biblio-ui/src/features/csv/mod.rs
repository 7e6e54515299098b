//! Bulk account import from a CSV file.

pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
