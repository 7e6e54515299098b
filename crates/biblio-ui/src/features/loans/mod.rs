//! Loan creation form and per-user loan history.

pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
