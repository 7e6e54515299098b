//! Label selection kept across screens and browser sessions.

pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
