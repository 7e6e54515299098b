//! Credential login and the external identity-provider flow.

pub mod state;

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
