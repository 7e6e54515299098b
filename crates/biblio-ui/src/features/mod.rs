//! Feature slices of the catalogue interface.
//!
//! Each slice keeps its DOM-free rules in `state` so they compile and test
//! natively; screens and HTTP wiring are browser-only.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod csv;
pub mod exemplars;
pub mod labels;
pub mod loans;
pub mod profile;
