//! Core, DOM-free primitives and helpers for the catalogue UI.
pub mod gateway;
pub mod labels;
pub mod screen;
pub mod search;
pub mod session;
pub mod store;
pub mod theme;
