//! Shared view components: chrome, pagination, search input, toasts.

pub(crate) mod navbar;
pub(crate) mod paginator;
pub(crate) mod search_box;
pub(crate) mod sidebar;
pub(crate) mod toast;
