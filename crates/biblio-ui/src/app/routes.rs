//! Deep-linkable routes of the catalogue shell.
//!
//! Only the catalogue record pages are addressable; everything else is
//! screen state kept in the store.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/llibres/:id")]
    Llibre { id: i64 },
    #[not_found]
    #[at("/404")]
    NotFound,
}
