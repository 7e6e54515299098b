//! Shared application state behind a yewdux store.
//!
//! # Design
//! - One store holds the three things every screen may consult: the
//!   session, the active screen, and the label selection.
//! - Mutations go through the named methods below so login, logout, and
//!   navigation each have exactly one entry point. Views call them inside
//!   `reduce_mut` and never poke fields directly.

use yewdux::prelude::Store;

use crate::core::screen::{self, NavIntent, Screen};
use crate::core::session::Session;
use crate::features::cart::state::CartState;

/// Root application state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct AppStore {
    /// Identity of the signed-in account, if any.
    pub session: Session,
    /// Screen currently shown by the shell.
    pub screen: Screen,
    /// Exemplars picked for label printing.
    pub cart: CartState,
}

impl AppStore {
    /// Install a fresh session and land on the catalogue.
    pub fn login(&mut self, session: Session) {
        self.session = session;
        self.screen = Screen::Catalog;
    }

    /// Drop the session and the selection in one step and show the login
    /// form. Persistent storage is cleared by the caller alongside this.
    pub fn logout(&mut self) {
        self.session = Session::default();
        self.cart = CartState::default();
        self.screen = Screen::Login;
    }

    /// Re-install state loaded from storage at startup.
    pub fn restore(&mut self, session: Session, cart: CartState) {
        self.session = session;
        self.cart = cart;
    }

    /// Move to the screen a navigation request resolves to under the
    /// current session.
    pub fn navigate(&mut self, intent: NavIntent) {
        self.screen = screen::resolve(&self.session, intent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::Role;

    fn staff_session() -> Session {
        Session {
            token: Some("tok".to_string()),
            role: Role::Bibliotecari,
            username: Some("merce".to_string()),
        }
    }

    #[test]
    fn login_lands_on_the_catalogue() {
        let mut store = AppStore::default();
        store.navigate(NavIntent::Login);
        assert_eq!(store.screen, Screen::Login);

        store.login(staff_session());
        assert_eq!(store.screen, Screen::Catalog);
        assert!(store.session.is_staff());
    }

    #[test]
    fn logout_wipes_session_and_selection_together() {
        let mut store = AppStore::default();
        store.login(staff_session());
        store.navigate(NavIntent::Exemplars);
        assert_eq!(store.screen, Screen::Exemplars);

        store.logout();
        assert_eq!(store.session, Session::default());
        assert_eq!(store.cart, CartState::default());
        assert_eq!(store.screen, Screen::Login);
    }

    #[test]
    fn navigation_respects_role_gates() {
        let mut store = AppStore::default();
        store.navigate(NavIntent::Cart);
        assert_eq!(store.screen, Screen::Login);

        store.login(staff_session());
        store.navigate(NavIntent::Cart);
        assert_eq!(store.screen, Screen::Cart);
    }
}
