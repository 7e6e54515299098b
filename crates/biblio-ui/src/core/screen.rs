//! Screen set and navigation rules for the single page shell.
//!
//! # Design
//! - Every screen the shell can show is a variant here, so rendering is an
//!   exhaustive match instead of string comparisons.
//! - [`resolve`] is the only place navigation requests meet role gating.
//!   Views emit a [`NavIntent`] and never pick a privileged screen directly.

use crate::core::session::Session;

/// Screen currently occupying the shell.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    /// Public catalogue list with the search bar.
    #[default]
    Catalog,
    /// Credential and identity provider login form.
    Login,
    /// Full record for one catalogue entry.
    Detail {
        /// Catalogue identifier of the shown book.
        book_id: i64,
    },
    /// Loan creation form for one catalogue entry.
    LoanCreate {
        /// Catalogue identifier the loan is drawn from.
        book_id: i64,
    },
    /// Loan history of the signed-in account.
    Loans,
    /// Profile viewer and editor.
    Profile,
    /// CSV import of user accounts.
    CsvUpload,
    /// Exemplar search with the selection cart.
    Exemplars,
    /// Review of the current selection.
    Cart,
    /// Label sheet preview and PDF export.
    PrintPreview,
}

/// Navigation request raised by a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIntent {
    /// Go to the catalogue list.
    Home,
    /// Open the login form.
    Login,
    /// Open one catalogue record.
    OpenDetail {
        /// Catalogue identifier to show.
        book_id: i64,
    },
    /// Start a loan for one catalogue record.
    CreateLoan {
        /// Catalogue identifier to lend from.
        book_id: i64,
    },
    /// Open the loan history.
    Loans,
    /// Open the profile editor.
    Profile,
    /// Open the CSV import.
    CsvUpload,
    /// Open the exemplar search.
    Exemplars,
    /// Open the selection cart.
    Cart,
    /// Open the label sheet preview.
    PrintPreview,
}

/// Decide which screen a navigation request lands on.
///
/// The catalogue and record details stay open to anonymous visitors. Loan
/// history and the profile need a session. Circulation and import screens
/// need staff rights; a signed-in non-staff request falls back to the
/// catalogue while an anonymous one lands on the login form.
#[must_use]
pub fn resolve(session: &Session, intent: NavIntent) -> Screen {
    match intent {
        NavIntent::Home => Screen::Catalog,
        NavIntent::Login => {
            if session.is_authenticated() {
                Screen::Catalog
            } else {
                Screen::Login
            }
        }
        NavIntent::OpenDetail { book_id } => Screen::Detail { book_id },
        NavIntent::Loans => gate_authenticated(session, Screen::Loans),
        NavIntent::Profile => gate_authenticated(session, Screen::Profile),
        NavIntent::CreateLoan { book_id } => gate_staff(session, Screen::LoanCreate { book_id }),
        NavIntent::CsvUpload => gate_staff(session, Screen::CsvUpload),
        NavIntent::Exemplars => gate_staff(session, Screen::Exemplars),
        NavIntent::Cart => gate_staff(session, Screen::Cart),
        NavIntent::PrintPreview => gate_staff(session, Screen::PrintPreview),
    }
}

fn gate_authenticated(session: &Session, target: Screen) -> Screen {
    if session.is_authenticated() {
        target
    } else {
        Screen::Login
    }
}

fn gate_staff(session: &Session, target: Screen) -> Screen {
    if !session.is_authenticated() {
        Screen::Login
    } else if session.is_staff() {
        target
    } else {
        Screen::Catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::Role;

    fn session(role: Role) -> Session {
        Session {
            token: Some("tok".to_string()),
            role,
            username: Some("u".to_string()),
        }
    }

    #[test]
    fn anonymous_visitors_browse_but_do_not_circulate() {
        let guest = Session::default();
        assert_eq!(resolve(&guest, NavIntent::Home), Screen::Catalog);
        assert_eq!(
            resolve(&guest, NavIntent::OpenDetail { book_id: 7 }),
            Screen::Detail { book_id: 7 }
        );
        assert_eq!(resolve(&guest, NavIntent::Loans), Screen::Login);
        assert_eq!(resolve(&guest, NavIntent::Exemplars), Screen::Login);
        assert_eq!(
            resolve(&guest, NavIntent::CreateLoan { book_id: 7 }),
            Screen::Login
        );
    }

    #[test]
    fn login_is_unreachable_once_signed_in() {
        assert_eq!(
            resolve(&session(Role::Usuari), NavIntent::Login),
            Screen::Catalog
        );
    }

    #[test]
    fn staff_screens_open_for_librarians() {
        let staff = session(Role::Bibliotecari);
        assert_eq!(resolve(&staff, NavIntent::CsvUpload), Screen::CsvUpload);
        assert_eq!(resolve(&staff, NavIntent::Exemplars), Screen::Exemplars);
        assert_eq!(resolve(&staff, NavIntent::Cart), Screen::Cart);
        assert_eq!(
            resolve(&staff, NavIntent::PrintPreview),
            Screen::PrintPreview
        );
        assert_eq!(
            resolve(&staff, NavIntent::CreateLoan { book_id: 3 }),
            Screen::LoanCreate { book_id: 3 }
        );
    }

    #[test]
    fn regular_accounts_fall_back_to_the_catalogue() {
        let user = session(Role::Usuari);
        assert_eq!(resolve(&user, NavIntent::CsvUpload), Screen::Catalog);
        assert_eq!(resolve(&user, NavIntent::Cart), Screen::Catalog);
        assert_eq!(resolve(&user, NavIntent::Loans), Screen::Loans);
        assert_eq!(resolve(&user, NavIntent::Profile), Screen::Profile);
    }
}
