//! Session identity and role rules for the view shell.
//!
//! # Design
//! - Roles are a closed set derived once from backend group names.
//! - One value carries the whole session so login and logout replace it
//!   atomically instead of mutating fields one by one.

use biblio_api_models::LoginResponse;

/// Access level derived from backend group membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Role {
    /// Platform administrator, managed in an external console.
    Admin,
    /// Library staff with circulation, import, and label rights.
    Bibliotecari,
    /// Regular account with catalogue and own-loan access.
    Usuari,
    /// Signed out, or signed in without a recognised group.
    #[default]
    Guest,
}

impl Role {
    /// Stable name used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Bibliotecari => "bibliotecari",
            Self::Usuari => "usuari",
            Self::Guest => "guest",
        }
    }

    /// Parse a stored role name.
    #[must_use]
    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "bibliotecari" => Some(Self::Bibliotecari),
            "usuari" => Some(Self::Usuari),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }
}

/// Authenticated identity restored from storage or produced by login.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Session {
    /// Bearer token for catalogue calls; `None` while browsing anonymously.
    pub token: Option<String>,
    /// Access level fixed at login time.
    pub role: Role,
    /// Account username used for profile and loan lookups.
    pub username: Option<String>,
}

impl Session {
    /// Whether a token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Whether circulation and import screens are available.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self.role, Role::Bibliotecari)
    }
}

/// Map backend group names onto the canonical role set.
///
/// The backend has used both the Spanish and the Catalan spelling for the
/// librarian group, so both are recognised. Accounts without a recognised
/// group stay [`Role::Guest`] even when authenticated.
#[must_use]
pub fn role_from_groups(groups: &[String]) -> Role {
    if groups.iter().any(|group| group == "Admin") {
        Role::Admin
    } else if groups
        .iter()
        .any(|group| group == "Bibliotecario" || group == "Bibliotecari")
    {
        Role::Bibliotecari
    } else if groups.iter().any(|group| group == "usuari") {
        Role::Usuari
    } else {
        Role::Guest
    }
}

/// Build a session from a credential login verdict.
///
/// Returns `None` when the account does not exist or no token was issued.
#[must_use]
pub fn session_from_login(username: &str, response: &LoginResponse) -> Option<Session> {
    if !response.exists {
        return None;
    }
    let token = response.token.clone()?;
    Some(Session {
        token: Some(token),
        role: role_from_groups(&response.grupos),
        username: Some(username.to_string()),
    })
}

/// Admin console location for the administrative redirect.
#[must_use]
pub fn admin_console_url(base: &str) -> String {
    format!("{}/admin", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn admin_group_wins_over_everything() {
        let role = role_from_groups(&groups(&["usuari", "Admin", "Bibliotecario"]));
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn both_librarian_spellings_map_to_one_role() {
        assert_eq!(
            role_from_groups(&groups(&["Bibliotecario"])),
            Role::Bibliotecari
        );
        assert_eq!(
            role_from_groups(&groups(&["Bibliotecari"])),
            Role::Bibliotecari
        );
    }

    #[test]
    fn unknown_groups_stay_guest() {
        assert_eq!(role_from_groups(&groups(&["Alumnat"])), Role::Guest);
        assert_eq!(role_from_groups(&[]), Role::Guest);
    }

    #[test]
    fn login_verdict_builds_a_full_session() {
        let response = LoginResponse {
            exists: true,
            grupos: groups(&["usuari"]),
            token: Some("tok-1".to_string()),
        };
        let session = session_from_login("anna@escola.cat", &response).expect("session");
        assert!(session.is_authenticated());
        assert!(!session.is_staff());
        assert_eq!(session.role, Role::Usuari);
        assert_eq!(session.username.as_deref(), Some("anna@escola.cat"));
    }

    #[test]
    fn missing_account_or_token_yields_no_session() {
        let absent = LoginResponse {
            exists: false,
            grupos: vec![],
            token: None,
        };
        assert!(session_from_login("x", &absent).is_none());

        let tokenless = LoginResponse {
            exists: true,
            grupos: groups(&["usuari"]),
            token: None,
        };
        assert!(session_from_login("x", &tokenless).is_none());
    }

    #[test]
    fn role_names_round_trip() {
        for role in [Role::Admin, Role::Bibliotecari, Role::Usuari, Role::Guest] {
            assert_eq!(Role::from_name(role.as_str()), Some(role));
        }
        assert!(Role::from_name("root").is_none());
    }

    #[test]
    fn admin_console_url_normalises_slashes() {
        assert_eq!(
            admin_console_url("http://127.0.0.1:8000/"),
            "http://127.0.0.1:8000/admin"
        );
    }
}
