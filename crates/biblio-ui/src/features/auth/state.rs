//! Login form state and client-side credential inspection.
//!
//! # Design
//! - The identity-provider credential is an opaque JWT. Its payload is
//!   decoded here for display only; the backend receives the untouched
//!   credential and performs the authoritative verification.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Username and password as typed into the login form.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CredentialForm {
    /// Account username input value.
    pub username: String,
    /// Password input value.
    pub password: String,
}

impl CredentialForm {
    /// Whether both fields carry something submittable.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}

/// Display-only claims pulled out of an identity-provider credential.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
pub struct CredentialClaims {
    /// Account email, doubles as the backend username.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name for the greeting.
    #[serde(default)]
    pub name: Option<String>,
}

impl CredentialClaims {
    /// Name to greet the visitor with: the display name, else the email.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.email.as_deref())
    }
}

/// Decode the payload segment of a JWT credential, without verifying it.
///
/// Returns `None` when the credential is not three dot-separated segments
/// or the payload is not base64url JSON.
#[must_use]
pub fn decode_credential(credential: &str) -> Option<CredentialClaims> {
    let mut segments = credential.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
        _ => return None,
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.signatura-falsa")
    }

    #[test]
    fn form_needs_both_fields() {
        let mut form = CredentialForm::default();
        assert!(!form.is_complete());
        form.username = "anna@escola.cat".to_string();
        form.password = "   ".to_string();
        assert!(!form.is_complete());
        form.password = "secreta".to_string();
        assert!(form.is_complete());
    }

    #[test]
    fn payload_claims_are_decoded_for_display() {
        let token = credential(&serde_json::json!({
            "email": "anna@escola.cat",
            "name": "Anna Puig",
            "aud": "biblio"
        }));
        let claims = decode_credential(&token).expect("claims");
        assert_eq!(claims.display_name(), Some("Anna Puig"));
        assert_eq!(claims.email.as_deref(), Some("anna@escola.cat"));
    }

    #[test]
    fn email_backs_a_missing_display_name() {
        let token = credential(&serde_json::json!({"email": "anna@escola.cat"}));
        let claims = decode_credential(&token).expect("claims");
        assert_eq!(claims.display_name(), Some("anna@escola.cat"));
    }

    #[test]
    fn malformed_credentials_decode_to_nothing() {
        assert!(decode_credential("no-segments").is_none());
        assert!(decode_credential("a.b").is_none());
        assert!(decode_credential("a.%%%.c").is_none());
        assert!(decode_credential("a.b.c.d").is_none());
    }
}
