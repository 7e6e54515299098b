//! Editable profile fields and their format checks.
//!
//! # Design
//! - Only email, phone, and avatar URL are editable; the rest of the
//!   profile is displayed read-only.
//! - Format checks are deliberately shallow. The backend is authoritative;
//!   these only catch obvious typos before a request is made.

use biblio_api_models::{Profile, ProfileUpdate};

/// Why a profile form was rejected locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileFormError {
    /// The phone field contains something other than digits.
    Phone,
    /// The email field does not look like an address.
    Email,
}

impl ProfileFormError {
    /// Translation key of the inline message shown for this rejection.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::Phone => "profile.phone_invalid",
            Self::Email => "profile.email_invalid",
        }
    }
}

/// Empty or digits only.
#[must_use]
pub fn phone_valid(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.chars().all(|c| c.is_ascii_digit())
}

/// Minimal address shape: something before an `@`, a dot after it.
#[must_use]
pub fn email_valid(value: &str) -> bool {
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

/// The three editable fields, kept as input strings.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ProfileForm {
    /// Contact email input value.
    pub email: String,
    /// Phone input value.
    pub telefon: String,
    /// Avatar URL input value.
    pub imatge: String,
}

impl ProfileForm {
    /// Seed the form from a fetched profile.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            email: profile.email.clone(),
            telefon: profile.telefon.clone().unwrap_or_default(),
            imatge: profile.imatge.clone().unwrap_or_default(),
        }
    }

    /// Validate the inputs and build the update payload.
    ///
    /// Empty phone and avatar fields are omitted from the payload rather
    /// than sent as empty strings.
    ///
    /// # Errors
    ///
    /// [`ProfileFormError::Email`] or [`ProfileFormError::Phone`] when the
    /// corresponding field fails its format check.
    pub fn to_update(&self, username: &str) -> Result<ProfileUpdate, ProfileFormError> {
        if !email_valid(&self.email) {
            return Err(ProfileFormError::Email);
        }
        if !phone_valid(&self.telefon) {
            return Err(ProfileFormError::Phone);
        }
        Ok(ProfileUpdate {
            username: username.to_string(),
            email: Some(self.email.trim().to_string()),
            telefon: non_empty(&self.telefon),
            imatge: non_empty(&self.imatge),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_digits_or_nothing() {
        assert!(phone_valid(""));
        assert!(phone_valid(" 937001122 "));
        assert!(!phone_valid("93 700 11 22"));
        assert!(!phone_valid("nou-tres-set"));
    }

    #[test]
    fn email_needs_an_at_and_a_dotted_domain() {
        assert!(email_valid("anna@escola.cat"));
        assert!(!email_valid("anna"));
        assert!(!email_valid("@escola.cat"));
        assert!(!email_valid("anna@escola"));
        assert!(!email_valid("anna@.cat"));
    }

    #[test]
    fn form_round_trips_a_profile() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "username": "anna@escola.cat",
            "nombre": "Anna",
            "email": "anna@escola.cat",
            "telefon": "937001122"
        }))
        .expect("profile fixture");
        let form = ProfileForm::from_profile(&profile);
        assert_eq!(form.email, "anna@escola.cat");
        assert_eq!(form.telefon, "937001122");
        assert!(form.imatge.is_empty());

        let update = form.to_update(&profile.username).expect("valid form");
        assert_eq!(update.email.as_deref(), Some("anna@escola.cat"));
        assert_eq!(update.telefon.as_deref(), Some("937001122"));
        assert!(update.imatge.is_none());
    }

    #[test]
    fn invalid_fields_block_the_update() {
        let form = ProfileForm {
            email: "anna@escola.cat".to_string(),
            telefon: "no és un número".to_string(),
            imatge: String::new(),
        };
        assert_eq!(form.to_update("anna"), Err(ProfileFormError::Phone));

        let form = ProfileForm {
            email: "anna".to_string(),
            ..ProfileForm::default()
        };
        assert_eq!(form.to_update("anna"), Err(ProfileFormError::Email));
    }
}
