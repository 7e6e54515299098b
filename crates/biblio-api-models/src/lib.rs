#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the school library catalogue API.
//!
//! These types mirror the JSON contract served by the catalogue backend so
//! the browser client decodes every endpoint through a single set of shapes.
//! Field names follow the wire (Catalan, as served); the few renames are
//! explicit via serde attributes.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Branch (centre) owning an exemplar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CentreRef {
    /// Branch identifier.
    pub id: i64,
    /// Branch display name.
    pub nom: String,
}

/// Minimal reference carrying only a display name.
///
/// Used for language and country lookups embedded in catalogue records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedRef {
    /// Display name.
    pub nom: String,
}

/// Catalogue record returned by the book list and detail endpoints.
///
/// The list endpoint serves a compact subset; the detail endpoint may add
/// edition metadata. Every field beyond `id` and `titol` is optional so one
/// shape decodes both, as well as the catalogue reference embedded in
/// [`Exemplar`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Book {
    /// Catalogue identifier.
    #[serde(default)]
    pub id: i64,
    /// Title as catalogued.
    #[serde(default)]
    pub titol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Author display name when catalogued.
    pub autor: Option<String>,
    #[serde(rename = "ISBN", default, skip_serializing_if = "Option::is_none")]
    /// ISBN code when catalogued.
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Publisher display name.
    pub editorial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Cover thumbnail URL when the record was enriched.
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Original title for translated works.
    pub titol_original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Collection the volume belongs to.
    pub colleccio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Edition date as catalogued (free-form).
    pub data_edicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Page count.
    pub pagines: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Synopsis text.
    pub resum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Cataloguer annotations.
    pub anotacions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// External information URL.
    pub info_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Language of the work.
    pub llengua: Option<NamedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Country of publication.
    pub pais: Option<NamedRef>,
}

/// Physical copy of a catalogue record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exemplar {
    /// Exemplar identifier.
    pub id: i64,
    /// Registry code printed on the spine label.
    pub registre: String,
    /// Whether the copy is excluded from lending.
    pub exclos_prestec: bool,
    /// Whether the copy has been withdrawn from the collection.
    pub baixa: bool,
    /// Owning catalogue record.
    pub cataleg: Book,
    /// Material type label (book, DVD, ...).
    pub tipus: String,
    /// Branch holding the copy.
    pub centre: CentreRef,
}

impl Exemplar {
    /// Whether the copy can currently be lent out.
    #[must_use]
    pub const fn is_lendable(&self) -> bool {
        !self.exclos_prestec && !self.baixa
    }
}

/// Credentials submitted to the session endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account username (the email for imported accounts).
    pub username: String,
    /// Plain password, sent over TLS only.
    pub password: String,
}

/// Session verdict returned after a credential or identity-provider login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Whether the account exists and the credentials matched.
    pub exists: bool,
    #[serde(default)]
    /// Names of the groups the account belongs to.
    pub grupos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Bearer token when authentication succeeded.
    pub token: Option<String>,
}

/// Payload requesting a profile by username.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileRequest {
    /// Account username to look up.
    pub username: String,
}

/// Account profile served to the profile screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Profile {
    /// Account username.
    pub username: String,
    #[serde(default)]
    /// Given name.
    pub nombre: String,
    #[serde(default)]
    /// Contact email.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Branch the account is attached to.
    pub centre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// School group label.
    pub grup: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Avatar image URL.
    pub imatge: Option<String>,
    #[serde(default)]
    /// Names of the groups the account belongs to.
    pub grupos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Contact phone number.
    pub telefon: Option<String>,
}

/// Editable profile fields, used both to probe for changes and to persist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Account username the update applies to.
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// New avatar image URL.
    pub imatge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// New contact email.
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// New contact phone number.
    pub telefon: Option<String>,
}

/// Verdict of the change probe performed before saving a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileCheck {
    /// Whether any submitted field differs from the stored profile.
    pub modified: bool,
}

/// Acknowledgement for a persisted profile update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileSaved {
    /// Whether the update was stored.
    pub success: bool,
}

/// Outcome report for a bulk CSV account upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadReport {
    /// Human-readable summary from the server.
    pub mensaje: String,
    #[serde(default)]
    /// Rows that were rejected, with the offending data echoed back.
    pub errores: Vec<UploadRowError>,
    #[serde(default)]
    /// Number of accounts created by this upload.
    pub usuarios_creados: u32,
}

/// A rejected CSV row together with the reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadRowError {
    #[serde(default)]
    /// Cleaned row data as parsed from the CSV.
    pub fila: UploadRow,
    /// Why the row was rejected.
    pub error: String,
}

/// CSV columns echoed back in upload error reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UploadRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Given name column.
    pub nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// First surname column.
    pub cognom1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Second surname column.
    pub cognom2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Email column, used as the account username.
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Phone column.
    pub telefon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Branch column.
    pub centre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Group column.
    pub grup: Option<String>,
}

/// Payload requesting the loan history of one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoansRequest {
    /// Account username whose loans are listed.
    pub username: String,
}

/// Loan row in a per-user loan history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Loan {
    /// Loan identifier.
    pub id: i64,
    /// Date the exemplar left the library.
    pub data_prestec: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Agreed return date; absent while the loan is open-ended.
    pub data_retorn: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Librarian annotations attached to the loan.
    pub anotacions: Option<String>,
    /// Title of the exemplar out on loan.
    pub exemplar_titol: String,
}

impl Loan {
    /// Whether the loan has no agreed return date yet.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.data_retorn.is_none()
    }
}

/// Free-text borrower search payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserQuery {
    /// Name or email fragment to match.
    pub query: String,
}

/// Borrower candidate returned by the user search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserHit {
    /// Account identifier.
    pub id: i64,
    #[serde(default)]
    /// Given name.
    pub first_name: String,
    #[serde(default)]
    /// Surname(s).
    pub last_name: String,
    #[serde(default)]
    /// Contact email.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Contact phone number.
    pub telefon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Branch the account is attached to.
    pub centre: Option<String>,
}

/// Payload registering a new loan against an exemplar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoanCreateRequest {
    /// Borrower account identifier.
    pub usuari: i64,
    /// Exemplar identifier to lend.
    pub exemplar: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Loan start date; the server defaults to today when omitted.
    pub data_prestec: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Agreed return date.
    pub data_retorn: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Free-form annotations.
    pub anotacions: Option<String>,
}

/// Acknowledgement for a created loan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoanCreated {
    /// Confirmation message from the server.
    pub message: String,
    /// Identifier of the created loan.
    pub id: i64,
}

/// Classification lookup result keyed by registry code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CduResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// CDU classification code, absent when the record carries none.
    pub cdu: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_tolerates_missing_token() {
        let raw = r#"{"exists": true, "grupos": ["Bibliotecario"]}"#;
        let parsed: LoginResponse = serde_json::from_str(raw).expect("login json");
        assert!(parsed.exists);
        assert_eq!(parsed.grupos, vec!["Bibliotecario".to_string()]);
        assert!(parsed.token.is_none());
    }

    #[test]
    fn exemplar_decodes_compact_and_full_catalogue_refs() {
        let compact = r#"{
            "id": 7,
            "registre": "REG-0001-0007",
            "exclos_prestec": false,
            "baixa": false,
            "cataleg": {"id": 3, "titol": "Mecanoscrit del segon origen"},
            "tipus": "Llibre",
            "centre": {"id": 1, "nom": "Central"}
        }"#;
        let parsed: Exemplar = serde_json::from_str(compact).expect("compact exemplar");
        assert_eq!(parsed.cataleg.titol, "Mecanoscrit del segon origen");
        assert!(parsed.cataleg.isbn.is_none());
        assert!(parsed.is_lendable());

        let full = r#"{
            "id": 8,
            "registre": "REG-0001-0008",
            "exclos_prestec": true,
            "baixa": false,
            "cataleg": {
                "id": 3,
                "titol": "Mecanoscrit del segon origen",
                "autor": "Pedrolo, Manuel de",
                "ISBN": "978-84-123456-0-1",
                "editorial": "Edicions 62",
                "thumbnail_url": null
            },
            "tipus": "Llibre",
            "centre": {"id": 2, "nom": "Annex"}
        }"#;
        let parsed: Exemplar = serde_json::from_str(full).expect("full exemplar");
        assert_eq!(parsed.cataleg.isbn.as_deref(), Some("978-84-123456-0-1"));
        assert!(!parsed.is_lendable());
    }

    #[test]
    fn upload_report_defaults_absent_sections() {
        let raw = r#"{"mensaje": "2 usuario(s) creados correctamente."}"#;
        let parsed: UploadReport = serde_json::from_str(raw).expect("upload json");
        assert!(parsed.errores.is_empty());
        assert_eq!(parsed.usuarios_creados, 0);

        let raw = r#"{
            "mensaje": "1 usuario(s) creados correctamente.",
            "usuarios_creados": 1,
            "errores": [{"fila": {"email": "a@b.cat", "nom": "Anna"}, "error": "Teléfono inválido."}]
        }"#;
        let parsed: UploadReport = serde_json::from_str(raw).expect("upload json");
        assert_eq!(parsed.errores.len(), 1);
        assert_eq!(parsed.errores[0].fila.email.as_deref(), Some("a@b.cat"));
        assert!(parsed.errores[0].fila.telefon.is_none());
    }

    #[test]
    fn loan_dates_parse_and_flag_open_loans() {
        let raw = r#"{
            "id": 12,
            "data_prestec": "2025-01-15",
            "data_retorn": null,
            "anotacions": null,
            "exemplar_titol": "La plaça del Diamant"
        }"#;
        let parsed: Loan = serde_json::from_str(raw).expect("loan json");
        assert!(parsed.is_open());
        assert_eq!(
            parsed.data_prestec,
            NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
        );
    }

    #[test]
    fn loan_create_request_omits_empty_fields() {
        let request = LoanCreateRequest {
            usuari: 4,
            exemplar: 9,
            data_prestec: NaiveDate::from_ymd_opt(2025, 2, 1),
            data_retorn: None,
            anotacions: None,
        };
        let encoded = serde_json::to_string(&request).expect("encode");
        assert!(encoded.contains("\"data_prestec\":\"2025-02-01\""));
        assert!(!encoded.contains("data_retorn"));
        assert!(!encoded.contains("anotacions"));
    }
}
