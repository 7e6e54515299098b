//! Error model and endpoint paths for the catalogue backend.
//!
//! # Design
//! - Failures collapse into three kinds a view can render directly:
//!   connection loss, deadline overrun, and a rejection with the message
//!   the server put in its body.
//! - Paths are built here, off the DOM, so encoding is covered by native
//!   tests.

use thiserror::Error;

/// Deadline for every backend call, in milliseconds.
pub const REQUEST_TIMEOUT_MS: u32 = 15_000;

/// Failure of a backend call, reduced to what the interface can tell the
/// user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never reached the server or the connection dropped.
    #[error("{0}")]
    Network(String),
    /// No response arrived within [`REQUEST_TIMEOUT_MS`].
    #[error("La solicitud tardó demasiado tiempo en responder.")]
    Timeout,
    /// The server answered with a non-success status.
    #[error("{message}")]
    Http {
        /// HTTP status code of the rejection.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },
}

/// Extract the most specific error message from a rejection body.
///
/// The backend reports validation problems under `detail` and application
/// problems under `message`. Anything else, including bodies that are not
/// JSON at all, falls back to the status line.
#[must_use]
pub fn server_message(status: u16, status_text: &str, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                return text.to_string();
            }
        }
    }
    format!("Error {status}: {status_text}")
}

/// Credential login endpoint.
pub const LOGIN_PATH: &str = "/api/login";

/// Full exemplar inventory endpoint.
pub const EXEMPLARS_PATH: &str = "/api/exemplars";

/// Loan history endpoint, queried by username.
pub const LOANS_PATH: &str = "/api/prestecs";

/// Loan creation endpoint.
pub const LOAN_CREATE_PATH: &str = "/api/crear_prestec";

/// Borrower lookup endpoint.
pub const USER_SEARCH_PATH: &str = "/api/buscar_usuarios/";

/// Profile read endpoint; updates go to the same path with `PATCH`.
pub const PROFILE_PATH: &str = "/api/perfil/";

/// Dirty check endpoint consulted before a profile update.
pub const PROFILE_CHECK_PATH: &str = "/api/verificar-cambios/";

/// User import endpoint taking a multipart CSV upload.
pub const CSV_UPLOAD_PATH: &str = "/api/subir-documento/";

/// Path of the catalogue list, optionally narrowed by a search term.
#[must_use]
pub fn books_path(search: Option<&str>) -> String {
    match search {
        Some(term) => format!("/api/llibres?search={}", urlencoding::encode(term)),
        None => "/api/llibres".to_string(),
    }
}

/// Path of one catalogue record.
#[must_use]
pub fn book_path(book_id: i64) -> String {
    format!("/api/llibres/{book_id}")
}

/// Path of the exemplars held for one catalogue record.
#[must_use]
pub fn book_exemplars_path(book_id: i64) -> String {
    format!("/api/llibres/{book_id}/exemplars")
}

/// Path of the classification lookup for one registry code.
#[must_use]
pub fn cdu_path(registre: &str) -> String {
    format!("/api/get_cdu?registre={}", urlencoding::encode(registre))
}

/// Location of the rendered Code 128 barcode for one registry code.
#[must_use]
pub fn barcode_url(registre: &str) -> String {
    format!(
        "https://api-bwipjs.metafloor.com/?bcid=code128&text={}&includetext=false&scale=2&height=10",
        urlencoding::encode(registre)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_preferred_over_message() {
        let body = r#"{"detail":"Credencials incorrectes","message":"ignored"}"#;
        assert_eq!(
            server_message(401, "Unauthorized", body),
            "Credencials incorrectes"
        );
    }

    #[test]
    fn message_is_used_when_detail_is_absent() {
        let body = r#"{"message":"Exemplar no disponible"}"#;
        assert_eq!(
            server_message(409, "Conflict", body),
            "Exemplar no disponible"
        );
    }

    #[test]
    fn unparseable_bodies_fall_back_to_the_status_line() {
        assert_eq!(
            server_message(500, "Internal Server Error", "<html>boom</html>"),
            "Error 500: Internal Server Error"
        );
        assert_eq!(
            server_message(502, "Bad Gateway", r#"{"detail":42}"#),
            "Error 502: Bad Gateway"
        );
    }

    #[test]
    fn search_terms_are_url_encoded() {
        assert_eq!(books_path(None), "/api/llibres");
        assert_eq!(
            books_path(Some("mar i cel")),
            "/api/llibres?search=mar%20i%20cel"
        );
    }

    #[test]
    fn registry_codes_are_url_encoded() {
        assert_eq!(cdu_path("REG-0001/A"), "/api/get_cdu?registre=REG-0001%2FA");
    }

    #[test]
    fn barcode_url_pins_the_render_parameters() {
        assert_eq!(
            barcode_url("REG-0042"),
            "https://api-bwipjs.metafloor.com/?bcid=code128&text=REG-0042&includetext=false&scale=2&height=10"
        );
    }

    #[test]
    fn record_paths_embed_the_identifier() {
        assert_eq!(book_path(12), "/api/llibres/12");
        assert_eq!(book_exemplars_path(12), "/api/llibres/12/exemplars");
    }

    #[test]
    fn timeout_renders_the_fixed_notice() {
        assert_eq!(
            ApiError::Timeout.to_string(),
            "La solicitud tardó demasiado tiempo en responder."
        );
    }
}
