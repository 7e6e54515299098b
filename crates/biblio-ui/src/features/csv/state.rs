//! Digest of a CSV upload report for display.

use biblio_api_models::UploadReport;

/// One rejected row, reduced to what the screen lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowFailure {
    /// Email of the rejected row, or the name when the email was missing.
    pub who: String,
    /// Server-side rejection reason.
    pub reason: String,
}

/// Upload outcome as the screen presents it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadSummary {
    /// Accounts created by the upload.
    pub created: u32,
    /// Rows the server rejected.
    pub failures: Vec<RowFailure>,
}

/// Reduce a server report to the created count and the rejected rows.
#[must_use]
pub fn summarize(report: &UploadReport) -> UploadSummary {
    UploadSummary {
        created: report.usuarios_creados,
        failures: report
            .errores
            .iter()
            .map(|row| RowFailure {
                who: row
                    .fila
                    .email
                    .clone()
                    .or_else(|| row.fila.nom.clone())
                    .unwrap_or_else(|| "—".to_string()),
                reason: row.error.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prefers_email_then_name() {
        let report: UploadReport = serde_json::from_value(serde_json::json!({
            "mensaje": "2 usuario(s) creados correctamente.",
            "usuarios_creados": 2,
            "errores": [
                {"fila": {"email": "a@b.cat"}, "error": "Teléfono inválido."},
                {"fila": {"nom": "Pere"}, "error": "Email duplicado."},
                {"fila": {}, "error": "Fila vacía."}
            ]
        }))
        .expect("report fixture");
        let summary = summarize(&report);
        assert_eq!(summary.created, 2);
        let who: Vec<&str> = summary
            .failures
            .iter()
            .map(|failure| failure.who.as_str())
            .collect();
        assert_eq!(who, vec!["a@b.cat", "Pere", "—"]);
    }

    #[test]
    fn a_clean_report_has_no_failures() {
        let report: UploadReport = serde_json::from_value(serde_json::json!({
            "mensaje": "3 usuario(s) creados correctamente.",
            "usuarios_creados": 3
        }))
        .expect("report fixture");
        let summary = summarize(&report);
        assert_eq!(summary.created, 3);
        assert!(summary.failures.is_empty());
    }
}
