//! Loan form rules: defaults, validation, and history ordering.
//!
//! # Design
//! - Date inputs stay strings for lossless editing and convert to
//!   [`chrono::NaiveDate`] only at validation time.
//! - Validation runs entirely locally; a form that fails here never issues
//!   a request.

use biblio_api_models::{Exemplar, Loan, LoanCreateRequest};
use chrono::{Days, NaiveDate};

/// Wire format of the date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days between the default loan date and the default return date.
pub const DEFAULT_LOAN_DAYS: u64 = 7;

/// Why a loan form was rejected locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoanFormError {
    /// A required field is missing or unparseable.
    Incomplete,
    /// The loan date lies before today.
    PastDate,
}

impl LoanFormError {
    /// Translation key of the inline message shown for this rejection.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::Incomplete => "loans.form.incomplete",
            Self::PastDate => "loans.form.past_date",
        }
    }
}

/// Default loan and return dates: today and today plus a week.
#[must_use]
pub fn default_dates(today: NaiveDate) -> (String, String) {
    let due = today
        .checked_add_days(Days::new(DEFAULT_LOAN_DAYS))
        .unwrap_or(today);
    (
        today.format(DATE_FORMAT).to_string(),
        due.format(DATE_FORMAT).to_string(),
    )
}

/// Everything the loan creation screen collects.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LoanForm {
    /// Selected borrower account id.
    pub usuari: Option<i64>,
    /// Selected exemplar id.
    pub exemplar: Option<i64>,
    /// Loan date input value.
    pub data_prestec: String,
    /// Return date input value.
    pub data_retorn: String,
    /// Free-form annotations.
    pub anotacions: String,
}

impl LoanForm {
    /// Empty form with the default dates filled in.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let (data_prestec, data_retorn) = default_dates(today);
        Self {
            data_prestec,
            data_retorn,
            ..Self::default()
        }
    }

    /// Validate the form and build the request to submit.
    ///
    /// Borrower, exemplar, and both dates are required; a loan date before
    /// `today` is rejected. Annotations stay optional.
    ///
    /// # Errors
    ///
    /// [`LoanFormError::Incomplete`] when a required field is missing or a
    /// date does not parse, [`LoanFormError::PastDate`] when the loan date
    /// lies before `today`.
    pub fn to_request(&self, today: NaiveDate) -> Result<LoanCreateRequest, LoanFormError> {
        let usuari = self.usuari.ok_or(LoanFormError::Incomplete)?;
        let exemplar = self.exemplar.ok_or(LoanFormError::Incomplete)?;
        let data_prestec = parse_date(&self.data_prestec)?;
        let data_retorn = parse_date(&self.data_retorn)?;
        if data_prestec < today {
            return Err(LoanFormError::PastDate);
        }
        let anotacions = self.anotacions.trim();
        Ok(LoanCreateRequest {
            usuari,
            exemplar,
            data_prestec: Some(data_prestec),
            data_retorn: Some(data_retorn),
            anotacions: (!anotacions.is_empty()).then(|| anotacions.to_string()),
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, LoanFormError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| LoanFormError::Incomplete)
}

/// Exemplars of a book that the dropdown offers: lendable copies only.
#[must_use]
pub fn lendable(exemplars: &[Exemplar]) -> Vec<&Exemplar> {
    exemplars
        .iter()
        .filter(|exemplar| exemplar.is_lendable())
        .collect()
}

/// Order a loan history for display: most recent first, open loans ranked
/// by their loan date.
pub fn sort_loans(loans: &mut [Loan]) {
    loans.sort_by(|left, right| {
        let left_key = left.data_retorn.unwrap_or(left.data_prestec);
        let right_key = right.data_retorn.unwrap_or(right.data_prestec);
        right_key.cmp(&left_key)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date")
    }

    fn complete_form() -> LoanForm {
        LoanForm {
            usuari: Some(4),
            exemplar: Some(9),
            ..LoanForm::new(today())
        }
    }

    #[test]
    fn defaults_span_one_week() {
        let form = LoanForm::new(today());
        assert_eq!(form.data_prestec, "2025-03-10");
        assert_eq!(form.data_retorn, "2025-03-17");
    }

    #[test]
    fn missing_exemplar_blocks_submission() {
        let form = LoanForm {
            exemplar: None,
            ..complete_form()
        };
        assert_eq!(form.to_request(today()), Err(LoanFormError::Incomplete));
        assert_eq!(
            LoanFormError::Incomplete.message_key(),
            "loans.form.incomplete"
        );
    }

    #[test]
    fn missing_borrower_or_garbled_date_blocks_submission() {
        let form = LoanForm {
            usuari: None,
            ..complete_form()
        };
        assert_eq!(form.to_request(today()), Err(LoanFormError::Incomplete));

        let form = LoanForm {
            data_prestec: "10/03/2025".to_string(),
            ..complete_form()
        };
        assert_eq!(form.to_request(today()), Err(LoanFormError::Incomplete));
    }

    #[test]
    fn past_loan_dates_are_rejected() {
        let form = LoanForm {
            data_prestec: "2025-03-09".to_string(),
            ..complete_form()
        };
        assert_eq!(form.to_request(today()), Err(LoanFormError::PastDate));
    }

    #[test]
    fn a_complete_form_builds_the_request() {
        let form = LoanForm {
            anotacions: "  retorn curt  ".to_string(),
            ..complete_form()
        };
        let request = form.to_request(today()).expect("valid form");
        assert_eq!(request.usuari, 4);
        assert_eq!(request.exemplar, 9);
        assert_eq!(request.data_prestec, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(request.data_retorn, NaiveDate::from_ymd_opt(2025, 3, 17));
        assert_eq!(request.anotacions.as_deref(), Some("retorn curt"));
    }

    #[test]
    fn todays_date_is_accepted() {
        assert!(complete_form().to_request(today()).is_ok());
    }

    #[test]
    fn lendable_drops_excluded_and_retired_copies() {
        let exemplars: Vec<Exemplar> = [(1, false, false), (2, true, false), (3, false, true)]
            .iter()
            .map(|(id, exclos, baixa)| {
                serde_json::from_value(serde_json::json!({
                    "id": id,
                    "registre": format!("REG-0001-{id:04}"),
                    "exclos_prestec": exclos,
                    "baixa": baixa,
                    "cataleg": {"id": 9, "titol": "T"},
                    "tipus": "Llibre",
                    "centre": {"id": 1, "nom": "Central"}
                }))
                .expect("exemplar fixture")
            })
            .collect();
        let offered = lendable(&exemplars);
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].id, 1);
    }

    #[test]
    fn history_sorts_by_return_then_loan_date_descending() {
        let mut loans: Vec<Loan> = serde_json::from_value(serde_json::json!([
            {"id": 1, "data_prestec": "2025-01-01", "data_retorn": "2025-01-10", "exemplar_titol": "A"},
            {"id": 2, "data_prestec": "2025-02-01", "data_retorn": null, "exemplar_titol": "B"},
            {"id": 3, "data_prestec": "2024-12-01", "data_retorn": "2025-03-01", "exemplar_titol": "C"}
        ]))
        .expect("loans fixture");
        sort_loans(&mut loans);
        let ids: Vec<i64> = loans.iter().map(|loan| loan.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
