//! Availability arithmetic and filtering for the catalogue screens.
//!
//! # Design
//! - Lists are fetched once and filtered locally, so every helper here is a
//!   pure function over the full record set.
//! - Retired copies never count as holdings; excluded copies still sit on
//!   the shelf, so the detail table reports them in their own column.

use std::collections::HashMap;

use biblio_api_models::{Book, Exemplar};

use crate::core::search::{SearchMode, matches_book};

/// Suggestions shown under the search box.
pub const SUGGESTION_LIMIT: usize = 5;

/// Copies available to lend per catalogue id.
///
/// A copy counts when it is neither retired nor excluded from lending.
#[must_use]
pub fn availability(exemplars: &[Exemplar]) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for exemplar in exemplars {
        if exemplar.is_lendable() {
            *counts.entry(exemplar.cataleg.id).or_insert(0) += 1;
        }
    }
    counts
}

/// Books matching the active search, in catalogue order.
///
/// The catalogue list only shows results while a search is active, so an
/// inactive mode yields nothing. Registry ranges never match books.
#[must_use]
pub fn filter_books<'a>(books: &'a [Book], mode: &SearchMode) -> Vec<&'a Book> {
    match mode {
        SearchMode::Text(needle) => books
            .iter()
            .filter(|book| matches_book(&book.titol, book.autor.as_deref(), needle))
            .collect(),
        SearchMode::Inactive | SearchMode::Range { .. } => Vec::new(),
    }
}

/// Top matches offered while typing, capped at [`SUGGESTION_LIMIT`].
#[must_use]
pub fn suggestions<'a>(books: &'a [Book], raw: &str) -> Vec<&'a Book> {
    let mode = crate::core::search::parse_query(raw);
    let mut hits = filter_books(books, &mode);
    hits.truncate(SUGGESTION_LIMIT);
    hits
}

/// One row of the per-branch holdings table on the detail screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchHoldings {
    /// Branch display name.
    pub centre: String,
    /// Copies that can be lent out.
    pub available: usize,
    /// Copies on the shelf but excluded from lending.
    pub excluded: usize,
}

/// Holdings of one book grouped by branch, retired copies left out,
/// branches sorted by name.
#[must_use]
pub fn branch_holdings(exemplars: &[Exemplar]) -> Vec<BranchHoldings> {
    let mut by_centre: HashMap<&str, (usize, usize)> = HashMap::new();
    for exemplar in exemplars {
        if exemplar.baixa {
            continue;
        }
        let entry = by_centre.entry(exemplar.centre.nom.as_str()).or_default();
        if exemplar.exclos_prestec {
            entry.1 += 1;
        } else {
            entry.0 += 1;
        }
    }
    let mut rows: Vec<BranchHoldings> = by_centre
        .into_iter()
        .map(|(centre, (available, excluded))| BranchHoldings {
            centre: centre.to_string(),
            available,
            excluded,
        })
        .collect();
    rows.sort_by(|left, right| left.centre.cmp(&right.centre));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::parse_query;

    fn book(id: i64, titol: &str, autor: Option<&str>) -> Book {
        Book {
            id,
            titol: titol.to_string(),
            autor: autor.map(ToString::to_string),
            ..Book::default()
        }
    }

    fn exemplar(id: i64, cataleg: i64, centre: &str, exclos: bool, baixa: bool) -> Exemplar {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "registre": format!("REG-0001-{id:04}"),
            "exclos_prestec": exclos,
            "baixa": baixa,
            "cataleg": {"id": cataleg, "titol": "T"},
            "tipus": "Llibre",
            "centre": {"id": 1, "nom": centre}
        }))
        .expect("exemplar fixture")
    }

    #[test]
    fn availability_skips_retired_and_excluded_copies() {
        let exemplars = vec![
            exemplar(1, 9, "Central", false, false),
            exemplar(2, 9, "Central", true, false),
            exemplar(3, 9, "Annex", false, true),
            exemplar(4, 5, "Central", false, false),
        ];
        let counts = availability(&exemplars);
        assert_eq!(counts.get(&9), Some(&1));
        assert_eq!(counts.get(&5), Some(&1));
        assert_eq!(counts.get(&7), None);
    }

    #[test]
    fn inactive_search_shows_no_results() {
        let books = vec![book(1, "Mar i cel", None)];
        assert!(filter_books(&books, &parse_query("ma")).is_empty());
        assert!(filter_books(&books, &parse_query("")).is_empty());
    }

    #[test]
    fn text_search_matches_title_or_author() {
        let books = vec![
            book(1, "Mar i cel", Some("Àngel Guimerà")),
            book(2, "Tirant lo Blanc", Some("Joanot Martorell")),
        ];
        let hits = filter_books(&books, &parse_query("guimerà"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn suggestions_are_capped() {
        let books: Vec<Book> = (0..8).map(|n| book(n, "Mecanoscrit", None)).collect();
        assert_eq!(suggestions(&books, "mecano").len(), SUGGESTION_LIMIT);
        assert!(suggestions(&books, "me").is_empty());
    }

    #[test]
    fn branch_table_splits_available_from_excluded() {
        let exemplars = vec![
            exemplar(1, 9, "Central", false, false),
            exemplar(2, 9, "Central", true, false),
            exemplar(3, 9, "Annex", false, false),
            exemplar(4, 9, "Annex", false, true),
        ];
        let rows = branch_holdings(&exemplars);
        assert_eq!(
            rows,
            vec![
                BranchHoldings {
                    centre: "Annex".to_string(),
                    available: 1,
                    excluded: 0,
                },
                BranchHoldings {
                    centre: "Central".to_string(),
                    available: 1,
                    excluded: 1,
                },
            ]
        );
    }
}
