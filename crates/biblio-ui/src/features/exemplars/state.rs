//! Filtering rules for the exemplar search screen.
//!
//! # Design
//! - Unlike the catalogue, an inactive search keeps the whole inventory on
//!   screen; filtering only narrows it.
//! - Range queries work on registry codes so a librarian can label a whole
//!   shelf interval in one go.

use biblio_api_models::Exemplar;

use crate::core::search::{SearchMode, matches_exemplar, registre_in_range};

/// Exemplars visible under the given search mode, in inventory order.
#[must_use]
pub fn filter<'a>(exemplars: &'a [Exemplar], mode: &SearchMode) -> Vec<&'a Exemplar> {
    match mode {
        SearchMode::Inactive => exemplars.iter().collect(),
        SearchMode::Text(needle) => exemplars
            .iter()
            .filter(|exemplar| matches_exemplar(&exemplar.registre, &exemplar.cataleg.titol, needle))
            .collect(),
        SearchMode::Range { start, end } => exemplars
            .iter()
            .filter(|exemplar| registre_in_range(&exemplar.registre, start, end))
            .collect(),
    }
}

/// Identifiers of the exemplars the current search keeps visible.
///
/// Bulk add and bulk clear act on exactly this set.
#[must_use]
pub fn filtered_ids(exemplars: &[Exemplar], mode: &SearchMode) -> Vec<i64> {
    filter(exemplars, mode)
        .into_iter()
        .map(|exemplar| exemplar.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::parse_query;

    fn exemplar(id: i64, registre: &str, titol: &str) -> Exemplar {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "registre": registre,
            "exclos_prestec": false,
            "baixa": false,
            "cataleg": {"id": 9, "titol": titol},
            "tipus": "Llibre",
            "centre": {"id": 2, "nom": "Institut Escola"}
        }))
        .expect("exemplar fixture")
    }

    fn inventory() -> Vec<Exemplar> {
        // Deliberately out of registry order.
        vec![
            exemplar(4, "REG-0001-0004", "Mecanoscrit del segon origen"),
            exemplar(1, "REG-0001-0001", "Mar i cel"),
            exemplar(6, "REG-0001-0006", "Tirant lo Blanc"),
            exemplar(3, "REG-0001-0003", "Solaris"),
            exemplar(5, "REG-0001-0005", "La plaça del Diamant"),
        ]
    }

    #[test]
    fn inactive_search_keeps_the_whole_inventory() {
        let all = inventory();
        assert_eq!(filter(&all, &parse_query("")).len(), all.len());
        assert_eq!(filter(&all, &parse_query("re")).len(), all.len());
    }

    #[test]
    fn range_query_is_inclusive_and_order_independent() {
        let all = inventory();
        let mode = parse_query("REG-0001-0001 REG-0001-0005");
        let mut ids = filtered_ids(&all, &mode);
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 3, 4, 5]);
    }

    #[test]
    fn text_query_matches_code_or_title() {
        let all = inventory();
        let by_title = filter(&all, &parse_query("tirant"));
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 6);

        let by_code = filter(&all, &parse_query("0001-0003"));
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].id, 3);
    }
}
