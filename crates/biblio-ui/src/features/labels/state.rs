//! Batch assembly: selection order plus settled classification lookups.
//!
//! # Design
//! - Lookups run concurrently and settle in any order; assembly re-keys
//!   them by registry code so the batch keeps the selection's order.
//! - A failed lookup is a settled lookup. Assembly never waits on, or
//!   fails because of, an individual code.

use std::collections::HashMap;

use biblio_api_models::Exemplar;

use crate::core::labels::LabelItem;

/// Outcome of one classification lookup: the registry code it was keyed
/// by, and the code found, if any.
pub type CduLookup = (String, Option<String>);

/// Combine the selection with its settled lookups, preserving selection
/// order. Items whose lookup failed or is absent get the placeholder code.
#[must_use]
pub fn resolve_items(selection: &[Exemplar], lookups: Vec<CduLookup>) -> Vec<LabelItem> {
    let mut by_registre: HashMap<String, Option<String>> = lookups.into_iter().collect();
    selection
        .iter()
        .map(|exemplar| {
            let cdu = by_registre.remove(&exemplar.registre).flatten();
            LabelItem::new(exemplar, cdu)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::labels::CDU_PLACEHOLDER;

    fn exemplar(id: i64) -> Exemplar {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "registre": format!("REG-0001-{id:04}"),
            "exclos_prestec": false,
            "baixa": false,
            "cataleg": {"id": 9, "titol": "Mar i cel"},
            "tipus": "Llibre",
            "centre": {"id": 2, "nom": "Institut Escola"}
        }))
        .expect("exemplar fixture")
    }

    #[test]
    fn assembly_keeps_selection_order_despite_settle_order() {
        let selection = vec![exemplar(1), exemplar(2), exemplar(3)];
        // Lookups settled in reverse order.
        let lookups = vec![
            ("REG-0001-0003".to_string(), Some("82".to_string())),
            ("REG-0001-0002".to_string(), Some("821.134.1".to_string())),
            ("REG-0001-0001".to_string(), Some("94(460)".to_string())),
        ];
        let items = resolve_items(&selection, lookups);
        let codes: Vec<&str> = items.iter().map(|item| item.cdu.as_str()).collect();
        assert_eq!(codes, vec!["94(460)", "821.134.1", "82"]);
        assert_eq!(items[0].registre, "REG-0001-0001");
    }

    #[test]
    fn failed_lookups_fall_back_to_the_placeholder() {
        let selection = vec![exemplar(1), exemplar(2)];
        let lookups = vec![
            ("REG-0001-0001".to_string(), None),
            ("REG-0001-0002".to_string(), Some("82".to_string())),
        ];
        let items = resolve_items(&selection, lookups);
        assert_eq!(items[0].cdu, CDU_PLACEHOLDER);
        assert_eq!(items[1].cdu, "82");
    }
}
