//! Selection set of exemplars queued for label printing.
//!
//! # Design
//! - Exemplars are kept in insertion order because the printed sheet
//!   follows it. Identity is the exemplar id; adding an id twice is a
//!   no-op, so the set never holds duplicates.
//! - The state serialises as a bare array to stay compatible with the
//!   selection format already present in visitors' browser storage.

use std::collections::HashSet;

use biblio_api_models::Exemplar;
use serde::{Deserialize, Serialize};

/// Exemplars picked for printing, in the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    /// Selected exemplars.
    pub items: Vec<Exemplar>,
}

impl CartState {
    /// Whether an exemplar id is already selected.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Number of selected exemplars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one exemplar. Returns `false` when its id was already present.
    pub fn add(&mut self, exemplar: Exemplar) -> bool {
        if self.contains(exemplar.id) {
            return false;
        }
        self.items.push(exemplar);
        true
    }

    /// Add every exemplar not yet selected, preserving the given order.
    pub fn add_many(&mut self, exemplars: &[Exemplar]) {
        for exemplar in exemplars {
            if !self.contains(exemplar.id) {
                self.items.push(exemplar.clone());
            }
        }
    }

    /// Remove one exemplar by id.
    pub fn remove(&mut self, id: i64) {
        self.items.retain(|item| item.id != id);
    }

    /// Remove every exemplar whose id appears in `ids`.
    pub fn remove_all(&mut self, ids: &[i64]) {
        let drop: HashSet<i64> = ids.iter().copied().collect();
        self.items.retain(|item| !drop.contains(&item.id));
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn adding_the_same_id_twice_keeps_one_entry() {
        let mut cart = CartState::default();
        assert!(cart.add(exemplar(1)));
        assert!(!cart.add(exemplar(1)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn bulk_add_skips_already_selected_ids() {
        let mut cart = CartState::default();
        cart.add(exemplar(2));
        cart.add_many(&[exemplar(1), exemplar(2), exemplar(3)]);
        let ids: Vec<i64> = cart.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn filtered_removal_leaves_the_rest_alone() {
        let mut cart = CartState::default();
        cart.add_many(&[exemplar(1), exemplar(2), exemplar(3)]);
        cart.remove_all(&[1, 3]);
        let ids: Vec<i64> = cart.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![2]);

        cart.remove(2);
        assert!(cart.is_empty());
    }

    #[test]
    fn storage_format_is_a_bare_array() {
        let mut cart = CartState::default();
        cart.add(exemplar(1));
        let encoded = serde_json::to_string(&cart).expect("encode");
        assert!(encoded.starts_with('['));
        let decoded: CartState = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, cart);
    }
}
