//! Packing checklist state.
//!
//! A sparse mapping from `(category, item)` to a checked flag. An absent
//! key means unchecked; a key stored with `false` is equivalent and allowed,
//! so double-toggling always restores the original state.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::trip::TripPlan;

/// Checked state of packing list items for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackingChecklist {
    checked: HashMap<(String, String), bool>,
}

impl PackingChecklist {
    /// Create an empty checklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip an item's checked state and return the new state.
    ///
    /// The toggled key is looked up in the plan's packing list template
    /// first, so the sparse map only ever holds keys the plan knows about.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PackingItemNotListed`] if the plan's packing list
    /// has no such item; the checklist is untouched.
    pub fn toggle(&mut self, plan: &TripPlan, category: &str, item: &str) -> Result<bool> {
        if !plan.has_packing_item(category, item) {
            return Err(Error::packing_item_not_listed(category, item));
        }

        let state = self
            .checked
            .entry((category.to_string(), item.to_string()))
            .or_insert(false);
        *state = !*state;
        debug!(
            "Packing item '{}/{}' now {}",
            category,
            item,
            if *state { "checked" } else { "unchecked" }
        );
        Ok(*state)
    }

    /// Stored checked state, `false` when the key was never toggled.
    #[must_use]
    pub fn is_checked(&self, category: &str, item: &str) -> bool {
        self.checked
            .get(&(category.to_string(), item.to_string()))
            .copied()
            .unwrap_or(false)
    }

    /// Checked and total item counts for one category of the plan.
    #[must_use]
    pub fn completion(&self, plan: &TripPlan, category: &str) -> (usize, usize) {
        plan.packing_category(category).map_or((0, 0), |cat| {
            let checked = cat
                .items
                .iter()
                .filter(|item| self.is_checked(category, item))
                .count();
            (checked, cat.items.len())
        })
    }

    /// Number of checked items across all categories of the plan.
    #[must_use]
    pub fn checked_count(&self, plan: &TripPlan) -> usize {
        plan.packing
            .iter()
            .map(|cat| self.completion(plan, &cat.name).0)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::PackingCategory;

    fn gear_plan() -> TripPlan {
        TripPlan {
            name: "Test".to_string(),
            departure: None,
            phases: vec![],
            packing: vec![
                PackingCategory {
                    name: "Gear".to_string(),
                    items: vec!["Tent".to_string(), "Stove".to_string()],
                },
                PackingCategory {
                    name: "Clothes".to_string(),
                    items: vec!["Boots".to_string()],
                },
            ],
            budget: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn test_unchecked_by_default() {
        let checklist = PackingChecklist::new();
        assert!(!checklist.is_checked("Gear", "Tent"));
    }

    #[test]
    fn test_toggle_checks_and_unchecks() {
        let plan = gear_plan();
        let mut checklist = PackingChecklist::new();

        assert!(checklist.toggle(&plan, "Gear", "Tent").unwrap());
        assert!(checklist.is_checked("Gear", "Tent"));

        assert!(!checklist.toggle(&plan, "Gear", "Tent").unwrap());
        assert!(!checklist.is_checked("Gear", "Tent"));
    }

    #[test]
    fn test_double_toggle_restores_original_state() {
        let plan = gear_plan();
        let mut checklist = PackingChecklist::new();

        let before = checklist.is_checked("Gear", "Stove");
        checklist.toggle(&plan, "Gear", "Stove").unwrap();
        checklist.toggle(&plan, "Gear", "Stove").unwrap();
        assert_eq!(checklist.is_checked("Gear", "Stove"), before);
    }

    #[test]
    fn test_unknown_item_is_rejected() {
        let plan = gear_plan();
        let mut checklist = PackingChecklist::new();

        let err = checklist.toggle(&plan, "Gear", "Lantern").unwrap_err();
        assert!(err.is_invalid_reference());
        assert!(!checklist.is_checked("Gear", "Lantern"));

        let err = checklist.toggle(&plan, "Kitchen", "Tent").unwrap_err();
        assert!(err.is_invalid_reference());
    }

    #[test]
    fn test_completion_counts() {
        let plan = gear_plan();
        let mut checklist = PackingChecklist::new();

        assert_eq!(checklist.completion(&plan, "Gear"), (0, 2));

        checklist.toggle(&plan, "Gear", "Tent").unwrap();
        assert_eq!(checklist.completion(&plan, "Gear"), (1, 2));

        checklist.toggle(&plan, "Gear", "Stove").unwrap();
        assert_eq!(checklist.completion(&plan, "Gear"), (2, 2));

        // Unchecking brings the count back down
        checklist.toggle(&plan, "Gear", "Tent").unwrap();
        assert_eq!(checklist.completion(&plan, "Gear"), (1, 2));
    }

    #[test]
    fn test_completion_for_unknown_category_is_empty() {
        let plan = gear_plan();
        let checklist = PackingChecklist::new();
        assert_eq!(checklist.completion(&plan, "Kitchen"), (0, 0));
    }

    #[test]
    fn test_checked_count_across_categories() {
        let plan = gear_plan();
        let mut checklist = PackingChecklist::new();

        checklist.toggle(&plan, "Gear", "Tent").unwrap();
        checklist.toggle(&plan, "Clothes", "Boots").unwrap();
        assert_eq!(checklist.checked_count(&plan), 2);
    }

    #[test]
    fn test_categories_do_not_collide() {
        let plan = gear_plan();
        let mut checklist = PackingChecklist::new();

        checklist.toggle(&plan, "Gear", "Tent").unwrap();
        assert!(!checklist.is_checked("Clothes", "Tent"));
    }
}
