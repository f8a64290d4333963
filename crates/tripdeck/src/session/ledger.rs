//! Expense tracking against the trip budget.
//!
//! The ledger holds per-category expense entries and derives totals against
//! the plan's budget allocations on demand. Amounts arrive as raw user
//! input: anything that does not parse as a finite non-negative number is
//! normalized to `0.0` and still recorded. That normalization is a
//! documented rule of the ledger, not silent data loss.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::trip::TripPlan;

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// Normalized amount, always finite and non-negative.
    pub amount: f64,
    /// Free-form description, e.g. "lunch in Tulsa".
    pub description: String,
}

/// Per-category expense lists for one session.
///
/// Categories are created on first use; spending in a category the budget
/// does not allocate for is allowed and simply shows up as over-budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseLedger {
    entries: BTreeMap<String, Vec<ExpenseEntry>>,
}

/// Budget standing derived from a ledger and the plan's allocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Sum of all plan allocations.
    pub total_budget: f64,
    /// Sum of every recorded entry.
    pub total_spent: f64,
    /// Remaining amount per category, negative when over budget. Covers
    /// every category that is either budgeted or has entries.
    pub remaining: BTreeMap<String, f64>,
}

/// Normalize raw amount input.
///
/// Parses `raw` as `f64`. Parse failures, non-finite values, and negative
/// values all normalize to `0.0`.
#[must_use]
pub fn normalize_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => amount,
        Ok(_) | Err(_) => 0.0,
    }
}

impl ExpenseLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an expense, creating the category list on first use.
    ///
    /// `raw_amount` is user input text and is normalized per
    /// [`normalize_amount`]; the normalized amount is returned.
    pub fn add_entry(&mut self, category: &str, raw_amount: &str, description: &str) -> f64 {
        let amount = normalize_amount(raw_amount);
        if amount == 0.0 && raw_amount.trim().parse::<f64>().map_or(true, |v| v != 0.0) {
            warn!(
                "Amount '{}' did not parse as a non-negative number, recording 0",
                raw_amount
            );
        }

        self.entries
            .entry(category.to_string())
            .or_default()
            .push(ExpenseEntry {
                amount,
                description: description.to_string(),
            });
        debug!("Recorded {} under '{}'", amount, category);
        amount
    }

    /// Entries recorded under a category, oldest first.
    #[must_use]
    pub fn entries(&self, category: &str) -> &[ExpenseEntry] {
        self.entries.get(category).map_or(&[], Vec::as_slice)
    }

    /// Total spent across all categories.
    #[must_use]
    pub fn total_spent(&self) -> f64 {
        self.entries
            .values()
            .flatten()
            .map(|entry| entry.amount)
            .sum()
    }

    /// Total spent in one category.
    #[must_use]
    pub fn spent_in(&self, category: &str) -> f64 {
        self.entries(category).iter().map(|entry| entry.amount).sum()
    }

    /// Remaining budget for a category.
    ///
    /// An unbudgeted category counts as allocated `0.0`, so its remaining
    /// amount is negative once anything is spent. Over-budget is a valid
    /// state, not an error.
    #[must_use]
    pub fn remaining(&self, plan: &TripPlan, category: &str) -> f64 {
        plan.allocation(category) - self.spent_in(category)
    }

    /// Number of recorded entries across all categories.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Recompute the budget standing from current entries.
    #[must_use]
    pub fn summary(&self, plan: &TripPlan) -> BudgetSummary {
        let mut remaining = BTreeMap::new();
        for category in plan.budget.keys() {
            remaining.insert(category.clone(), self.remaining(plan, category));
        }
        for category in self.entries.keys() {
            remaining
                .entry(category.clone())
                .or_insert_with(|| self.remaining(plan, category));
        }

        BudgetSummary {
            total_budget: plan.total_budget(),
            total_spent: self.total_spent(),
            remaining,
        }
    }
}
