//! Trip progress tracking.
//!
//! [`ProgressLog`] records which phases of the plan have been driven.
//! Derived metrics are recomputed from the current set on every call to
//! [`ProgressLog::summary`]; nothing is cached, so a summary taken after a
//! mutation always reflects it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::trip::{PhaseId, TripPlan};

/// The set of completed phases for one session.
///
/// Membership only changes through [`mark_complete`](Self::mark_complete)
/// and [`mark_incomplete`](Self::mark_incomplete), both of which reject ids
/// the plan does not contain, so every member is a valid plan phase id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressLog {
    completed: BTreeSet<PhaseId>,
}

/// Aggregate completion metrics derived from a [`ProgressLog`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Total mileage over all plan phases.
    pub total_miles: f64,
    /// Total driving hours over all plan phases.
    pub total_hours: f64,
    /// Mileage over completed phases.
    pub completed_miles: f64,
    /// Driving hours over completed phases.
    pub completed_hours: f64,
    /// Completed share of total mileage, 0..=100. Zero for a plan with no
    /// mileage.
    pub percent: f64,
}

impl ProgressLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a phase as driven.
    ///
    /// Returns `true` if the phase was newly marked, `false` if it was
    /// already complete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPhase`] if the plan has no phase with this
    /// id; the log is untouched.
    pub fn mark_complete(&mut self, plan: &TripPlan, id: PhaseId) -> Result<bool> {
        if !plan.has_phase(id) {
            return Err(Error::unknown_phase(id));
        }
        let changed = self.completed.insert(id);
        if changed {
            debug!("Marked phase {} complete", id);
        }
        Ok(changed)
    }

    /// Mark a phase as not driven.
    ///
    /// Returns `true` if the phase had been complete, `false` if it already
    /// wasn't.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPhase`] if the plan has no phase with this
    /// id; the log is untouched.
    pub fn mark_incomplete(&mut self, plan: &TripPlan, id: PhaseId) -> Result<bool> {
        if !plan.has_phase(id) {
            return Err(Error::unknown_phase(id));
        }
        let changed = self.completed.remove(&id);
        if changed {
            debug!("Marked phase {} incomplete", id);
        }
        Ok(changed)
    }

    /// Check whether a phase is marked complete.
    #[must_use]
    pub fn is_complete(&self, id: PhaseId) -> bool {
        self.completed.contains(&id)
    }

    /// Number of completed phases.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Recompute aggregate metrics from the current set.
    #[must_use]
    pub fn summary(&self, plan: &TripPlan) -> ProgressSummary {
        let total_miles = plan.total_miles();
        let total_hours = plan.total_hours();

        let (completed_miles, completed_hours) = plan
            .phases
            .iter()
            .filter(|phase| self.completed.contains(&phase.id))
            .fold((0.0, 0.0), |(miles, hours), phase| {
                (miles + phase.miles, hours + phase.hours)
            });

        let percent = if total_miles > 0.0 {
            completed_miles / total_miles * 100.0
        } else {
            0.0
        };

        ProgressSummary {
            total_miles,
            total_hours,
            completed_miles,
            completed_hours,
            percent,
        }
    }
}
