//! Session state for tripdeck.
//!
//! A [`Session`] owns the immutable trip plan and the four mutable facets
//! (progress log, expense ledger, packing checklist, photo album). It is
//! the single mutation path for all of them, with no globals or ambient
//! state, so each facet stays independently testable and every derived
//! view is a fresh recomputation over current state.
//!
//! All session state lives in memory for one process run and is discarded
//! at drop, which also releases every photo spool file.

pub mod album;
pub mod ledger;
pub mod packing;
pub mod progress;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::countdown::{self, TimeRemaining};
use crate::error::Result;
use crate::trip::{PhaseId, TripPlan};

pub use album::{PhotoAlbum, PhotoAttachment, SpoolHandle};
pub use ledger::{normalize_amount, BudgetSummary, ExpenseEntry, ExpenseLedger};
pub use packing::PackingChecklist;
pub use progress::{ProgressLog, ProgressSummary};

/// One trip-planning session: the plan plus all mutable facets.
#[derive(Debug)]
pub struct Session {
    trip: TripPlan,
    progress: ProgressLog,
    ledger: ExpenseLedger,
    packing: PackingChecklist,
    album: PhotoAlbum,
}

/// Packing completion for one category, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackingStatus {
    /// Category name.
    pub category: String,
    /// Items currently checked.
    pub checked: usize,
    /// Items in the category.
    pub total: usize,
}

/// A fully recomputed snapshot of every derived view.
///
/// Built on demand by [`Session::dashboard`]; nothing in it is cached, so
/// a snapshot taken after a mutation always reflects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Display name of the trip.
    pub trip: String,
    /// Aggregate phase completion.
    pub progress: ProgressSummary,
    /// Budget standing.
    pub budget: BudgetSummary,
    /// Per-category packing completion, in plan order.
    pub packing: Vec<PackingStatus>,
    /// Total photo attachments in the session.
    pub attachments: usize,
    /// Time until departure, when the plan schedules one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<TimeRemaining>,
}

impl Session {
    /// Start a fresh session over a trip plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the photo spool directory cannot be created.
    pub fn new(trip: TripPlan, config: &SessionConfig) -> Result<Self> {
        Ok(Self {
            trip,
            progress: ProgressLog::new(),
            ledger: ExpenseLedger::new(),
            packing: PackingChecklist::new(),
            album: PhotoAlbum::new(config)?,
        })
    }

    /// The immutable trip plan this session runs over.
    #[must_use]
    pub fn plan(&self) -> &TripPlan {
        &self.trip
    }

    // === Progress ===

    /// Mark a phase as driven.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownPhase`] for an id the plan does not
    /// contain.
    pub fn mark_phase_complete(&mut self, id: PhaseId) -> Result<bool> {
        self.progress.mark_complete(&self.trip, id)
    }

    /// Mark a phase as not driven.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownPhase`] for an id the plan does not
    /// contain.
    pub fn mark_phase_incomplete(&mut self, id: PhaseId) -> Result<bool> {
        self.progress.mark_incomplete(&self.trip, id)
    }

    /// Check whether a phase is marked complete.
    #[must_use]
    pub fn is_phase_complete(&self, id: PhaseId) -> bool {
        self.progress.is_complete(id)
    }

    /// Recompute the progress summary.
    #[must_use]
    pub fn progress(&self) -> ProgressSummary {
        self.progress.summary(&self.trip)
    }

    // === Expenses ===

    /// Record an expense; the raw amount is normalized per
    /// [`normalize_amount`] and the normalized amount returned.
    pub fn add_expense(&mut self, category: &str, raw_amount: &str, description: &str) -> f64 {
        self.ledger.add_entry(category, raw_amount, description)
    }

    /// Entries recorded under a category.
    #[must_use]
    pub fn expenses(&self, category: &str) -> &[ExpenseEntry] {
        self.ledger.entries(category)
    }

    /// Remaining budget for a category (negative when over budget).
    #[must_use]
    pub fn remaining_budget(&self, category: &str) -> f64 {
        self.ledger.remaining(&self.trip, category)
    }

    /// Recompute the budget summary.
    #[must_use]
    pub fn budget(&self) -> BudgetSummary {
        self.ledger.summary(&self.trip)
    }

    // === Packing ===

    /// Flip a packing item and return its new state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::PackingItemNotListed`] for an item the
    /// plan's packing list does not contain.
    pub fn toggle_packing(&mut self, category: &str, item: &str) -> Result<bool> {
        self.packing.toggle(&self.trip, category, item)
    }

    /// Check a packing item's state.
    #[must_use]
    pub fn is_packed(&self, category: &str, item: &str) -> bool {
        self.packing.is_checked(category, item)
    }

    /// Checked and total counts for one packing category.
    #[must_use]
    pub fn packing_completion(&self, category: &str) -> (usize, usize) {
        self.packing.completion(&self.trip, category)
    }

    // === Photos ===

    /// Attach a photo to a phase; returns its index within that phase.
    ///
    /// # Errors
    ///
    /// See [`PhotoAlbum::attach`].
    pub fn attach_photo(&mut self, phase_id: PhaseId, bytes: &[u8], name: &str) -> Result<usize> {
        self.album.attach(&self.trip, phase_id, bytes, name)
    }

    /// Detach and release a photo.
    ///
    /// # Errors
    ///
    /// See [`PhotoAlbum::detach`].
    pub fn detach_photo(&mut self, phase_id: PhaseId, index: usize) -> Result<()> {
        self.album.detach(phase_id, index)
    }

    /// Attachments for a phase, in attach order.
    #[must_use]
    pub fn photos(&self, phase_id: PhaseId) -> &[PhotoAttachment] {
        self.album.photos(phase_id)
    }

    /// Total attachments across the session.
    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.album.attachment_count()
    }

    // === Dashboard ===

    /// Recompute every derived view into one snapshot.
    #[must_use]
    pub fn dashboard(&self, now: DateTime<Utc>) -> Dashboard {
        let packing = self
            .trip
            .packing
            .iter()
            .map(|category| {
                let (checked, total) = self.packing.completion(&self.trip, &category.name);
                PackingStatus {
                    category: category.name.clone(),
                    checked,
                    total,
                }
            })
            .collect();

        Dashboard {
            trip: self.trip.name.clone(),
            progress: self.progress.summary(&self.trip),
            budget: self.ledger.summary(&self.trip),
            packing,
            attachments: self.album.attachment_count(),
            countdown: self
                .trip
                .departure
                .map(|departure| countdown::remaining(departure, now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_session() -> Session {
        Session::new(TripPlan::sample(), &SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_fresh_session_is_empty() {
        let session = test_session();
        let now = Utc.timestamp_opt(0, 0).unwrap();
        let dashboard = session.dashboard(now);

        assert!((dashboard.progress.percent - 0.0).abs() < f64::EPSILON);
        assert!((dashboard.budget.total_spent - 0.0).abs() < f64::EPSILON);
        assert_eq!(dashboard.attachments, 0);
        assert!(dashboard
            .packing
            .iter()
            .all(|status| status.checked == 0 && status.total > 0));
    }

    #[test]
    fn test_operations_flow_into_dashboard() {
        let mut session = test_session();

        session.mark_phase_complete(1).unwrap();
        session.add_expense("Food", "45.50", "diner");
        session.toggle_packing("Camping", "Tent").unwrap();
        session.attach_photo(1, b"jpeg", "arch.jpg").unwrap();

        let now = Utc.timestamp_opt(0, 0).unwrap();
        let dashboard = session.dashboard(now);

        assert!(dashboard.progress.percent > 0.0);
        assert!((dashboard.budget.total_spent - 45.5).abs() < f64::EPSILON);
        assert_eq!(dashboard.attachments, 1);

        let camping = dashboard
            .packing
            .iter()
            .find(|status| status.category == "Camping")
            .unwrap();
        assert_eq!(camping.checked, 1);
    }

    #[test]
    fn test_facet_failures_do_not_disturb_other_facets() {
        let mut session = test_session();
        session.add_expense("Food", "10", "snacks");

        assert!(session.mark_phase_complete(999).is_err());
        assert!(session.toggle_packing("Nope", "Thing").is_err());
        assert!(session.attach_photo(999, b"x", "p.jpg").is_err());

        let now = Utc.timestamp_opt(0, 0).unwrap();
        let dashboard = session.dashboard(now);
        assert!((dashboard.budget.total_spent - 10.0).abs() < f64::EPSILON);
        assert!((dashboard.progress.percent - 0.0).abs() < f64::EPSILON);
        assert_eq!(dashboard.attachments, 0);
    }

    #[test]
    fn test_countdown_present_only_when_scheduled() {
        let mut plan = TripPlan::sample();
        assert!(plan.departure.is_none());

        let session = Session::new(plan.clone(), &SessionConfig::default()).unwrap();
        let now = Utc.timestamp_opt(0, 0).unwrap();
        assert!(session.dashboard(now).countdown.is_none());

        plan.departure = Some(Utc.timestamp_opt(90_061, 0).unwrap());
        let session = Session::new(plan, &SessionConfig::default()).unwrap();
        let countdown = session.dashboard(now).countdown.unwrap();
        assert_eq!(countdown.days, 1);
    }

    #[test]
    fn test_dashboard_serializes_to_json() {
        let session = test_session();
        let now = Utc.timestamp_opt(0, 0).unwrap();
        let json = serde_json::to_string(&session.dashboard(now)).unwrap();

        assert!(json.contains("\"progress\""));
        assert!(json.contains("\"budget\""));
        assert!(json.contains("\"packing\""));
        // No departure scheduled, so no countdown key
        assert!(!json.contains("\"countdown\""));
    }

    #[test]
    fn test_photo_round_trip_through_session() {
        let mut session = test_session();

        let before = session.photos(2).len();
        session.attach_photo(2, b"bytes", "p.jpg").unwrap();
        session.detach_photo(2, 0).unwrap();
        assert_eq!(session.photos(2).len(), before);
    }
}
