//! Static trip plan model for tripdeck.
//!
//! A [`TripPlan`] describes one trip: its driving phases, its packing list
//! template, and its budget allocations. The plan is loaded once at startup
//! from a TOML file (or the built-in sample) and is never mutated; all
//! session state references it by id or name.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a phase, unique within a trip plan.
pub type PhaseId = u32;

/// A discrete leg of a trip with mileage and driving time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Unique identifier within the plan.
    pub id: PhaseId,
    /// Human-readable name, e.g. "Chicago to St. Louis".
    pub name: String,
    /// Driving distance in miles.
    pub miles: f64,
    /// Estimated driving time in hours.
    pub hours: f64,
}

/// One category of the packing list template with its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingCategory {
    /// Category name, e.g. "Camping".
    pub name: String,
    /// Item names in packing order.
    pub items: Vec<String>,
}

/// A complete trip description.
///
/// Immutable for the lifetime of a session. Constructed from a TOML plan
/// file via [`TripPlan::load`] or from [`TripPlan::sample`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Display name of the trip.
    pub name: String,

    /// Departure timestamp the countdown counts toward, if scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<DateTime<Utc>>,

    /// Ordered driving phases.
    pub phases: Vec<Phase>,

    /// Packing list template, in display order.
    #[serde(default)]
    pub packing: Vec<PackingCategory>,

    /// Budget allocation per expense category.
    #[serde(default)]
    pub budget: BTreeMap<String, f64>,
}

impl TripPlan {
    /// Load and validate a trip plan from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// plan fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let plan: Self = Figment::new()
            .merge(Toml::file(path))
            .extract()
            .map_err(|source| Error::TripLoad {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?;
        plan.validate()?;
        Ok(plan)
    }

    /// Validate the plan's internal consistency.
    ///
    /// # Errors
    ///
    /// Returns an error if phase ids repeat, mileage or hours are negative
    /// or non-finite, budget allocations are negative, or packing category
    /// names repeat.
    pub fn validate(&self) -> Result<()> {
        let mut seen_ids = BTreeSet::new();
        for phase in &self.phases {
            if !seen_ids.insert(phase.id) {
                return Err(Error::trip_validation(format!(
                    "duplicate phase id {}",
                    phase.id
                )));
            }
            if !phase.miles.is_finite() || phase.miles < 0.0 {
                return Err(Error::trip_validation(format!(
                    "phase '{}' has invalid mileage {}",
                    phase.name, phase.miles
                )));
            }
            if !phase.hours.is_finite() || phase.hours < 0.0 {
                return Err(Error::trip_validation(format!(
                    "phase '{}' has invalid hours {}",
                    phase.name, phase.hours
                )));
            }
        }

        let mut seen_categories = BTreeSet::new();
        for category in &self.packing {
            if !seen_categories.insert(category.name.as_str()) {
                return Err(Error::trip_validation(format!(
                    "duplicate packing category '{}'",
                    category.name
                )));
            }
        }

        for (category, allocation) in &self.budget {
            if !allocation.is_finite() || *allocation < 0.0 {
                return Err(Error::trip_validation(format!(
                    "budget for '{category}' has invalid allocation {allocation}"
                )));
            }
        }

        Ok(())
    }

    /// Look up a phase by id.
    #[must_use]
    pub fn phase(&self, id: PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|phase| phase.id == id)
    }

    /// Check whether the plan contains a phase with the given id.
    #[must_use]
    pub fn has_phase(&self, id: PhaseId) -> bool {
        self.phase(id).is_some()
    }

    /// Total mileage over all phases.
    #[must_use]
    pub fn total_miles(&self) -> f64 {
        self.phases.iter().map(|phase| phase.miles).sum()
    }

    /// Total driving hours over all phases.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.phases.iter().map(|phase| phase.hours).sum()
    }

    /// Look up a packing category by name.
    #[must_use]
    pub fn packing_category(&self, name: &str) -> Option<&PackingCategory> {
        self.packing.iter().find(|category| category.name == name)
    }

    /// Check whether the packing list template contains the given item.
    #[must_use]
    pub fn has_packing_item(&self, category: &str, item: &str) -> bool {
        self.packing_category(category)
            .is_some_and(|cat| cat.items.iter().any(|i| i == item))
    }

    /// Total budget over all allocations.
    #[must_use]
    pub fn total_budget(&self) -> f64 {
        self.budget.values().sum()
    }

    /// Budget allocation for a category. Unbudgeted categories count as 0.
    #[must_use]
    pub fn allocation(&self, category: &str) -> f64 {
        self.budget.get(category).copied().unwrap_or(0.0)
    }

    /// The built-in sample plan used when no plan file is configured.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            name: "Route 66 West".to_string(),
            departure: None,
            phases: vec![
                Phase {
                    id: 1,
                    name: "Chicago to St. Louis".to_string(),
                    miles: 297.0,
                    hours: 4.5,
                },
                Phase {
                    id: 2,
                    name: "St. Louis to Oklahoma City".to_string(),
                    miles: 497.0,
                    hours: 7.0,
                },
                Phase {
                    id: 3,
                    name: "Oklahoma City to Albuquerque".to_string(),
                    miles: 544.0,
                    hours: 8.0,
                },
                Phase {
                    id: 4,
                    name: "Albuquerque to Flagstaff".to_string(),
                    miles: 323.0,
                    hours: 4.75,
                },
                Phase {
                    id: 5,
                    name: "Flagstaff to Santa Monica".to_string(),
                    miles: 470.0,
                    hours: 7.25,
                },
            ],
            packing: vec![
                PackingCategory {
                    name: "Clothes".to_string(),
                    items: vec![
                        "T-shirts".to_string(),
                        "Rain jacket".to_string(),
                        "Hiking boots".to_string(),
                        "Swimsuit".to_string(),
                    ],
                },
                PackingCategory {
                    name: "Camping".to_string(),
                    items: vec![
                        "Tent".to_string(),
                        "Sleeping bags".to_string(),
                        "Camp stove".to_string(),
                    ],
                },
                PackingCategory {
                    name: "Car".to_string(),
                    items: vec![
                        "Jumper cables".to_string(),
                        "Spare tire".to_string(),
                        "Phone mount".to_string(),
                        "Paper maps".to_string(),
                    ],
                },
            ],
            budget: BTreeMap::from([
                ("Fuel".to_string(), 600.0),
                ("Food".to_string(), 500.0),
                ("Lodging".to_string(), 800.0),
                ("Activities".to_string(), 350.0),
            ]),
        }
    }
}
