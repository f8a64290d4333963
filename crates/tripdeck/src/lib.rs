//! `tripdeck` - A road-trip dashboard for the terminal
//!
//! This library provides the core functionality for tracking one trip's
//! progress, expenses, packing list, and photo attachments over a static
//! itinerary, all scoped to a single in-memory session.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod countdown;
pub mod error;
pub mod logging;
pub mod session;
pub mod trip;

pub use config::Config;
pub use countdown::TimeRemaining;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use session::{Dashboard, Session};
pub use trip::{Phase, PhaseId, TripPlan};
