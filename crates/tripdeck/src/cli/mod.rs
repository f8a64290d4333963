//! Command-line interface for tripdeck.
//!
//! This module provides the CLI structure and command handlers for the
//! `tripdeck` binary.

mod commands;
pub mod console;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, CountdownCommand, PackingCommand, SessionCommand, TripCommand,
};

/// tripdeck - Your road trip at a glance
///
/// Loads a trip plan and renders dashboards for it: driving progress,
/// budget standing, packing completion, and the departure countdown.
/// The `session` command opens an interactive console whose state lives
/// for exactly one run.
#[derive(Debug, Parser)]
#[command(name = "tripdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the trip itinerary, totals, and budget allocations
    Trip(TripCommand),

    /// Show the packing list template
    Packing(PackingCommand),

    /// Show time remaining until departure
    Countdown(CountdownCommand),

    /// Open an interactive dashboard session
    Session(SessionCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
