//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Trip command arguments.
#[derive(Debug, Args)]
pub struct TripCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Packing command arguments.
#[derive(Debug, Args)]
pub struct PackingCommand {
    /// Show only this category
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Countdown command arguments.
#[derive(Debug, Args)]
pub struct CountdownCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Session command arguments.
#[derive(Debug, Args)]
pub struct SessionCommand {
    /// Trip plan file to use instead of the configured one
    #[arg(short, long, value_name = "FILE")]
    pub trip: Option<PathBuf>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_command_debug() {
        let cmd = TripCommand { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("json"));
    }

    #[test]
    fn test_packing_command_debug() {
        let cmd = PackingCommand {
            category: Some("Camping".to_string()),
            json: false,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Camping"));
    }

    #[test]
    fn test_session_command_debug() {
        let cmd = SessionCommand {
            trip: Some(PathBuf::from("/tmp/trip.toml")),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("trip.toml"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
