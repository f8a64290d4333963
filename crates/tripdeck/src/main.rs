//! `tripdeck` - CLI for the road-trip dashboard
//!
//! This binary loads the trip plan and configuration, renders the read-only
//! views, and hosts the interactive dashboard session.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::info;

use tripdeck::cli::{console, Cli, Command, ConfigCommand, CountdownCommand, PackingCommand};
use tripdeck::session::Session;
use tripdeck::{init_logging, Config, TripPlan};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Trip(trip_cmd) => {
            let plan = load_plan(&config, None)?;
            handle_trip(&plan, trip_cmd.json)
        }
        Command::Packing(packing_cmd) => {
            let plan = load_plan(&config, None)?;
            handle_packing(&plan, &packing_cmd)
        }
        Command::Countdown(countdown_cmd) => {
            let plan = load_plan(&config, None)?;
            handle_countdown(&plan, &countdown_cmd)
        }
        Command::Session(session_cmd) => {
            let plan = load_plan(&config, session_cmd.trip)?;
            handle_session(plan, &config)
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// Load the trip plan: an explicit override must exist, the configured path
/// falls back to the built-in sample when absent.
fn load_plan(config: &Config, override_path: Option<PathBuf>) -> anyhow::Result<TripPlan> {
    if let Some(path) = override_path {
        return TripPlan::load(&path)
            .with_context(|| format!("loading trip plan {}", path.display()));
    }

    let path = config.trip_path();
    if path.exists() {
        Ok(TripPlan::load(&path)?)
    } else {
        info!(
            "No trip plan at {}, using the built-in sample",
            path.display()
        );
        Ok(TripPlan::sample())
    }
}

fn handle_trip(plan: &TripPlan, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }

    println!("{}", plan.name);
    println!("{}", "=".repeat(plan.name.len()));
    for phase in &plan.phases {
        println!(
            "  {:>3}  {:<32} {:>7.0} mi {:>6.1} h",
            phase.id, phase.name, phase.miles, phase.hours
        );
    }
    println!(
        "       {:<32} {:>7.0} mi {:>6.1} h",
        "Total",
        plan.total_miles(),
        plan.total_hours()
    );

    if !plan.budget.is_empty() {
        println!();
        println!("Budget:");
        for (category, allocation) in &plan.budget {
            println!("  {category:<16} {allocation:>10.2}");
        }
        println!("  {:<16} {:>10.2}", "Total", plan.total_budget());
    }
    Ok(())
}

fn handle_packing(plan: &TripPlan, cmd: &PackingCommand) -> anyhow::Result<()> {
    let categories: Vec<_> = match &cmd.category {
        Some(name) => match plan.packing_category(name) {
            Some(category) => vec![category],
            None => {
                println!("No packing category '{name}' in this plan.");
                return Ok(());
            }
        },
        None => plan.packing.iter().collect(),
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    for category in categories {
        println!("{} ({} items)", category.name, category.items.len());
        for item in &category.items {
            println!("  [ ] {item}");
        }
    }
    Ok(())
}

fn handle_countdown(plan: &TripPlan, cmd: &CountdownCommand) -> anyhow::Result<()> {
    let now = Utc::now();

    if cmd.json {
        let payload = match plan.departure {
            Some(departure) => serde_json::json!({
                "departure": departure,
                "remaining": tripdeck::countdown::remaining(departure, now),
            }),
            None => serde_json::json!({ "departure": null }),
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match plan.departure {
        Some(departure) => {
            let remaining = tripdeck::countdown::remaining(departure, now);
            if remaining.is_zero() {
                println!("Departure time has arrived. Drive safe!");
            } else {
                println!("Departure in {remaining}");
            }
        }
        None => println!("No departure date set in the trip plan."),
    }
    Ok(())
}

fn handle_session(plan: TripPlan, config: &Config) -> anyhow::Result<()> {
    let mut session = Session::new(plan, &config.session)?;
    console::run(&mut session)?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Trip]");
                println!("  Plan path:            {}", config.trip_path().display());
                println!();
                println!("[Session]");
                println!(
                    "  Max attachments:      {}",
                    config.session.max_attachments
                );
                println!(
                    "  Max attachment bytes: {}",
                    config.session.max_attachment_bytes
                );
                match &config.session.spool_dir {
                    Some(dir) => println!("  Spool dir:            {}", dir.display()),
                    None => println!("  Spool dir:            (system temp)"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
