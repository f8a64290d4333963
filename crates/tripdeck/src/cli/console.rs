//! Interactive dashboard console.
//!
//! A line-oriented read-eval loop over one [`Session`]. Each input line
//! maps to exactly one session operation (or a view), runs to completion,
//! and prints the result; rejected references and exhausted caps print as
//! warnings and leave state untouched. Everything is discarded at `quit`.

use std::io::{self, BufRead, Write};

use chrono::Utc;
use tracing::warn;

use crate::error::Result;
use crate::session::{Dashboard, Session};
use crate::trip::PhaseId;

/// One parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Show command help.
    Help,
    /// Show the full dashboard.
    Status,
    /// Mark a phase complete.
    Done(PhaseId),
    /// Mark a phase incomplete.
    Undo(PhaseId),
    /// Record an expense.
    Spend {
        /// Expense category.
        category: String,
        /// Raw amount input, normalized by the ledger.
        amount: String,
        /// Free-form description.
        description: String,
    },
    /// Toggle a packing item.
    Pack {
        /// Packing category.
        category: String,
        /// Item name (may contain spaces).
        item: String,
    },
    /// Attach a photo file to a phase.
    PhotoAdd {
        /// Phase to attach to.
        phase: PhaseId,
        /// Path of the image file to spool.
        path: String,
    },
    /// Detach a photo from a phase.
    PhotoRm {
        /// Phase to detach from.
        phase: PhaseId,
        /// Index within the phase's album.
        index: usize,
    },
    /// List a phase's photos.
    Photos(PhaseId),
    /// End the session.
    Quit,
}

const HELP: &str = "\
Commands:
  status                          show the dashboard
  done <phase>                    mark a phase complete
  undo <phase>                    mark a phase incomplete
  spend <category> <amount> <description...>
  pack <category> <item...>       toggle a packing item
  photo add <phase> <file>        attach a photo
  photo rm <phase> <index>        detach a photo
  photos <phase>                  list a phase's photos
  help                            show this help
  quit                            end the session (state is discarded)";

/// Parse one input line.
///
/// Returns `Ok(None)` for a blank line and `Err` with a usage message for
/// anything unrecognized.
pub fn parse(line: &str) -> std::result::Result<Option<ConsoleCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };

    let command = match keyword {
        "help" => ConsoleCommand::Help,
        "status" => ConsoleCommand::Status,
        "quit" | "exit" => ConsoleCommand::Quit,
        "done" | "undo" => {
            let id = parse_phase(words.next())?;
            if keyword == "done" {
                ConsoleCommand::Done(id)
            } else {
                ConsoleCommand::Undo(id)
            }
        }
        "spend" => {
            let category = words
                .next()
                .ok_or("usage: spend <category> <amount> <description...>")?
                .to_string();
            let amount = words
                .next()
                .ok_or("usage: spend <category> <amount> <description...>")?
                .to_string();
            let description = words.collect::<Vec<_>>().join(" ");
            ConsoleCommand::Spend {
                category,
                amount,
                description,
            }
        }
        "pack" => {
            let category = words
                .next()
                .ok_or("usage: pack <category> <item...>")?
                .to_string();
            let item = words.collect::<Vec<_>>().join(" ");
            if item.is_empty() {
                return Err("usage: pack <category> <item...>".to_string());
            }
            ConsoleCommand::Pack { category, item }
        }
        "photo" => match words.next() {
            Some("add") => {
                let phase = parse_phase(words.next())?;
                let path = words.collect::<Vec<_>>().join(" ");
                if path.is_empty() {
                    return Err("usage: photo add <phase> <file>".to_string());
                }
                ConsoleCommand::PhotoAdd { phase, path }
            }
            Some("rm") => {
                let phase = parse_phase(words.next())?;
                let index = words
                    .next()
                    .and_then(|word| word.parse().ok())
                    .ok_or("usage: photo rm <phase> <index>")?;
                ConsoleCommand::PhotoRm { phase, index }
            }
            _ => return Err("usage: photo add <phase> <file> | photo rm <phase> <index>".to_string()),
        },
        "photos" => ConsoleCommand::Photos(parse_phase(words.next())?),
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };

    Ok(Some(command))
}

fn parse_phase(word: Option<&str>) -> std::result::Result<PhaseId, String> {
    word.and_then(|w| w.parse().ok())
        .ok_or_else(|| "expected a phase id".to_string())
}

/// Execute one command against the session and render the outcome.
///
/// Returns `None` for [`ConsoleCommand::Quit`]; every other command
/// renders to text. Operation errors render as warnings and leave state
/// untouched.
pub fn execute(session: &mut Session, command: &ConsoleCommand) -> Option<String> {
    let output = match command {
        ConsoleCommand::Help => HELP.to_string(),
        ConsoleCommand::Status => render_dashboard(&session.dashboard(Utc::now())),
        ConsoleCommand::Done(id) => match session.mark_phase_complete(*id) {
            Ok(true) => {
                let progress = session.progress();
                format!("Phase {} complete. Trip is {:.0}% driven.", id, progress.percent)
            }
            Ok(false) => format!("Phase {id} was already complete."),
            Err(err) => warning(&err),
        },
        ConsoleCommand::Undo(id) => match session.mark_phase_incomplete(*id) {
            Ok(true) => {
                let progress = session.progress();
                format!("Phase {} reopened. Trip is {:.0}% driven.", id, progress.percent)
            }
            Ok(false) => format!("Phase {id} was not complete."),
            Err(err) => warning(&err),
        },
        ConsoleCommand::Spend {
            category,
            amount,
            description,
        } => {
            let recorded = session.add_expense(category, amount, description);
            let remaining = session.remaining_budget(category);
            format!(
                "Recorded {recorded:.2} under '{category}'. Remaining: {remaining:.2}"
            )
        }
        ConsoleCommand::Pack { category, item } => match session.toggle_packing(category, item) {
            Ok(checked) => {
                let (done, total) = session.packing_completion(category);
                format!(
                    "{} '{}/{}' ({}/{} packed)",
                    if checked { "Packed" } else { "Unpacked" },
                    category,
                    item,
                    done,
                    total
                )
            }
            Err(err) => warning(&err),
        },
        ConsoleCommand::PhotoAdd { phase, path } => match std::fs::read(path) {
            Ok(bytes) => {
                let name = std::path::Path::new(path)
                    .file_name()
                    .map_or_else(|| path.clone(), |n| n.to_string_lossy().into_owned());
                match session.attach_photo(*phase, &bytes, &name) {
                    Ok(index) => format!(
                        "Attached '{}' to phase {} at index {}.",
                        name, phase, index
                    ),
                    Err(err) => warning(&err),
                }
            }
            Err(err) => format!("warning: could not read '{path}': {err}"),
        },
        ConsoleCommand::PhotoRm { phase, index } => match session.detach_photo(*phase, *index) {
            Ok(()) => format!("Detached photo {index} from phase {phase}."),
            Err(err) => warning(&err),
        },
        ConsoleCommand::Photos(phase) => {
            let photos = session.photos(*phase);
            if photos.is_empty() {
                format!("No photos for phase {phase}.")
            } else {
                photos
                    .iter()
                    .enumerate()
                    .map(|(index, photo)| {
                        format!(
                            "{index:>3}  {}  {} bytes  {}",
                            photo.name,
                            photo.byte_len,
                            photo.taken.format("%Y-%m-%d %H:%M")
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        ConsoleCommand::Quit => return None,
    };

    Some(output)
}

fn warning(err: &crate::error::Error) -> String {
    warn!("{err}");
    format!("warning: {err}")
}

/// Render the dashboard snapshot for the terminal.
#[must_use]
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", dashboard.trip));
    out.push_str(&format!("{}\n", "=".repeat(dashboard.trip.len())));

    if let Some(countdown) = &dashboard.countdown {
        out.push_str(&format!("Departure in {countdown}\n"));
    }

    let progress = &dashboard.progress;
    out.push_str(&format!(
        "Progress:  {:.0} / {:.0} miles ({:.0}%), {:.1} / {:.1} hours\n",
        progress.completed_miles,
        progress.total_miles,
        progress.percent,
        progress.completed_hours,
        progress.total_hours
    ));

    let budget = &dashboard.budget;
    out.push_str(&format!(
        "Budget:    {:.2} spent of {:.2}\n",
        budget.total_spent, budget.total_budget
    ));
    for (category, remaining) in &budget.remaining {
        out.push_str(&format!("  {category:<12} {remaining:>10.2} remaining\n"));
    }

    out.push_str("Packing:\n");
    for status in &dashboard.packing {
        out.push_str(&format!(
            "  {:<12} {}/{} packed\n",
            status.category, status.checked, status.total
        ));
    }

    out.push_str(&format!("Photos:    {} attached\n", dashboard.attachments));
    out
}

/// Run the read-eval loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn run(session: &mut Session) -> Result<()> {
    println!("Session started for '{}'. State lasts until quit.", session.plan().name);
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "tripdeck> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // end of input
        }

        match parse(&line) {
            Ok(Some(command)) => match execute(session, &command) {
                Some(output) => println!("{output}"),
                None => break,
            },
            Ok(None) => {}
            Err(usage) => println!("{usage}"),
        }
    }

    println!("Session ended, state discarded.");
    Ok(())
}
