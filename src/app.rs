use log::{debug, info};

use poll_core::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use crate::app::config::AppConfig;
use crate::app::store::JsonFileStore;
use crate::args::{Args, Command};

pub mod config;
pub mod render;
pub mod store;

#[derive(Debug, Snafu)]
pub enum AppError {
    #[snafu(display("Error opening config file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing config file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error reading photo file {path}"))]
    ReadingPhoto {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing export file {path}"))]
    WritingExport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    Persisting { source: StoreError },
    #[snafu(display("Could not encode the export document: {source}"))]
    Export { source: ExportError },
    #[snafu(display("The vote was not recorded: {source}"))]
    Rejected { source: RejectionReason },
    #[snafu(display("The contestant was not added: {source}"))]
    BadContestant { source: RejectionReason },
    #[snafu(display("The organizer PIN does not match"))]
    InvalidPin {},
    #[snafu(display("This command is organizer-only, pass the PIN with --pin"))]
    OrganizerOnly {},
    #[snafu(display("No contestant with id {id}"))]
    NoSuchContestant { id: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AppResult<T> = Result<T, AppError>;

/// Which panel of the poll the caller is operating: the public voting
/// surface or the organizer management surface. Derived once from the PIN,
/// never re-derived elsewhere.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Mode {
    Public,
    Organizer,
}

fn resolve_mode(pin: &Option<String>, config: &AppConfig) -> AppResult<Mode> {
    match pin {
        None => Ok(Mode::Public),
        // Plain text equality. This is a shared PIN for a local tool,
        // not an authentication scheme.
        Some(p) if *p == config.organizer_pin => Ok(Mode::Organizer),
        Some(_) => InvalidPinSnafu {}.fail(),
    }
}

fn require_organizer(mode: Mode) -> AppResult<()> {
    match mode {
        Mode::Organizer => Ok(()),
        Mode::Public => OrganizerOnlySnafu {}.fail(),
    }
}

// Wraps a photo file into a data URL, the storage encoding the poll uses
// for contestant pictures.
fn photo_data_url(path: &str) -> AppResult<String> {
    let bytes = fs::read(path).context(ReadingPhotoSnafu { path })?;
    let mime = match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    Ok(format!(
        "data:{};base64,{}",
        mime,
        data_encoding::BASE64.encode(&bytes)
    ))
}

fn save_votes(store: &mut JsonFileStore, state: &PollState) -> AppResult<()> {
    store
        .save_votes(state.ledger().all())
        .context(PersistingSnafu {})
}

fn save_contestants(store: &mut JsonFileStore, state: &PollState) -> AppResult<()> {
    store
        .save_contestants(state.contestants())
        .context(PersistingSnafu {})
}

pub fn run(args: Args) -> AppResult<()> {
    let config = config::load_config(&args.config)?;
    debug!("config: {:?}", config);
    let mode = resolve_mode(&args.pin, &config)?;
    info!("mode: {:?}, state file: {:?}", mode, args.state);

    let mut store = JsonFileStore::new(&args.state);
    let mut state = PollState::load(&store);

    match args.command {
        Command::Vote {
            contestant,
            phone,
            reference,
            voter_name,
            amount,
        } => {
            let submission = VoteSubmission {
                contestant_id: contestant,
                paid_phone: phone,
                reference,
                voter_name,
                amount: amount.or_else(|| Some(config.default_amount.clone())),
            };
            let vote = state.submit_vote(&submission).context(RejectedSnafu {})?;
            // Persist before confirming anything to the voter.
            save_votes(&mut store, &state)?;
            println!("{}", config.title);
            println!(
                "Vote {} recorded for {} (reference {}).",
                vote.id, vote.contestant_name, vote.reference
            );
            println!(
                "Reminder: the matching payment goes to {} (amount {}).",
                config.payment_number,
                vote.amount.as_deref().unwrap_or(&config.default_amount)
            );
        }
        Command::Ranking => {
            println!("{}", config.title);
            println!("{}", render::ranking_table(&state.ranking()));
        }
        Command::Contestants => {
            println!("{}", render::contestant_list(&state.ranking()));
        }
        Command::AddContestant { name, photo } => {
            require_organizer(mode)?;
            let photo_data = match photo {
                Some(p) => photo_data_url(&p)?,
                None => String::new(),
            };
            let contestant = state
                .add_contestant(&name, &photo_data)
                .context(BadContestantSnafu {})?;
            save_contestants(&mut store, &state)?;
            println!("Added contestant {} ({})", contestant.name, contestant.id);
        }
        Command::RemoveContestant { id } => {
            require_organizer(mode)?;
            if !state.remove_contestant(&id) {
                return NoSuchContestantSnafu { id }.fail();
            }
            save_contestants(&mut store, &state)?;
            println!("Removed contestant {}", id);
        }
        Command::Export { out } => {
            require_organizer(mode)?;
            let rows = export_rows(state.ledger().all());
            let text = encode(&rows).context(ExportSnafu {})?;
            match out.as_deref() {
                None | Some("stdout") => print!("{}", text),
                Some(path) => {
                    fs::write(path, &text).context(WritingExportSnafu { path })?;
                    println!("Wrote {} votes to {}", rows.len(), path);
                }
            }
        }
        Command::Reset { contestants } => {
            require_organizer(mode)?;
            if contestants {
                state.reset_all();
                save_contestants(&mut store, &state)?;
            } else {
                state.reset_votes();
            }
            save_votes(&mut store, &state)?;
            println!("Poll votes cleared.");
        }
    }
    Ok(())
}
