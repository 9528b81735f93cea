use clap::{Parser, Subcommand};

/// This is a local tournament poll: payment-gated public voting with a live
/// ranking and a CSV export.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file holding the poll state (contestants and votes).
    /// A missing or unreadable file is treated as an empty poll.
    #[clap(short, long, value_parser, default_value = "legendpoll.json")]
    pub state: String,

    /// (file path, optional) A JSON configuration file for the tournament
    /// title, payment number, default amount and organizer PIN. Missing keys
    /// fall back to built-in defaults.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// The organizer PIN. Commands that manage the poll (adding or removing
    /// contestants, export, reset) require it. Compared as plain text: this
    /// gate keeps honest people honest, nothing more.
    #[clap(short, long, value_parser)]
    pub pin: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Casts a vote for a contestant, gated by a payment reference.
    Vote {
        /// The identifier of the contestant to vote for (see `contestants`).
        #[clap(long, value_parser)]
        contestant: String,
        /// The phone number the payment was made from.
        #[clap(long, value_parser)]
        phone: String,
        /// The payment reference. Each reference is accepted exactly once,
        /// across all contestants.
        #[clap(short, long, value_parser)]
        reference: String,
        /// (optional) A display name for the voter.
        #[clap(long, value_parser)]
        voter_name: Option<String>,
        /// (optional) The amount paid, informational only.
        #[clap(long, value_parser)]
        amount: Option<String>,
    },
    /// Prints the live ranking with proportional progress bars.
    Ranking,
    /// Lists the contestants with their identifiers and vote counts.
    Contestants,
    /// (organizer) Registers a contestant.
    AddContestant {
        #[clap(long, value_parser)]
        name: String,
        /// (file path, optional) A photo to store with the contestant,
        /// encoded as a data URL.
        #[clap(long, value_parser)]
        photo: Option<String>,
    },
    /// (organizer) Removes a contestant. Recorded votes are kept.
    RemoveContestant {
        #[clap(long, value_parser)]
        id: String,
    },
    /// (organizer) Writes the vote ledger as a CSV document.
    Export {
        /// (file path, 'stdout' or empty) Where to write the document.
        #[clap(short, long, value_parser)]
        out: Option<String>,
    },
    /// (organizer) Clears all votes.
    Reset {
        /// Also clears the contestant roster.
        #[clap(long, takes_value = false)]
        contestants: bool,
    },
}
