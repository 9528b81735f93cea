// ********* Core data structures ***********

use std::error::Error;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A tournament participant eligible to receive votes.
///
/// Contestants are created by the organizer and only ever removed,
/// never edited in place.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Contestant {
    pub id: String,
    pub name: String,
    /// Opaque binary-as-text encoding of the contestant photo
    /// (a data URL in practice). May be empty.
    #[serde(default)]
    pub photo: String,
}

/// One recorded instance of public support for a contestant,
/// gated by a payment reference. Immutable once recorded.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: String,
    #[serde(rename = "contestantId")]
    pub contestant_id: String,
    /// Display name of the target contestant, captured at submission time.
    /// This is a soft reference: the contestant may be deleted afterwards.
    #[serde(rename = "contestantName")]
    pub contestant_name: String,
    #[serde(rename = "paidPhone")]
    pub paid_phone: String,
    /// The deduplication key. Unique across the whole ledger,
    /// case-sensitive exact match.
    pub reference: String,
    #[serde(rename = "voterName")]
    pub voter_name: Option<String>,
    /// Milliseconds since the epoch. Non-decreasing within a ledger.
    pub timestamp: u64,
    /// Free text, informational only. Never parsed as a number.
    pub amount: Option<String>,
}

/// The fields a voter fills in when submitting a vote.
///
/// The ledger assigns the id and the timestamp on acceptance.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteSubmission {
    pub contestant_id: String,
    pub paid_phone: String,
    pub reference: String,
    pub voter_name: Option<String>,
    pub amount: Option<String>,
}

// ******** Output data structures *********

/// One row of the leaderboard.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankEntry {
    pub contestant: Contestant,
    pub votes: u64,
}

/// Why a submission was not recorded.
///
/// None of these are fatal: the caller may correct the input and resubmit.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RejectionReason {
    /// The payment reference was empty.
    EmptyReference,
    /// Another vote already carries this payment reference.
    DuplicateReference,
    /// The target contestant does not exist in the roster.
    UnknownContestant,
    /// A contestant name was empty or all whitespace.
    BlankName,
}

impl Error for RejectionReason {}

impl Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::EmptyReference => {
                write!(f, "the payment reference may not be empty")
            }
            RejectionReason::DuplicateReference => {
                write!(f, "a vote with this payment reference was already recorded")
            }
            RejectionReason::UnknownContestant => {
                write!(f, "no contestant with this identifier")
            }
            RejectionReason::BlankName => {
                write!(f, "the contestant name may not be blank")
            }
        }
    }
}
