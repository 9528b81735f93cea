mod export;
mod model;
mod ranking;
mod store;

pub mod quick_start;

use log::{debug, info};

use std::time::{SystemTime, UNIX_EPOCH};

pub use crate::export::*;
pub use crate::model::*;
pub use crate::ranking::{bar_percent, rank};
pub use crate::store::*;

// **** Private helpers ****

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// Derives an identifier from a seed and a timestamp with a cryptographic
// hash, so identifiers are hard to guess and stable for a given input.
fn uid(seed: &str, timestamp: u64) -> String {
    let digest = sha256::digest(format!("{:016x}:{}", timestamp, seed));
    digest[..16].to_string()
}

/// The append-only collection of all votes.
///
/// The ledger enforces the anti-duplicate rule on payment references and
/// owns id and timestamp assignment. It holds votes newest first: reading
/// [Ledger::all] is reverse-chronological.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Ledger {
    votes: Vec<Vote>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::default()
    }

    /// Rebuilds a ledger from previously persisted votes (newest first).
    pub fn from_votes(votes: Vec<Vote>) -> Ledger {
        Ledger { votes }
    }

    /// Records a vote, or rejects it without mutating anything.
    ///
    /// The payment reference must be non-empty and must not equal the
    /// reference of any existing vote (exact, case-sensitive match,
    /// regardless of which contestant is targeted). On success the new
    /// vote is inserted at the front of the ledger and returned.
    ///
    /// `contestant_name` is the display name to denormalize into the
    /// record; existence of the contestant itself is the caller's check.
    pub fn submit(
        &mut self,
        submission: &VoteSubmission,
        contestant_name: &str,
    ) -> Result<Vote, RejectionReason> {
        if submission.reference.is_empty() {
            return Err(RejectionReason::EmptyReference);
        }
        if self.votes.iter().any(|v| v.reference == submission.reference) {
            debug!(
                "submit: duplicate reference {:?}, rejecting",
                submission.reference
            );
            return Err(RejectionReason::DuplicateReference);
        }

        // Wall-clock time, clamped so timestamps never decrease within
        // a ledger even if the system clock steps backwards.
        let last_ts = self.votes.first().map(|v| v.timestamp).unwrap_or(0);
        let timestamp = now_millis().max(last_ts);

        let vote = Vote {
            id: uid(&submission.reference, timestamp),
            contestant_id: submission.contestant_id.clone(),
            contestant_name: contestant_name.to_string(),
            paid_phone: submission.paid_phone.clone(),
            reference: submission.reference.clone(),
            voter_name: submission.voter_name.clone(),
            timestamp,
            amount: submission.amount.clone(),
        };
        info!(
            "submit: recorded vote {} for contestant {:?}",
            vote.id, vote.contestant_id
        );
        self.votes.insert(0, vote.clone());
        Ok(vote)
    }

    /// All votes, most recently submitted first.
    pub fn all(&self) -> &[Vote] {
        &self.votes
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Organizer bulk clear: drops every vote matched by the predicate.
    pub fn remove_all<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&Vote) -> bool,
    {
        let before = self.votes.len();
        self.votes.retain(|v| !predicate(v));
        info!("remove_all: {} -> {} votes", before, self.votes.len());
    }
}

/// The single owner of the mutable poll state: the contestant roster and
/// the vote ledger.
///
/// Persistence is not implicit. Callers load the state from a [Store] once,
/// mutate it through these operations, and call the store explicitly after
/// each mutation.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PollState {
    contestants: Vec<Contestant>,
    ledger: Ledger,
}

impl PollState {
    pub fn new(contestants: Vec<Contestant>, votes: Vec<Vote>) -> PollState {
        PollState {
            contestants,
            ledger: Ledger::from_votes(votes),
        }
    }

    pub fn load(store: &dyn Store) -> PollState {
        PollState::new(store.load_contestants(), store.load_votes())
    }

    pub fn contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Registers a contestant. The name must not be blank; the photo may
    /// be an empty string.
    pub fn add_contestant(
        &mut self,
        name: &str,
        photo: &str,
    ) -> Result<Contestant, RejectionReason> {
        if name.trim().is_empty() {
            return Err(RejectionReason::BlankName);
        }
        let timestamp = now_millis();
        let contestant = Contestant {
            // The roster length salts the seed so that two contestants with
            // the same name added in the same millisecond stay distinct.
            id: uid(&format!("{}:{}", name, self.contestants.len()), timestamp),
            name: name.to_string(),
            photo: photo.to_string(),
        };
        info!("add_contestant: {} ({:?})", contestant.id, contestant.name);
        self.contestants.push(contestant.clone());
        Ok(contestant)
    }

    /// Removes a contestant from the roster. Votes already recorded for it
    /// are kept: the vote's contestant reference is soft.
    pub fn remove_contestant(&mut self, id: &str) -> bool {
        let before = self.contestants.len();
        self.contestants.retain(|c| c.id != id);
        before != self.contestants.len()
    }

    /// Submits a vote after checking that the target contestant exists.
    pub fn submit_vote(&mut self, submission: &VoteSubmission) -> Result<Vote, RejectionReason> {
        let name = self
            .contestants
            .iter()
            .find(|c| c.id == submission.contestant_id)
            .map(|c| c.name.clone())
            .ok_or(RejectionReason::UnknownContestant)?;
        self.ledger.submit(submission, &name)
    }

    /// The live leaderboard, derived from the current ledger contents.
    pub fn ranking(&self) -> Vec<RankEntry> {
        rank(&self.contestants, self.ledger.all())
    }

    pub fn reset_votes(&mut self) {
        self.ledger.remove_all(|_| true);
    }

    pub fn reset_all(&mut self) {
        self.reset_votes();
        self.contestants.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(contestant_id: &str, reference: &str) -> VoteSubmission {
        VoteSubmission {
            contestant_id: contestant_id.to_string(),
            paid_phone: "0700000000".to_string(),
            reference: reference.to_string(),
            voter_name: None,
            amount: None,
        }
    }

    fn state_with_amy_and_ben() -> (PollState, String, String) {
        let mut state = PollState::default();
        let amy = state.add_contestant("Amy", "").unwrap();
        let ben = state.add_contestant("Ben", "").unwrap();
        (state, amy.id, ben.id)
    }

    #[test]
    fn distinct_references_all_recorded() {
        let mut ledger = Ledger::new();
        for i in 0..5 {
            ledger
                .submit(&submission("p1", &format!("R{}", i)), "Amy")
                .unwrap();
        }
        assert_eq!(ledger.len(), 5);
    }

    #[test]
    fn duplicate_reference_rejected_without_mutation() {
        let mut ledger = Ledger::new();
        ledger.submit(&submission("p1", "R1"), "Amy").unwrap();
        // Same reference, different contestant and phone: still a duplicate.
        let mut dup = submission("p2", "R1");
        dup.paid_phone = "0711111111".to_string();
        assert_eq!(
            ledger.submit(&dup, "Ben"),
            Err(RejectionReason::DuplicateReference)
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.all()[0].contestant_id, "p1");
    }

    #[test]
    fn empty_reference_rejected() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.submit(&submission("p1", ""), "Amy"),
            Err(RejectionReason::EmptyReference)
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn reads_newest_first() {
        let mut ledger = Ledger::new();
        ledger.submit(&submission("p1", "R1"), "Amy").unwrap();
        ledger.submit(&submission("p1", "R2"), "Amy").unwrap();
        let refs: Vec<&str> = ledger.all().iter().map(|v| v.reference.as_str()).collect();
        assert_eq!(refs, vec!["R2", "R1"]);
    }

    #[test]
    fn timestamps_never_decrease() {
        let mut ledger = Ledger::new();
        ledger.submit(&submission("p1", "R1"), "Amy").unwrap();
        ledger.submit(&submission("p1", "R2"), "Amy").unwrap();
        ledger.submit(&submission("p1", "R3"), "Amy").unwrap();
        let ts: Vec<u64> = ledger.all().iter().rev().map(|v| v.timestamp).collect();
        assert!(ts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn vote_ids_are_unique() {
        let mut ledger = Ledger::new();
        ledger.submit(&submission("p1", "R1"), "Amy").unwrap();
        ledger.submit(&submission("p1", "R2"), "Amy").unwrap();
        assert_ne!(ledger.all()[0].id, ledger.all()[1].id);
    }

    #[test]
    fn vote_for_unknown_contestant_rejected() {
        let (mut state, _, _) = state_with_amy_and_ben();
        assert_eq!(
            state.submit_vote(&submission("ghost", "R1")),
            Err(RejectionReason::UnknownContestant)
        );
        assert!(state.ledger().is_empty());
    }

    #[test]
    fn vote_captures_the_contestant_name() {
        let (mut state, amy_id, _) = state_with_amy_and_ben();
        let vote = state.submit_vote(&submission(&amy_id, "R1")).unwrap();
        assert_eq!(vote.contestant_name, "Amy");
    }

    #[test]
    fn blank_contestant_name_rejected() {
        let mut state = PollState::default();
        assert_eq!(
            state.add_contestant("  ", ""),
            Err(RejectionReason::BlankName)
        );
        assert!(state.contestants().is_empty());
    }

    #[test]
    fn ranking_two_to_one() {
        let (mut state, amy_id, ben_id) = state_with_amy_and_ben();
        state.submit_vote(&submission(&amy_id, "R1")).unwrap();
        state.submit_vote(&submission(&ben_id, "R2")).unwrap();
        state.submit_vote(&submission(&amy_id, "R3")).unwrap();
        let ranking = state.ranking();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].contestant.name, "Amy");
        assert_eq!(ranking[0].votes, 2);
        assert_eq!(ranking[1].contestant.name, "Ben");
        assert_eq!(ranking[1].votes, 1);
    }

    #[test]
    fn rejected_duplicate_leaves_the_ranking_unchanged() {
        let (mut state, amy_id, ben_id) = state_with_amy_and_ben();
        state.submit_vote(&submission(&amy_id, "R1")).unwrap();
        assert_eq!(
            state.submit_vote(&submission(&ben_id, "R1")),
            Err(RejectionReason::DuplicateReference)
        );
        let ranking = state.ranking();
        assert_eq!(ranking[0].contestant.name, "Amy");
        assert_eq!(ranking[0].votes, 1);
        assert_eq!(ranking[1].contestant.name, "Ben");
        assert_eq!(ranking[1].votes, 0);
    }

    #[test]
    fn removing_a_contestant_keeps_its_votes() {
        let (mut state, amy_id, _) = state_with_amy_and_ben();
        state.submit_vote(&submission(&amy_id, "R1")).unwrap();
        assert!(state.remove_contestant(&amy_id));
        assert_eq!(state.ledger().len(), 1);
        // The ranking is keyed off the roster, so the orphaned vote
        // no longer shows anywhere.
        assert_eq!(state.ranking().len(), 1);
        assert_eq!(state.ranking()[0].votes, 0);
    }

    #[test]
    fn reset_votes_empties_the_ledger_only() {
        let (mut state, amy_id, _) = state_with_amy_and_ben();
        state.submit_vote(&submission(&amy_id, "R1")).unwrap();
        state.reset_votes();
        assert!(state.ledger().is_empty());
        assert_eq!(state.contestants().len(), 2);
    }

    #[test]
    fn state_round_trips_through_a_store() {
        let (mut state, amy_id, _) = state_with_amy_and_ben();
        state.submit_vote(&submission(&amy_id, "R1")).unwrap();

        let mut store = MemoryStore::new();
        store.save_contestants(state.contestants()).unwrap();
        store.save_votes(state.ledger().all()).unwrap();

        let reloaded = PollState::load(&store);
        assert_eq!(reloaded, state);
    }
}
