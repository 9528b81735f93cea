/*!

# Quick start

This example runs a small poll end to end, entirely in memory. The same
operations back the `legendpoll` command line tool; the only difference there
is that the state is reloaded from a JSON file before each command and saved
back after each mutation.

A poll starts from an empty [crate::PollState]. The organizer registers the
contestants, the public submits votes and the leaderboard is derived on
demand:

```
use poll_core::{PollState, RejectionReason, VoteSubmission};

let mut state = PollState::default();
let amy = state.add_contestant("Amy", "")?;
let ben = state.add_contestant("Ben", "")?;

let vote = state.submit_vote(&VoteSubmission {
    contestant_id: amy.id.clone(),
    paid_phone: "0709467472".to_string(),
    reference: "TX-1001".to_string(),
    voter_name: None,
    amount: Some("200".to_string()),
})?;
assert_eq!(vote.contestant_name, "Amy");

// The payment reference is the deduplication key: reusing it is rejected,
// even for a different contestant.
let again = state.submit_vote(&VoteSubmission {
    contestant_id: ben.id.clone(),
    paid_phone: "0700000000".to_string(),
    reference: "TX-1001".to_string(),
    voter_name: None,
    amount: None,
});
assert_eq!(again, Err(RejectionReason::DuplicateReference));

let ranking = state.ranking();
assert_eq!(ranking[0].contestant.name, "Amy");
assert_eq!(ranking[0].votes, 1);
assert_eq!(ranking[1].votes, 0);
# Ok::<(), RejectionReason>(())
```

To persist the poll between runs, implement [crate::Store] (or use
[crate::MemoryStore] in tests) and save the two collections after each
mutation:

```
use poll_core::{MemoryStore, PollState, Store};

let mut store = MemoryStore::new();
let mut state = PollState::load(&store);
state.add_contestant("Amy", "").unwrap();
store.save_contestants(state.contestants()).unwrap();

assert_eq!(PollState::load(&store), state);
```

The export side is a pure function over the ledger: see [crate::export_rows]
and [crate::encode] for producing the CSV document.

*/
