use std::collections::HashMap;

use log::debug;

use crate::model::{Contestant, RankEntry, Vote};

/// Derives the leaderboard from the current contents of the vote collection.
///
/// One entry per contestant, zero-vote contestants included, sorted by
/// descending vote count. The sort is stable: contestants with equal counts
/// keep their relative order from the input roster. Votes that reference an
/// unknown contestant are not counted anywhere.
pub fn rank(contestants: &[Contestant], votes: &[Vote]) -> Vec<RankEntry> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for v in votes.iter() {
        *counts.entry(v.contestant_id.as_str()).or_insert(0) += 1;
    }
    debug!("rank: {:?} contestants, counts: {:?}", contestants.len(), counts);

    let mut entries: Vec<RankEntry> = contestants
        .iter()
        .map(|c| RankEntry {
            contestant: c.clone(),
            votes: counts.get(c.id.as_str()).cloned().unwrap_or(0),
        })
        .collect();
    // Vec::sort_by_key is stable, which guarantees the tie-break order.
    entries.sort_by_key(|e| std::cmp::Reverse(e.votes));
    entries
}

/// Width of a proportional progress bar, in percent.
///
/// The divisor is floored at 1 so that an all-zero leaderboard renders
/// empty bars instead of dividing by zero.
pub fn bar_percent(count: u64, max_count: u64) -> u64 {
    count * 100 / max_count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contestant(id: &str, name: &str) -> Contestant {
        Contestant {
            id: id.to_string(),
            name: name.to_string(),
            photo: String::new(),
        }
    }

    fn vote(reference: &str, contestant_id: &str) -> Vote {
        Vote {
            id: reference.to_string(),
            contestant_id: contestant_id.to_string(),
            contestant_name: String::new(),
            paid_phone: "0700000000".to_string(),
            reference: reference.to_string(),
            voter_name: None,
            timestamp: 0,
            amount: None,
        }
    }

    #[test]
    fn one_entry_per_contestant_even_with_unknown_votes() {
        let roster = vec![contestant("p1", "Amy"), contestant("p2", "Ben")];
        let votes = vec![vote("R1", "p1"), vote("R2", "ghost"), vote("R3", "ghost")];
        let entries = rank(&roster, &votes);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].contestant.id, "p1");
        assert_eq!(entries[0].votes, 1);
        assert_eq!(entries[1].votes, 0);
    }

    #[test]
    fn ties_keep_roster_order() {
        let roster = vec![
            contestant("a", "A"),
            contestant("b", "B"),
            contestant("c", "C"),
        ];
        let entries = rank(&roster, &[]);
        let ids: Vec<&str> = entries.iter().map(|e| e.contestant.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn sorted_by_descending_count() {
        let roster = vec![contestant("p1", "Amy"), contestant("p2", "Ben")];
        let votes = vec![vote("R1", "p2"), vote("R2", "p2"), vote("R3", "p1")];
        let entries = rank(&roster, &votes);
        assert_eq!(entries[0].contestant.name, "Ben");
        assert_eq!(entries[0].votes, 2);
        assert_eq!(entries[1].contestant.name, "Amy");
        assert_eq!(entries[1].votes, 1);
    }

    #[test]
    fn empty_roster_is_empty_output() {
        assert!(rank(&[], &[vote("R1", "p1")]).is_empty());
    }

    #[test]
    fn bar_percent_floors_the_divisor() {
        assert_eq!(bar_percent(0, 0), 0);
        assert_eq!(bar_percent(2, 2), 100);
        assert_eq!(bar_percent(1, 2), 50);
    }
}
