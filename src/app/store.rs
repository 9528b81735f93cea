// JSON file persistence for the poll state.
//
// One file, two keys, the whole collection rewritten under its key on each
// save. Reads degrade to the empty poll on any failure, which covers both a
// fresh install and a corrupt file.

use std::fs;
use std::path::PathBuf;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use poll_core::{Contestant, Store, StoreError, Vote};

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    contestants: Vec<Contestant>,
    #[serde(default)]
    votes: Vec<Vote>,
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: &str) -> JsonFileStore {
        JsonFileStore {
            path: PathBuf::from(path),
        }
    }

    fn read_state(&self) -> StateFile {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                debug!("read_state: no state at {:?} ({}), starting empty", self.path, e);
                return StateFile::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(state) => state,
            Err(e) => {
                // A corrupt state file is recovered as an empty poll,
                // never propagated to the user.
                warn!(
                    "read_state: unparsable state file {:?} ({}), starting empty",
                    self.path, e
                );
                StateFile::default()
            }
        }
    }

    fn write_state(&self, state: &StateFile) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| {
            StoreError::WriteFailed(format!("{}: {}", self.path.display(), e))
        })
    }
}

impl Store for JsonFileStore {
    fn load_contestants(&self) -> Vec<Contestant> {
        self.read_state().contestants
    }

    fn load_votes(&self) -> Vec<Vote> {
        self.read_state().votes
    }

    // Saving one collection is a read-modify-write so the other key
    // survives untouched.

    fn save_contestants(&mut self, contestants: &[Contestant]) -> Result<(), StoreError> {
        let mut state = self.read_state();
        state.contestants = contestants.to_vec();
        self.write_state(&state)
    }

    fn save_votes(&mut self, votes: &[Vote]) -> Result<(), StoreError> {
        let mut state = self.read_state();
        state.votes = votes.to_vec();
        self.write_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> JsonFileStore {
        let path = std::env::temp_dir().join(format!(
            "legendpoll_test_{}_{}.json",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        JsonFileStore {
            path,
        }
    }

    fn contestant(id: &str, name: &str) -> Contestant {
        Contestant {
            id: id.to_string(),
            name: name.to_string(),
            photo: String::new(),
        }
    }

    #[test]
    fn missing_file_is_an_empty_poll() {
        let store = temp_store("missing");
        assert!(store.load_contestants().is_empty());
        assert!(store.load_votes().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_empty_poll() {
        let store = temp_store("corrupt");
        fs::write(&store.path, "{not json").unwrap();
        assert!(store.load_contestants().is_empty());
        assert!(store.load_votes().is_empty());
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn collections_round_trip() {
        let mut store = temp_store("roundtrip");
        let roster = vec![contestant("p1", "Amy"), contestant("p2", "Ben")];
        let votes = vec![Vote {
            id: "v1".to_string(),
            contestant_id: "p1".to_string(),
            contestant_name: "Amy".to_string(),
            paid_phone: "0700000000".to_string(),
            reference: "R1".to_string(),
            voter_name: Some("Doe, Jane".to_string()),
            timestamp: 1700000000000,
            amount: None,
        }];
        store.save_contestants(&roster).unwrap();
        store.save_votes(&votes).unwrap();

        assert_eq!(store.load_contestants(), roster);
        assert_eq!(store.load_votes(), votes);
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn saving_one_key_keeps_the_other() {
        let mut store = temp_store("two_keys");
        let roster = vec![contestant("p1", "Amy")];
        store.save_contestants(&roster).unwrap();
        store.save_votes(&[]).unwrap();
        assert_eq!(store.load_contestants(), roster);
        let _ = fs::remove_file(&store.path);
    }
}
