// The persistence contract.
//
// The poll state is held in a key-value store with two collections. Reads
// never fail: an absent or unreadable value degrades to the empty collection,
// which the caller cannot distinguish from a fresh install.

use std::error::Error;
use std::fmt::Display;

use crate::model::{Contestant, Vote};

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum StoreError {
    WriteFailed(String),
}

impl Error for StoreError {}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::WriteFailed(msg) => write!(f, "could not persist the poll state: {}", msg),
        }
    }
}

/// Key-value persistence for the two poll collections.
///
/// Implementations must round-trip the data model losslessly. Each save
/// replaces the whole collection under its key.
pub trait Store {
    fn load_contestants(&self) -> Vec<Contestant>;
    fn load_votes(&self) -> Vec<Vote>;
    fn save_contestants(&mut self, contestants: &[Contestant]) -> Result<(), StoreError>;
    fn save_votes(&mut self, votes: &[Vote]) -> Result<(), StoreError>;
}

/// Store backed by process memory. Meant for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contestants: Vec<Contestant>,
    votes: Vec<Vote>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn load_contestants(&self) -> Vec<Contestant> {
        self.contestants.clone()
    }

    fn load_votes(&self) -> Vec<Vote> {
        self.votes.clone()
    }

    fn save_contestants(&mut self, contestants: &[Contestant]) -> Result<(), StoreError> {
        self.contestants = contestants.to_vec();
        Ok(())
    }

    fn save_votes(&mut self, votes: &[Vote]) -> Result<(), StoreError> {
        self.votes = votes.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.load_contestants().is_empty());
        assert!(store.load_votes().is_empty());
    }

    #[test]
    fn saved_collections_read_back() {
        let mut store = MemoryStore::new();
        let roster = vec![Contestant {
            id: "p1".to_string(),
            name: "Amy".to_string(),
            photo: String::new(),
        }];
        store.save_contestants(&roster).unwrap();
        assert_eq!(store.load_contestants(), roster);
    }
}
