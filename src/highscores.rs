//! High score tracking
//!
//! A single best score, persisted under [`SAVE_KEY_SCORE`] and written through
//! the moment it is beaten. The in-memory value is authoritative: a failed
//! write is logged and play continues.

use crate::consts::SAVE_KEY_SCORE;
use crate::error::Result;
use crate::persistence::KeyValueStore;

/// Read the persisted high score (0 when absent or unreadable)
pub fn load_high_score(store: &dyn KeyValueStore) -> u64 {
    match store.get(SAVE_KEY_SCORE) {
        Ok(Some(raw)) => match raw.trim().parse::<u64>() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(_) => {
                log::warn!("Ignoring malformed high score {:?}", raw);
                0
            }
        },
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Failed to read high score: {}", e);
            0
        }
    }
}

/// Persist a high score
pub fn save_high_score(store: &mut dyn KeyValueStore, score: u64) -> Result<()> {
    store.set(SAVE_KEY_SCORE, &score.to_string())
}

/// Raise `best` to `score` if it was beaten, writing through to `store`.
///
/// Returns true when the high score changed.
pub fn submit_score(best: &mut u64, score: u64, store: &mut dyn KeyValueStore) -> bool {
    if score <= *best {
        return false;
    }
    *best = score;
    if let Err(e) = save_high_score(store, score) {
        log::warn!("High score {} not persisted: {}", score, e);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::persistence::MemoryStore;

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("read only".to_string()))
        }
    }

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn test_load_malformed_is_zero() {
        let mut store = MemoryStore::new();
        store.set(SAVE_KEY_SCORE, "lots").unwrap();
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn test_submit_writes_through() {
        let mut store = MemoryStore::new();
        let mut best = 0;

        assert!(submit_score(&mut best, 20, &mut store));
        assert_eq!(best, 20);
        assert_eq!(load_high_score(&store), 20);

        // Lower or equal scores leave both copies untouched
        assert!(!submit_score(&mut best, 20, &mut store));
        assert!(!submit_score(&mut best, 5, &mut store));
        assert_eq!(load_high_score(&store), 20);
    }

    #[test]
    fn test_submit_survives_write_failure() {
        let mut store = ReadOnlyStore;
        let mut best = 100;
        assert!(submit_score(&mut best, 150, &mut store));
        assert_eq!(best, 150);
    }
}
