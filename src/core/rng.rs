//! Deterministic id generation for history entries.
//!
//! History entries need ids that are unique across devices, because imported
//! histories are merged by id. Ids combine the completion timestamp with a
//! random suffix drawn from a seeded ChaCha8 stream, so tests can fix the seed
//! and get reproducible ids.
//!
//! ```
//! use skyjo_ledger::core::EntryIdGen;
//!
//! let mut a = EntryIdGen::new(42);
//! let mut b = EntryIdGen::new(42);
//! assert_eq!(a.next_id(1_700_000_000_000), b.next_id(1_700_000_000_000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded generator for history entry ids.
#[derive(Clone, Debug)]
pub struct EntryIdGen {
    inner: ChaCha8Rng,
    seed: u64,
}

impl EntryIdGen {
    /// Create a generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator seeded from the OS.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Produce the next id for a game completed at `timestamp_ms`.
    pub fn next_id(&mut self, timestamp_ms: i64) -> String {
        let suffix: u32 = self.inner.gen();
        format!("{timestamp_ms}-{suffix:08x}")
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> EntryIdGenState {
        EntryIdGenState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &EntryIdGenState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable generator state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryIdGenState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
}
