//! Pure scoring over a sequence of rounds.
//!
//! `RoundLedger` knows nothing about session status; `session` calls into it
//! to score a round and to recompute totals after every change.

pub mod round_ledger;

pub use round_ledger::RoundLedger;
