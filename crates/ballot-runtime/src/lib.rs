//! Ballot Runtime - the shared voting engine
//!
//! Wraps the single-threaded [`ballot_state::VotingMachine`] for use from
//! many callers:
//! 1. Serialize mutations behind one lock
//! 2. Serve reads from consistent views
//! 3. Publish notifications after each committed mutation
//! 4. Count accepted and rejected operations
//! 5. Export snapshots
//! 6. Install logging

pub mod config;
pub mod engine;
pub mod snapshot;
pub mod telemetry;

pub use config::*;
pub use engine::*;
pub use snapshot::*;
pub use telemetry::*;
