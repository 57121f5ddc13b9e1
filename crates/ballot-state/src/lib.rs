//! Ballot State Engine - the voting ledger and workflow controller
//!
//! This crate implements one voting cycle end to end:
//! - Workflow stage gating
//! - Participant registry
//! - Proposal registry
//! - Ballot ledger with per-generation invalidation
//! - Tie-preserving tally
//! - History archive
//!
//! [`VotingMachine`] ties these together behind caller-checked operations.
//! It is single-threaded; serialization across threads is the runtime's job.

pub mod archive;
pub mod config;
pub mod cycle;
pub mod ledger;
pub mod machine;
pub mod proposals;
pub mod registry;
pub mod tally;

pub use archive::*;
pub use config::*;
pub use cycle::*;
pub use ledger::*;
pub use machine::*;
pub use proposals::*;
pub use registry::*;
pub use tally::*;
