//! Ballot Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every layer of the ballot ledger:
//! - Identifiers (AccountId, ProposalId, Generation)
//! - Workflow stages of a voting cycle
//! - Records (proposals, voter records, tally records)
//! - Notifications emitted after a state change
//! - Errors

pub mod id;
pub mod stage;
pub mod record;
pub mod event;
pub mod error;

pub use id::*;
pub use stage::*;
pub use record::*;
pub use event::*;
pub use error::*;
