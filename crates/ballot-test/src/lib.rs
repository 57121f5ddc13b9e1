//! Ballot Test Harness - protocol validation for the voting ledger
//!
//! This crate provides:
//! - Scripted actions shared by every driver
//! - Scenario runs against the shared engine, with captured notifications
//! - Seeded random operation fuzzing with invariant checks

pub mod action;
pub mod fuzzer;
pub mod scenario;

pub use action::*;
pub use fuzzer::*;
pub use scenario::*;
