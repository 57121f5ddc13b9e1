//! Identity types for the ballot ledger
//!
//! All identifiers are 64-bit. Account identities are opaque to the ledger:
//! the wallet/session layer maps whatever it authenticates onto an
//! `AccountId` before calling in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account identity - the caller of every operation
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    #[inline]
    pub fn new(id: u64) -> Self {
        AccountId(id)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({:016x})", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Proposal identity - sequential, 0-based, stable for one cycle
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ProposalId(pub u64);

impl ProposalId {
    #[inline]
    pub fn new(id: u64) -> Self {
        ProposalId(id)
    }

    /// Position of the proposal in its registry
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Self {
        ProposalId(index as u64)
    }
}

impl fmt::Debug for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proposal(#{})", self.0)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cycle generation - bumped on every reset
///
/// Ballot entries are tagged with the generation they were cast in. An entry
/// from an older generation reads as absent.
///
/// The counter wraps after `u64::MAX` resets. Entries survive a wrap only if
/// nothing was written to the ledger in between, since the first write after
/// a reset drops every stale generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub const GENESIS: Generation = Generation(0);

    #[inline]
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gen({})", self.0)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
