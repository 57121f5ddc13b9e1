//! Ledger records
//!
//! Plain data returned by read queries and carried by notifications.

use serde::{Deserialize, Serialize};

use crate::ProposalId;

/// A proposal submitted during the current cycle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub description: String,
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(id: ProposalId, description: impl Into<String>) -> Self {
        Proposal {
            id,
            description: description.into(),
            vote_count: 0,
        }
    }
}

/// Per-account view of the current cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    pub registered: bool,
    /// Number of proposals the account currently approves
    pub active_votes: u32,
    pub has_abstained: bool,
}

impl VoterRecord {
    /// Has the account cast at least one vote this cycle?
    pub fn has_voted(&self) -> bool {
        self.active_votes > 0
    }
}

/// Archived summary of one tallied cycle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyRecord {
    /// Lowest id among the tied winners
    pub winning_proposal_id: ProposalId,
    pub winning_proposal_description: String,
    pub winning_vote_count: u64,
    /// Number of proposals in the cycle at tally time
    pub total_proposals: u64,
}
