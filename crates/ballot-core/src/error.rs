//! Error types for the ballot ledger

use std::fmt;

use thiserror::Error;

use crate::{AccountId, ProposalId, WorkflowStage};

/// Workflow transition attempted by the operator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Advance,
    Reset,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Advance => write!(f, "advance"),
            Transition::Reset => write!(f, "reset"),
        }
    }
}

/// Ballot ledger errors
///
/// Every error is reported before any state is touched, so a rejected call
/// leaves the cycle exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BallotError {
    // Authorization errors
    #[error("Unauthorized: {caller} is not the operator")]
    Unauthorized { caller: AccountId },

    // Workflow errors
    #[error("Stage violation: requires {required}, current stage is {current}")]
    StageViolation {
        required: WorkflowStage,
        current: WorkflowStage,
    },

    #[error("Invalid transition: cannot {transition} from {from}")]
    InvalidTransition {
        transition: Transition,
        from: WorkflowStage,
    },

    // Registry errors
    #[error("Voter {0} is already registered")]
    AlreadyRegistered(AccountId),

    #[error("Voter {0} is not registered")]
    NotRegistered(AccountId),

    #[error("Proposal not found: {0}")]
    NotFound(ProposalId),

    #[error("Proposal description is empty")]
    EmptyDescription,

    #[error("Proposal description too long: {len} bytes, limit {max}")]
    DescriptionTooLong { len: usize, max: usize },

    // Ballot errors
    #[error("Voter {voter} already voted for proposal {proposal}")]
    AlreadyVoted {
        voter: AccountId,
        proposal: ProposalId,
    },

    #[error("Voter {voter} has not voted for proposal {proposal}")]
    NotVoted {
        voter: AccountId,
        proposal: ProposalId,
    },

    #[error("Voter {0} has already abstained")]
    AlreadyAbstained(AccountId),

    #[error("Voter {0} holds active votes and cannot abstain")]
    AlreadyVotedConflict(AccountId),

    // Tally errors
    #[error("Nothing to tally: no proposals were submitted")]
    NothingToTally,
}

/// Result type for ballot operations
pub type BallotResult<T> = Result<T, BallotError>;
