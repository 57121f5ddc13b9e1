//! Workflow stage definitions
//!
//! A voting cycle walks six stages in strict order:
//! - RegisteringVoters: the operator admits participants
//! - ProposalsRegistrationStarted: participants submit proposals
//! - ProposalsRegistrationEnded: submissions closed
//! - VotingSessionStarted: participants vote, retract or abstain
//! - VotingSessionEnded: ballots closed, awaiting tally
//! - VotesTallied: results available, cycle may be reset

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stage of the voting cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum WorkflowStage {
    #[default]
    RegisteringVoters = 0,
    ProposalsRegistrationStarted = 1,
    ProposalsRegistrationEnded = 2,
    VotingSessionStarted = 3,
    VotingSessionEnded = 4,
    VotesTallied = 5,
}

impl WorkflowStage {
    /// All stages in cycle order
    pub const ALL: [WorkflowStage; 6] = [
        WorkflowStage::RegisteringVoters,
        WorkflowStage::ProposalsRegistrationStarted,
        WorkflowStage::ProposalsRegistrationEnded,
        WorkflowStage::VotingSessionStarted,
        WorkflowStage::VotingSessionEnded,
        WorkflowStage::VotesTallied,
    ];

    /// Parse from the numeric stage code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(WorkflowStage::RegisteringVoters),
            1 => Some(WorkflowStage::ProposalsRegistrationStarted),
            2 => Some(WorkflowStage::ProposalsRegistrationEnded),
            3 => Some(WorkflowStage::VotingSessionStarted),
            4 => Some(WorkflowStage::VotingSessionEnded),
            5 => Some(WorkflowStage::VotesTallied),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The stage that follows this one, `None` at the terminal stage
    pub fn next(self) -> Option<Self> {
        Self::from_code(self.code() + 1)
    }

    /// Is this the last stage of the cycle?
    pub fn is_terminal(self) -> bool {
        self == WorkflowStage::VotesTallied
    }

    /// Short human-readable label
    pub fn label(self) -> &'static str {
        match self {
            WorkflowStage::RegisteringVoters => "Registering voters",
            WorkflowStage::ProposalsRegistrationStarted => "Proposals registration started",
            WorkflowStage::ProposalsRegistrationEnded => "Proposals registration ended",
            WorkflowStage::VotingSessionStarted => "Voting session started",
            WorkflowStage::VotingSessionEnded => "Voting session ended",
            WorkflowStage::VotesTallied => "Votes tallied",
        }
    }

    /// One-line description of what happens during the stage
    pub fn description(self) -> &'static str {
        match self {
            WorkflowStage::RegisteringVoters => {
                "The operator admits the participants allowed to take part."
            }
            WorkflowStage::ProposalsRegistrationStarted => "Participants submit their proposals.",
            WorkflowStage::ProposalsRegistrationEnded => "The operator has closed submissions.",
            WorkflowStage::VotingSessionStarted => {
                "Participants vote for the proposals they approve of."
            }
            WorkflowStage::VotingSessionEnded => "Ballots are closed and awaiting the tally.",
            WorkflowStage::VotesTallied => "Results are available.",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::RegisteringVoters => "RegisteringVoters",
            WorkflowStage::ProposalsRegistrationStarted => "ProposalsRegistrationStarted",
            WorkflowStage::ProposalsRegistrationEnded => "ProposalsRegistrationEnded",
            WorkflowStage::VotingSessionStarted => "VotingSessionStarted",
            WorkflowStage::VotingSessionEnded => "VotingSessionEnded",
            WorkflowStage::VotesTallied => "VotesTallied",
        };
        write!(f, "{}({})", name, self.code())
    }
}
