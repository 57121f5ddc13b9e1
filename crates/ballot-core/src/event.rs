//! Notification definitions
//!
//! Every accepted mutation produces one or more notifications. They are
//! published after the mutation commits; consumers that miss one are
//! expected to re-read state.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Generation, ProposalId, TallyRecord, WorkflowStage};

/// State-change notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallotEvent {
    /// The workflow moved from one stage to another
    StageChanged {
        previous: WorkflowStage,
        current: WorkflowStage,
    },
    VoterRegistered(AccountId),
    VoterRemoved(AccountId),
    ProposalRegistered(ProposalId),
    Voted {
        voter: AccountId,
        proposal: ProposalId,
    },
    /// A vote was retracted
    VoteUpdated {
        voter: AccountId,
        proposal: ProposalId,
    },
    Abstained(AccountId),
    VotesTallied(TallyRecord),
    /// Proposals and ballots were discarded; the cycle restarts
    CycleReset { generation: Generation },
}

impl BallotEvent {
    /// Stable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            BallotEvent::StageChanged { .. } => "stage_changed",
            BallotEvent::VoterRegistered(_) => "voter_registered",
            BallotEvent::VoterRemoved(_) => "voter_removed",
            BallotEvent::ProposalRegistered(_) => "proposal_registered",
            BallotEvent::Voted { .. } => "voted",
            BallotEvent::VoteUpdated { .. } => "vote_updated",
            BallotEvent::Abstained(_) => "abstained",
            BallotEvent::VotesTallied(_) => "votes_tallied",
            BallotEvent::CycleReset { .. } => "cycle_reset",
        }
    }

    /// Account the notification is about, if any
    pub fn account(&self) -> Option<AccountId> {
        match self {
            BallotEvent::VoterRegistered(id)
            | BallotEvent::VoterRemoved(id)
            | BallotEvent::Abstained(id) => Some(*id),
            BallotEvent::Voted { voter, .. } | BallotEvent::VoteUpdated { voter, .. } => {
                Some(*voter)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_account() {
        let voter = AccountId::new(9);
        let event = BallotEvent::Voted {
            voter,
            proposal: ProposalId::new(0),
        };
        assert_eq!(event.account(), Some(voter));
        assert_eq!(event.name(), "voted");

        let stage = BallotEvent::StageChanged {
            previous: WorkflowStage::RegisteringVoters,
            current: WorkflowStage::ProposalsRegistrationStarted,
        };
        assert_eq!(stage.account(), None);
    }
}
