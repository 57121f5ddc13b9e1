//! Voting cycle - stage, proposals and ballots of the active round

use ballot_core::{
    BallotError, BallotResult, Generation, Proposal, Transition, WorkflowStage,
};

use crate::{BallotLedger, ProposalRegistry};

/// The single active cycle
///
/// Owns everything that a reset discards. Participants and the archive live
/// outside the cycle.
#[derive(Debug, Default, Clone)]
pub struct Cycle {
    stage: WorkflowStage,
    proposals: ProposalRegistry,
    ledger: BallotLedger,
    /// Winner set of the tally that closed this cycle
    winners: Vec<Proposal>,
}

impl Cycle {
    pub fn new() -> Self {
        Cycle::default()
    }

    pub fn stage(&self) -> WorkflowStage {
        self.stage
    }

    pub fn generation(&self) -> Generation {
        self.ledger.generation()
    }

    pub fn proposals(&self) -> &ProposalRegistry {
        &self.proposals
    }

    pub fn ledger(&self) -> &BallotLedger {
        &self.ledger
    }

    pub fn winners(&self) -> &[Proposal] {
        &self.winners
    }

    pub(crate) fn proposals_mut(&mut self) -> &mut ProposalRegistry {
        &mut self.proposals
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut BallotLedger {
        &mut self.ledger
    }

    /// Stage guard run before every gated operation
    pub fn require_stage(&self, required: WorkflowStage) -> BallotResult<()> {
        if self.stage == required {
            Ok(())
        } else {
            Err(BallotError::StageViolation {
                required,
                current: self.stage,
            })
        }
    }

    /// Move to the next stage, returning `(previous, current)`
    pub fn advance(&mut self) -> BallotResult<(WorkflowStage, WorkflowStage)> {
        let previous = self.stage;
        let next = previous.next().ok_or(BallotError::InvalidTransition {
            transition: Transition::Advance,
            from: previous,
        })?;

        self.stage = next;
        Ok((previous, next))
    }

    /// Discard proposals and ballots and return to the first stage
    ///
    /// Ballots are invalidated by bumping the generation, not by deleting
    /// entries.
    pub fn reset(&mut self) -> BallotResult<Generation> {
        if !self.stage.is_terminal() {
            return Err(BallotError::InvalidTransition {
                transition: Transition::Reset,
                from: self.stage,
            });
        }

        self.stage = WorkflowStage::RegisteringVoters;
        self.proposals.clear();
        self.winners.clear();
        Ok(self.ledger.invalidate())
    }

    /// Close the cycle with a tallied winner set
    pub(crate) fn conclude(
        &mut self,
        winners: Vec<Proposal>,
    ) -> BallotResult<(WorkflowStage, WorkflowStage)> {
        self.require_stage(WorkflowStage::VotingSessionEnded)?;
        let transition = self.advance()?;
        self.winners = winners;
        Ok(transition)
    }
}
