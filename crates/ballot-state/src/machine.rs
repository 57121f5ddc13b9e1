//! Voting machine - caller-gated operations over one cycle
//!
//! Every mutation runs the same pipeline:
//! 1. Operator check (operator-only operations)
//! 2. Stage guard
//! 3. Eligibility check (participant operations)
//! 4. Operation-specific checks
//! 5. Mutation, then notifications queued in the outbox
//!
//! All checks complete before the first write, so a rejected call changes
//! nothing and queues nothing.

use tracing::{debug, info};

use ballot_core::{
    AccountId, BallotError, BallotEvent, BallotResult, Generation, Proposal, ProposalId,
    TallyRecord, VoterRecord, WorkflowStage,
};

use crate::{tally, Cycle, HistoryArchive, MachineConfig, ParticipantRegistry};

/// Single-threaded voting state machine
#[derive(Debug, Clone)]
pub struct VotingMachine {
    /// Fixed for the machine's lifetime
    operator: AccountId,
    config: MachineConfig,
    cycle: Cycle,
    participants: ParticipantRegistry,
    archive: HistoryArchive,
    /// Notifications not yet handed to a publisher
    outbox: Vec<BallotEvent>,
}

impl VotingMachine {
    /// Create a machine with default configuration
    pub fn new(operator: AccountId) -> Self {
        Self::with_config(operator, MachineConfig::default())
    }

    pub fn with_config(operator: AccountId, config: MachineConfig) -> Self {
        VotingMachine {
            operator,
            config,
            cycle: Cycle::new(),
            participants: ParticipantRegistry::new(),
            archive: HistoryArchive::new(),
            outbox: Vec::new(),
        }
    }

    pub fn operator(&self) -> AccountId {
        self.operator
    }

    fn require_operator(&self, caller: AccountId) -> BallotResult<()> {
        if caller == self.operator {
            Ok(())
        } else {
            Err(BallotError::Unauthorized { caller })
        }
    }

    fn validate_description(&self, description: &str) -> BallotResult<()> {
        if description.trim().is_empty() {
            return Err(BallotError::EmptyDescription);
        }
        if description.len() > self.config.max_description_len {
            return Err(BallotError::DescriptionTooLong {
                len: description.len(),
                max: self.config.max_description_len,
            });
        }
        Ok(())
    }

    // --- Workflow ---

    /// Move the workflow one stage forward
    pub fn advance(&mut self, caller: AccountId) -> BallotResult<WorkflowStage> {
        self.require_operator(caller)?;
        let (previous, current) = self.cycle.advance()?;

        info!(%previous, %current, label = current.label(), "workflow advanced");
        self.outbox
            .push(BallotEvent::StageChanged { previous, current });
        Ok(current)
    }

    /// Start a new cycle after a tally
    pub fn reset(&mut self, caller: AccountId) -> BallotResult<Generation> {
        self.require_operator(caller)?;
        let generation = self.cycle.reset()?;

        info!(%generation, "cycle reset");
        self.outbox.push(BallotEvent::StageChanged {
            previous: WorkflowStage::VotesTallied,
            current: WorkflowStage::RegisteringVoters,
        });
        self.outbox.push(BallotEvent::CycleReset { generation });
        Ok(generation)
    }

    // --- Participants ---

    /// Admit a participant
    pub fn admit(&mut self, caller: AccountId, account: AccountId) -> BallotResult<()> {
        self.require_operator(caller)?;
        self.cycle.require_stage(WorkflowStage::RegisteringVoters)?;
        self.participants.admit(account)?;

        debug!(%account, "voter registered");
        self.outbox.push(BallotEvent::VoterRegistered(account));
        Ok(())
    }

    /// Remove a participant. Ballots already cast stay counted.
    pub fn remove(&mut self, caller: AccountId, account: AccountId) -> BallotResult<()> {
        self.require_operator(caller)?;
        self.participants.remove(account)?;

        debug!(%account, "voter removed");
        self.outbox.push(BallotEvent::VoterRemoved(account));
        Ok(())
    }

    // --- Proposals ---

    /// Submit a proposal, returning its id
    pub fn submit(&mut self, caller: AccountId, description: &str) -> BallotResult<ProposalId> {
        self.cycle
            .require_stage(WorkflowStage::ProposalsRegistrationStarted)?;
        self.participants.require(caller)?;
        self.validate_description(description)?;

        let id = self.cycle.proposals_mut().push(description);

        debug!(%caller, proposal = %id, "proposal registered");
        self.outbox.push(BallotEvent::ProposalRegistered(id));
        Ok(id)
    }

    // --- Ballots ---

    /// Approve a proposal, returning its new vote count
    pub fn vote(&mut self, caller: AccountId, proposal: ProposalId) -> BallotResult<u64> {
        self.cycle.require_stage(WorkflowStage::VotingSessionStarted)?;
        self.participants.require(caller)?;
        self.cycle.proposals().require(proposal)?;

        self.cycle.ledger_mut().cast(caller, proposal)?;
        let count = self.cycle.proposals_mut().increment(proposal)?;

        debug!(%caller, %proposal, count, "vote cast");
        self.outbox.push(BallotEvent::Voted {
            voter: caller,
            proposal,
        });
        Ok(count)
    }

    /// Retract an approval, returning the proposal's new vote count
    pub fn remove_vote(&mut self, caller: AccountId, proposal: ProposalId) -> BallotResult<u64> {
        self.cycle.require_stage(WorkflowStage::VotingSessionStarted)?;
        self.participants.require(caller)?;

        self.cycle.ledger_mut().retract(caller, proposal)?;
        let count = self.cycle.proposals_mut().decrement(proposal)?;

        debug!(%caller, %proposal, count, "vote retracted");
        self.outbox.push(BallotEvent::VoteUpdated {
            voter: caller,
            proposal,
        });
        Ok(count)
    }

    /// Abstain for the rest of the cycle
    pub fn abstain(&mut self, caller: AccountId) -> BallotResult<()> {
        self.cycle.require_stage(WorkflowStage::VotingSessionStarted)?;
        self.participants.require(caller)?;
        self.cycle.ledger_mut().abstain(caller)?;

        debug!(%caller, "abstained");
        self.outbox.push(BallotEvent::Abstained(caller));
        Ok(())
    }

    // --- Tally ---

    /// Tally the cycle, archive the result and close the workflow
    pub fn tally(&mut self, caller: AccountId) -> BallotResult<TallyRecord> {
        self.require_operator(caller)?;
        self.cycle.require_stage(WorkflowStage::VotingSessionEnded)?;

        let outcome = tally::tally(self.cycle.proposals().as_slice())?;
        let winners = outcome.winners.len();
        let (previous, current) = self.cycle.conclude(outcome.winners)?;
        self.archive.record(outcome.record.clone());

        info!(
            winner = %outcome.record.winning_proposal_id,
            votes = outcome.record.winning_vote_count,
            tied = winners,
            cycles = self.archive.len(),
            "votes tallied"
        );
        self.outbox
            .push(BallotEvent::StageChanged { previous, current });
        self.outbox.push(BallotEvent::VotesTallied(outcome.record.clone()));
        Ok(outcome.record)
    }

    // --- Queries ---

    pub fn stage(&self) -> WorkflowStage {
        self.cycle.stage()
    }

    pub fn generation(&self) -> Generation {
        self.cycle.generation()
    }

    pub fn is_registered(&self, account: AccountId) -> bool {
        self.participants.contains(account)
    }

    pub fn participants(&self) -> &[AccountId] {
        self.participants.members()
    }

    pub fn proposal(&self, id: ProposalId) -> BallotResult<&Proposal> {
        self.cycle.proposals().get(id)
    }

    pub fn proposal_count(&self) -> usize {
        self.cycle.proposals().count()
    }

    pub fn proposals(&self) -> &[Proposal] {
        self.cycle.proposals().as_slice()
    }

    pub fn has_voted_for(&self, account: AccountId, proposal: ProposalId) -> bool {
        self.cycle.ledger().has_voted_for(account, proposal)
    }

    /// Registration and ballot status of an account in the current cycle
    pub fn voter(&self, account: AccountId) -> VoterRecord {
        let ledger = self.cycle.ledger();
        VoterRecord {
            registered: self.participants.contains(account),
            active_votes: ledger.active_votes(account),
            has_abstained: ledger.has_abstained(account),
        }
    }

    /// Winner set of the latest tally; empty until the cycle is tallied
    pub fn winners(&self) -> &[Proposal] {
        self.cycle.winners()
    }

    pub fn history(&self) -> &[TallyRecord] {
        self.archive.records()
    }

    /// Summary of the most recent tally across all cycles
    pub fn latest_result(&self) -> Option<&TallyRecord> {
        self.archive.latest()
    }

    // --- Outbox ---

    /// Notifications queued since the last drain
    pub fn pending_events(&self) -> &[BallotEvent] {
        &self.outbox
    }

    /// Take every queued notification, oldest first
    pub fn drain_events(&mut self) -> Vec<BallotEvent> {
        std::mem::take(&mut self.outbox)
    }
}
