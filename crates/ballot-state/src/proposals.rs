//! Proposal registry - append-only within a cycle

use ballot_core::{BallotError, BallotResult, Proposal, ProposalId};

/// Proposals of the current cycle, indexed by id
#[derive(Debug, Default, Clone)]
pub struct ProposalRegistry {
    proposals: Vec<Proposal>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        ProposalRegistry::default()
    }

    /// Append a proposal and return its id
    pub fn push(&mut self, description: impl Into<String>) -> ProposalId {
        let id = ProposalId::from_index(self.proposals.len());
        self.proposals.push(Proposal::new(id, description));
        id
    }

    /// Get a proposal by id
    pub fn get(&self, id: ProposalId) -> BallotResult<&Proposal> {
        self.proposals
            .get(id.index())
            .ok_or(BallotError::NotFound(id))
    }

    /// Fail with `NotFound` unless the id is in range
    pub fn require(&self, id: ProposalId) -> BallotResult<()> {
        self.get(id).map(|_| ())
    }

    pub fn contains(&self, id: ProposalId) -> bool {
        id.index() < self.proposals.len()
    }

    /// Add one vote to a proposal
    pub(crate) fn increment(&mut self, id: ProposalId) -> BallotResult<u64> {
        let proposal = self
            .proposals
            .get_mut(id.index())
            .ok_or(BallotError::NotFound(id))?;
        proposal.vote_count += 1;
        Ok(proposal.vote_count)
    }

    /// Remove one vote from a proposal, never going below zero
    pub(crate) fn decrement(&mut self, id: ProposalId) -> BallotResult<u64> {
        let proposal = self
            .proposals
            .get_mut(id.index())
            .ok_or(BallotError::NotFound(id))?;
        proposal.vote_count = proposal.vote_count.saturating_sub(1);
        Ok(proposal.vote_count)
    }

    pub(crate) fn clear(&mut self) {
        self.proposals.clear();
    }

    /// All proposals in id order
    pub fn as_slice(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn count(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}
