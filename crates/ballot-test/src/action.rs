//! Scripted operations

use ballot_core::{AccountId, BallotResult, ProposalId};
use ballot_runtime::VotingEngine;
use ballot_state::VotingMachine;

/// One mutating operation, without its caller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Admit(AccountId),
    Remove(AccountId),
    Advance,
    Reset,
    Submit(String),
    Vote(ProposalId),
    RemoveVote(ProposalId),
    Abstain,
    Tally,
}

impl Action {
    /// Apply to a bare state machine
    pub fn apply(&self, machine: &mut VotingMachine, caller: AccountId) -> BallotResult<()> {
        match self {
            Action::Admit(account) => machine.admit(caller, *account),
            Action::Remove(account) => machine.remove(caller, *account),
            Action::Advance => machine.advance(caller).map(|_| ()),
            Action::Reset => machine.reset(caller).map(|_| ()),
            Action::Submit(description) => machine.submit(caller, description).map(|_| ()),
            Action::Vote(proposal) => machine.vote(caller, *proposal).map(|_| ()),
            Action::RemoveVote(proposal) => machine.remove_vote(caller, *proposal).map(|_| ()),
            Action::Abstain => machine.abstain(caller),
            Action::Tally => machine.tally(caller).map(|_| ()),
        }
    }

    /// Apply through the shared engine
    pub fn apply_engine(&self, engine: &VotingEngine, caller: AccountId) -> BallotResult<()> {
        match self {
            Action::Admit(account) => engine.admit(caller, *account),
            Action::Remove(account) => engine.remove(caller, *account),
            Action::Advance => engine.advance(caller).map(|_| ()),
            Action::Reset => engine.reset(caller).map(|_| ()),
            Action::Submit(description) => engine.submit(caller, description).map(|_| ()),
            Action::Vote(proposal) => engine.vote(caller, *proposal).map(|_| ()),
            Action::RemoveVote(proposal) => engine.remove_vote(caller, *proposal).map(|_| ()),
            Action::Abstain => engine.abstain(caller),
            Action::Tally => engine.tally(caller).map(|_| ()),
        }
    }

    /// Operations only the operator may run
    pub fn is_operator_only(&self) -> bool {
        matches!(
            self,
            Action::Admit(_) | Action::Remove(_) | Action::Advance | Action::Reset | Action::Tally
        )
    }
}
