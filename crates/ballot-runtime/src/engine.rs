//! Voting engine - shared, serialized access to one voting machine

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use ballot_core::{
    AccountId, BallotEvent, BallotResult, Generation, Proposal, ProposalId, TallyRecord,
    VoterRecord, WorkflowStage,
};
use ballot_state::VotingMachine;

use crate::{EngineConfig, EngineSnapshot};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub accepted: u64,
    pub rejected: u64,
    pub notifications_sent: u64,
    /// Notifications published while nobody was subscribed
    pub notifications_unheard: u64,
}

/// Thread-safe voting engine
///
/// Mutations take the write lock for their whole check-mutate-publish
/// sequence, so notifications leave in commit order. Reads share the read
/// lock and never see a half-applied mutation.
pub struct VotingEngine {
    machine: RwLock<VotingMachine>,
    notifier: broadcast::Sender<BallotEvent>,
    stats: Mutex<EngineStats>,
    config: EngineConfig,
}

impl VotingEngine {
    pub fn new(config: EngineConfig) -> Self {
        let (notifier, _) = broadcast::channel(config.notification_capacity.max(1));
        VotingEngine {
            machine: RwLock::new(VotingMachine::with_config(
                config.operator,
                config.machine.clone(),
            )),
            notifier,
            stats: Mutex::new(EngineStats::default()),
            config,
        }
    }

    /// Engine with default configuration for the given operator
    pub fn with_operator(operator: AccountId) -> Self {
        Self::new(EngineConfig::new(operator))
    }

    /// Receive every notification published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<BallotEvent> {
        self.notifier.subscribe()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats.lock().clone()
    }

    fn mutate<T>(
        &self,
        op: &'static str,
        caller: AccountId,
        f: impl FnOnce(&mut VotingMachine) -> BallotResult<T>,
    ) -> BallotResult<T> {
        let mut machine = self.machine.write();
        match f(&mut *machine) {
            Ok(value) => {
                let (sent, unheard) = self.publish(machine.drain_events());
                drop(machine);

                let mut stats = self.stats.lock();
                stats.accepted += 1;
                stats.notifications_sent += sent;
                stats.notifications_unheard += unheard;
                Ok(value)
            }
            Err(err) => {
                drop(machine);
                warn!(op, %caller, error = %err, "operation rejected");
                self.stats.lock().rejected += 1;
                Err(err)
            }
        }
    }

    fn publish(&self, events: Vec<BallotEvent>) -> (u64, u64) {
        let mut sent = 0;
        let mut unheard = 0;
        for event in events {
            match event.account() {
                Some(account) => debug!(event = event.name(), %account, "notify"),
                None => debug!(event = event.name(), "notify"),
            }
            match self.notifier.send(event) {
                Ok(_) => sent += 1,
                Err(_) => unheard += 1,
            }
        }
        (sent, unheard)
    }

    /// Run a read against a consistent view of the machine
    pub fn view<T>(&self, f: impl FnOnce(&VotingMachine) -> T) -> T {
        f(&*self.machine.read())
    }

    // --- Operator operations ---

    pub fn admit(&self, caller: AccountId, account: AccountId) -> BallotResult<()> {
        self.mutate("admit", caller, |m| m.admit(caller, account))
    }

    pub fn remove(&self, caller: AccountId, account: AccountId) -> BallotResult<()> {
        self.mutate("remove", caller, |m| m.remove(caller, account))
    }

    pub fn advance(&self, caller: AccountId) -> BallotResult<WorkflowStage> {
        self.mutate("advance", caller, |m| m.advance(caller))
    }

    pub fn reset(&self, caller: AccountId) -> BallotResult<Generation> {
        self.mutate("reset", caller, |m| m.reset(caller))
    }

    pub fn tally(&self, caller: AccountId) -> BallotResult<TallyRecord> {
        self.mutate("tally", caller, |m| m.tally(caller))
    }

    // --- Participant operations ---

    pub fn submit(&self, caller: AccountId, description: &str) -> BallotResult<ProposalId> {
        self.mutate("submit", caller, |m| m.submit(caller, description))
    }

    pub fn vote(&self, caller: AccountId, proposal: ProposalId) -> BallotResult<u64> {
        self.mutate("vote", caller, |m| m.vote(caller, proposal))
    }

    pub fn remove_vote(&self, caller: AccountId, proposal: ProposalId) -> BallotResult<u64> {
        self.mutate("remove_vote", caller, |m| m.remove_vote(caller, proposal))
    }

    pub fn abstain(&self, caller: AccountId) -> BallotResult<()> {
        self.mutate("abstain", caller, |m| m.abstain(caller))
    }

    // --- Queries ---

    pub fn operator(&self) -> AccountId {
        self.config.operator
    }

    pub fn stage(&self) -> WorkflowStage {
        self.view(|m| m.stage())
    }

    pub fn generation(&self) -> Generation {
        self.view(|m| m.generation())
    }

    pub fn is_registered(&self, account: AccountId) -> bool {
        self.view(|m| m.is_registered(account))
    }

    pub fn participants(&self) -> Vec<AccountId> {
        self.view(|m| m.participants().to_vec())
    }

    pub fn voter(&self, account: AccountId) -> VoterRecord {
        self.view(|m| m.voter(account))
    }

    pub fn proposal(&self, id: ProposalId) -> BallotResult<Proposal> {
        self.view(|m| m.proposal(id).cloned())
    }

    pub fn proposal_count(&self) -> usize {
        self.view(|m| m.proposal_count())
    }

    pub fn proposals(&self) -> Vec<Proposal> {
        self.view(|m| m.proposals().to_vec())
    }

    pub fn has_voted_for(&self, account: AccountId, proposal: ProposalId) -> bool {
        self.view(|m| m.has_voted_for(account, proposal))
    }

    pub fn winners(&self) -> Vec<Proposal> {
        self.view(|m| m.winners().to_vec())
    }

    pub fn history(&self) -> Vec<TallyRecord> {
        self.view(|m| m.history().to_vec())
    }

    pub fn latest_result(&self) -> Option<TallyRecord> {
        self.view(|m| m.latest_result().cloned())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.view(EngineSnapshot::capture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use ballot_core::BallotError;
    use ballot_state::MachineConfig;
    use tokio::sync::broadcast::error::TryRecvError;

    const OPERATOR: AccountId = AccountId(1000);

    fn open_voting(engine: &VotingEngine, voters: &[AccountId], proposals: usize) {
        for &voter in voters {
            engine.admit(OPERATOR, voter).unwrap();
        }
        engine.advance(OPERATOR).unwrap();
        for i in 0..proposals {
            engine
                .submit(voters[0], &format!("Proposal {}", i + 1))
                .unwrap();
        }
        engine.advance(OPERATOR).unwrap();
        engine.advance(OPERATOR).unwrap();
    }

    #[test]
    fn test_notifications_follow_commit_order() {
        let engine = VotingEngine::with_operator(OPERATOR);
        let mut rx = engine.subscribe();
        let alice = AccountId::new(1);

        engine.admit(OPERATOR, alice).unwrap();
        engine.advance(OPERATOR).unwrap();
        assert!(engine.admit(OPERATOR, AccountId::new(2)).is_err());

        assert_eq!(rx.try_recv().unwrap(), BallotEvent::VoterRegistered(alice));
        assert_eq!(
            rx.try_recv().unwrap(),
            BallotEvent::StageChanged {
                previous: WorkflowStage::RegisteringVoters,
                current: WorkflowStage::ProposalsRegistrationStarted,
            }
        );
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_stats_count_outcomes() {
        let engine = VotingEngine::with_operator(OPERATOR);
        let alice = AccountId::new(1);

        engine.admit(OPERATOR, alice).unwrap();
        let _ = engine.admit(OPERATOR, alice);
        let _ = engine.advance(alice);

        let stats = engine.stats();
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 2);
        // Nobody subscribed
        assert_eq!(stats.notifications_sent, 0);
        assert_eq!(stats.notifications_unheard, 1);
    }

    #[test]
    fn test_concurrent_votes_are_serialized() {
        let engine = Arc::new(VotingEngine::with_operator(OPERATOR));
        let voters: Vec<AccountId> = (1..=16).map(AccountId).collect();
        open_voting(&engine, &voters, 2);

        let handles: Vec<_> = voters
            .iter()
            .map(|&voter| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    for _ in 0..10 {
                        engine.vote(voter, ProposalId::new(0)).unwrap();
                        engine.vote(voter, ProposalId::new(1)).unwrap();
                        engine.remove_vote(voter, ProposalId::new(0)).unwrap();
                        engine.remove_vote(voter, ProposalId::new(1)).unwrap();
                    }
                    engine.vote(voter, ProposalId::new(1)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let proposals = engine.proposals();
        assert_eq!(proposals[0].vote_count, 0);
        assert_eq!(proposals[1].vote_count, voters.len() as u64);
    }

    #[test]
    fn test_concurrent_double_vote_counted_once() {
        let engine = Arc::new(VotingEngine::with_operator(OPERATOR));
        let alice = AccountId::new(1);
        open_voting(&engine, &[alice], 1);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || engine.vote(alice, ProposalId::new(0)).is_ok())
            })
            .collect();
        let accepted = handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(engine.proposal(ProposalId::new(0)).unwrap().vote_count, 1);
    }

    #[test]
    fn test_full_cycle_through_engine() {
        let engine = VotingEngine::with_operator(OPERATOR);
        let (alice, bob) = (AccountId::new(1), AccountId::new(2));
        open_voting(&engine, &[alice, bob], 2);

        engine.vote(alice, ProposalId::new(0)).unwrap();
        engine.vote(bob, ProposalId::new(1)).unwrap();
        engine.advance(OPERATOR).unwrap();
        engine.tally(OPERATOR).unwrap();

        assert_eq!(engine.stage(), WorkflowStage::VotesTallied);
        assert_eq!(engine.operator(), OPERATOR);
        assert_eq!(engine.winners().len(), 2);
        assert_eq!(engine.history()[0].total_proposals, 2);
        assert_eq!(engine.latest_result(), engine.history().pop());

        engine.reset(OPERATOR).unwrap();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.stage, WorkflowStage::RegisteringVoters);
        assert_eq!(snapshot.generation, Generation(1));
        assert!(snapshot.proposals.is_empty());
        assert_eq!(snapshot.participants.len(), 2);
        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(
            engine.proposal(ProposalId::new(0)),
            Err(BallotError::NotFound(ProposalId::new(0)))
        );
    }

    #[test]
    fn test_machine_limits_come_from_config() {
        let config = EngineConfig::new(OPERATOR).with_machine(MachineConfig::compact());
        let engine = VotingEngine::new(config);
        let alice = AccountId::new(1);
        engine.admit(OPERATOR, alice).unwrap();
        engine.advance(OPERATOR).unwrap();

        let long = "x".repeat(281);
        assert_eq!(
            engine.submit(alice, &long),
            Err(BallotError::DescriptionTooLong { len: 281, max: 280 })
        );
        assert!(engine.submit(alice, &long[..280]).is_ok());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let config = EngineConfig::new(OPERATOR).with_notification_capacity(0);
        let engine = VotingEngine::new(config);
        let mut rx = engine.subscribe();

        engine.advance(OPERATOR).unwrap();
        assert!(rx.try_recv().is_ok());
    }
}
