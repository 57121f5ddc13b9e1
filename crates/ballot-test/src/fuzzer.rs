//! Operation Fuzzer - random call sequences against one voting machine
//!
//! Checks after every step:
//! - Vote counts match the ledger
//! - Abstention and active votes never coexist
//! - No proposals while registering voters
//! - Winners only after a tally, all holding the maximum count
//! - One history record per successful tally

use ballot_core::{AccountId, BallotError, ProposalId, WorkflowStage};
use ballot_state::VotingMachine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Action;

/// Fuzzer configuration
#[derive(Clone, Debug)]
pub struct FuzzerConfig {
    /// Accounts the operator may register
    pub voter_count: usize,
    /// Accounts that are never registered
    pub outsider_count: usize,
    /// Upper bound on proposal ids drawn for votes
    pub proposal_count: usize,
    /// Number of operations to apply
    pub operation_count: usize,
    /// Probability that an operator-only action is sent by someone else
    pub impostor_prob: f64,
    /// Random seed
    pub seed: u64,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        FuzzerConfig {
            voter_count: 8,
            outsider_count: 2,
            proposal_count: 6,
            operation_count: 2_000,
            impostor_prob: 0.05,
            seed: 42,
        }
    }
}

impl FuzzerConfig {
    /// Light fuzzing for quick tests
    pub fn light() -> Self {
        FuzzerConfig {
            voter_count: 3,
            outsider_count: 1,
            proposal_count: 3,
            operation_count: 200,
            impostor_prob: 0.05,
            seed: 42,
        }
    }

    /// Heavy fuzzing for thorough testing
    pub fn heavy() -> Self {
        FuzzerConfig {
            voter_count: 32,
            outsider_count: 4,
            proposal_count: 16,
            operation_count: 50_000,
            impostor_prob: 0.1,
            seed: 42,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A broken invariant, with the step that exposed it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub step: usize,
    pub property: &'static str,
}

/// Fuzzing result
#[derive(Debug, Default)]
pub struct FuzzResult {
    pub accepted: u64,
    pub rejected: u64,
    pub tallies: u64,
    pub resets: u64,
    pub violations: Vec<Violation>,
}

impl FuzzResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Operation fuzzer
pub struct BallotFuzzer {
    config: FuzzerConfig,
    machine: VotingMachine,
    operator: AccountId,
    accounts: Vec<AccountId>,
    rng: StdRng,
}

impl BallotFuzzer {
    pub fn new(config: FuzzerConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let operator = AccountId::new(u64::MAX);
        let accounts = (0..config.voter_count + config.outsider_count)
            .map(|i| AccountId::new(i as u64 + 1))
            .collect();

        BallotFuzzer {
            machine: VotingMachine::new(operator),
            config,
            operator,
            accounts,
            rng,
        }
    }

    pub fn machine(&self) -> &VotingMachine {
        &self.machine
    }

    fn voter(&mut self) -> AccountId {
        let idx = self.rng.gen_range(0..self.config.voter_count.max(1));
        self.accounts.get(idx).copied().unwrap_or(self.operator)
    }

    fn any_account(&mut self) -> AccountId {
        if self.accounts.is_empty() {
            return self.operator;
        }
        let idx = self.rng.gen_range(0..self.accounts.len());
        self.accounts[idx]
    }

    fn proposal_id(&mut self) -> ProposalId {
        ProposalId::from_index(self.rng.gen_range(0..self.config.proposal_count.max(1)))
    }

    /// Generate a random action and its caller
    fn generate(&mut self) -> (AccountId, Action) {
        let action = match self.rng.gen_range(0..12) {
            0 | 1 => Action::Admit(self.voter()),
            2 => Action::Remove(self.voter()),
            3 => Action::Advance,
            4 => Action::Reset,
            5 => Action::Tally,
            6 => {
                let len = self.rng.gen_range(0..24);
                Action::Submit("x".repeat(len))
            }
            7 | 8 => Action::Vote(self.proposal_id()),
            9 | 10 => Action::RemoveVote(self.proposal_id()),
            _ => Action::Abstain,
        };

        let caller = if action.is_operator_only() {
            if self.rng.gen::<f64>() < self.config.impostor_prob {
                self.any_account()
            } else {
                self.operator
            }
        } else {
            self.any_account()
        };
        (caller, action)
    }

    /// Run the fuzzer
    pub fn run(&mut self) -> FuzzResult {
        let mut result = FuzzResult::default();

        for step in 0..self.config.operation_count {
            let (caller, action) = self.generate();
            let outcome = action.apply(&mut self.machine, caller);
            self.machine.drain_events();

            match outcome {
                Ok(()) => {
                    result.accepted += 1;
                    match action {
                        Action::Tally => result.tallies += 1,
                        Action::Reset => result.resets += 1,
                        _ => {}
                    }
                }
                Err(err) => {
                    result.rejected += 1;
                    if caller != self.operator
                        && action.is_operator_only()
                        && err != (BallotError::Unauthorized { caller })
                    {
                        result.violations.push(Violation {
                            step,
                            property: "operator_only",
                        });
                    }
                }
            }

            self.check_invariants(step, &mut result);
        }

        result
    }

    fn check_invariants(&self, step: usize, result: &mut FuzzResult) {
        let checks: [(&'static str, bool); 5] = [
            (
                "counts_match_ledger",
                properties::counts_match_ledger(&self.machine, &self.accounts),
            ),
            (
                "abstention_exclusive",
                properties::abstention_exclusive(&self.machine, &self.accounts),
            ),
            (
                "no_proposals_while_registering",
                properties::no_proposals_while_registering(&self.machine),
            ),
            ("winners_hold_max", properties::winners_hold_max(&self.machine)),
            (
                "history_matches_tallies",
                self.machine.history().len() as u64 == result.tallies,
            ),
        ];

        for (property, holds) in checks {
            if !holds {
                result.violations.push(Violation { step, property });
            }
        }
    }
}

/// Invariant predicates over a machine
pub mod properties {
    use super::*;

    /// Every proposal's count equals the number of accounts holding a ballot for it
    pub fn counts_match_ledger(machine: &VotingMachine, accounts: &[AccountId]) -> bool {
        machine.proposals().iter().all(|p| {
            let holders = accounts
                .iter()
                .filter(|&&a| machine.has_voted_for(a, p.id))
                .count() as u64;
            holders == p.vote_count
        })
    }

    /// No account is both abstained and holding votes
    pub fn abstention_exclusive(machine: &VotingMachine, accounts: &[AccountId]) -> bool {
        accounts.iter().all(|&a| {
            let record = machine.voter(a);
            !(record.has_abstained && record.active_votes > 0)
        })
    }

    pub fn no_proposals_while_registering(machine: &VotingMachine) -> bool {
        machine.stage() != WorkflowStage::RegisteringVoters || machine.proposal_count() == 0
    }

    /// Winners exist only once tallied, and each holds the top count
    pub fn winners_hold_max(machine: &VotingMachine) -> bool {
        let winners = machine.winners();
        if winners.is_empty() {
            return true;
        }
        if machine.stage() != WorkflowStage::VotesTallied {
            return false;
        }
        let max = machine
            .proposals()
            .iter()
            .map(|p| p.vote_count)
            .max()
            .unwrap_or(0);
        let leaders = machine
            .proposals()
            .iter()
            .filter(|p| p.vote_count == max)
            .count();
        leaders == winners.len() && winners.iter().all(|w| w.vote_count == max)
    }
}
