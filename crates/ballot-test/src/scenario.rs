//! Scenario runner - scripted cycles against the shared engine

use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;

use ballot_core::{AccountId, BallotError, BallotEvent, BallotResult, ProposalId};
use ballot_runtime::{EngineSnapshot, VotingEngine};

use crate::Action;

/// One scripted call
#[derive(Clone, Debug)]
pub struct Step {
    pub caller: AccountId,
    pub action: Action,
}

/// Ordered list of calls against a fresh engine
#[derive(Clone, Debug)]
pub struct Scenario {
    operator: AccountId,
    steps: Vec<Step>,
}

/// What a scenario run produced
#[derive(Debug)]
pub struct ScenarioReport {
    /// Result of each step, in order
    pub outcomes: Vec<BallotResult<()>>,
    /// Every notification published during the run
    pub events: Vec<BallotEvent>,
    /// Final engine state
    pub snapshot: EngineSnapshot,
}

impl ScenarioReport {
    pub fn all_accepted(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_ok())
    }

    /// Rejected steps with their index
    pub fn rejections(&self) -> Vec<(usize, &BallotError)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.as_ref().err().map(|e| (i, e)))
            .collect()
    }
}

impl Scenario {
    pub fn new(operator: AccountId) -> Self {
        Scenario {
            operator,
            steps: Vec::new(),
        }
    }

    /// Append a call made by `caller`
    pub fn step(mut self, caller: AccountId, action: Action) -> Self {
        self.steps.push(Step { caller, action });
        self
    }

    /// Append a call made by the operator
    pub fn by_operator(self, action: Action) -> Self {
        let operator = self.operator;
        self.step(operator, action)
    }

    /// Advance the workflow `times` stages
    pub fn advance(mut self, times: usize) -> Self {
        for _ in 0..times {
            self = self.by_operator(Action::Advance);
        }
        self
    }

    /// Two voters, two proposals, one vote each: a two-way tie
    pub fn split_vote(operator: AccountId, a: AccountId, b: AccountId) -> Self {
        Scenario::new(operator)
            .by_operator(Action::Admit(a))
            .by_operator(Action::Admit(b))
            .advance(1)
            .step(a, Action::Submit("Proposal 1".into()))
            .step(b, Action::Submit("Proposal 2".into()))
            .advance(2)
            .step(a, Action::Vote(ProposalId::new(0)))
            .step(b, Action::Vote(ProposalId::new(1)))
            .advance(1)
            .by_operator(Action::Tally)
    }

    /// Run every step against a fresh engine
    pub fn run(&self) -> ScenarioReport {
        let engine = VotingEngine::with_operator(self.operator);
        self.run_on(&engine)
    }

    /// Run every step against an existing engine
    pub fn run_on(&self, engine: &VotingEngine) -> ScenarioReport {
        let mut rx = engine.subscribe();
        let mut outcomes = Vec::with_capacity(self.steps.len());
        let mut events = Vec::new();

        for step in &self.steps {
            outcomes.push(step.action.apply_engine(engine, step.caller));
            drain(&mut rx, &mut events);
        }

        ScenarioReport {
            outcomes,
            events,
            snapshot: engine.snapshot(),
        }
    }
}

fn drain(rx: &mut Receiver<BallotEvent>, into: &mut Vec<BallotEvent>) {
    loop {
        match rx.try_recv() {
            Ok(event) => into.push(event),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
}
