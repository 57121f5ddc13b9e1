//! Point-in-time export of the engine state

use serde::{Deserialize, Serialize};

use ballot_core::{AccountId, Generation, Proposal, TallyRecord, WorkflowStage};
use ballot_state::VotingMachine;

/// Everything a read-only observer needs, captured under one lock
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub operator: AccountId,
    pub stage: WorkflowStage,
    pub stage_label: String,
    pub stage_description: String,
    pub generation: Generation,
    pub participants: Vec<AccountId>,
    pub proposals: Vec<Proposal>,
    pub winners: Vec<Proposal>,
    pub history: Vec<TallyRecord>,
}

impl EngineSnapshot {
    pub fn capture(machine: &VotingMachine) -> Self {
        EngineSnapshot {
            operator: machine.operator(),
            stage: machine.stage(),
            stage_label: machine.stage().label().to_string(),
            stage_description: machine.stage().description().to_string(),
            generation: machine.generation(),
            participants: machine.participants().to_vec(),
            proposals: machine.proposals().to_vec(),
            winners: machine.winners().to_vec(),
            history: machine.history().to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
