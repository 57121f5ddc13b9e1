//! Engine and logging configuration

use ballot_core::AccountId;
use ballot_state::MachineConfig;

/// Voting engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// The only account allowed to run operator operations
    pub operator: AccountId,
    /// Notifications buffered per subscriber before the oldest are dropped
    pub notification_capacity: usize,
    /// State machine limits
    pub machine: MachineConfig,
}

impl EngineConfig {
    /// Default configuration for the given operator
    pub fn new(operator: AccountId) -> Self {
        EngineConfig {
            operator,
            notification_capacity: 256,
            machine: MachineConfig::default(),
        }
    }

    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity;
        self
    }

    pub fn with_machine(mut self, machine: MachineConfig) -> Self {
        self.machine = machine;
        self
    }
}

/// Logging configuration
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub default_directive: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Include the event target (module path)
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            default_directive: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Structured output for log collectors
    pub fn json() -> Self {
        LoggingConfig {
            json: true,
            ..LoggingConfig::default()
        }
    }

    /// Verbose output including every accepted ballot
    pub fn verbose() -> Self {
        LoggingConfig {
            default_directive: "debug".to_string(),
            ..LoggingConfig::default()
        }
    }
}
