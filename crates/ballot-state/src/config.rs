//! State machine configuration

/// Voting machine configuration
#[derive(Clone, Debug)]
pub struct MachineConfig {
    /// Maximum proposal description length in bytes
    pub max_description_len: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            max_description_len: 1024,
        }
    }
}

impl MachineConfig {
    /// Short descriptions only, for constrained front-ends
    pub fn compact() -> Self {
        MachineConfig {
            max_description_len: 280,
        }
    }
}
