//! Participant registry - who may submit and vote

use std::collections::HashMap;

use ballot_core::{AccountId, BallotError, BallotResult};

/// Registered participants
///
/// Membership is a map from account to its slot in an enumerable list.
/// Removal swaps the last member into the freed slot, so the listing order
/// is not stable across removals.
#[derive(Debug, Default, Clone)]
pub struct ParticipantRegistry {
    slots: HashMap<AccountId, usize>,
    members: Vec<AccountId>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        ParticipantRegistry::default()
    }

    /// Admit a new participant
    pub fn admit(&mut self, account: AccountId) -> BallotResult<()> {
        if self.slots.contains_key(&account) {
            return Err(BallotError::AlreadyRegistered(account));
        }

        self.slots.insert(account, self.members.len());
        self.members.push(account);
        Ok(())
    }

    /// Remove a participant
    pub fn remove(&mut self, account: AccountId) -> BallotResult<()> {
        let slot = self
            .slots
            .remove(&account)
            .ok_or(BallotError::NotRegistered(account))?;

        self.members.swap_remove(slot);
        if let Some(moved) = self.members.get(slot) {
            self.slots.insert(*moved, slot);
        }
        Ok(())
    }

    /// Check if an account is registered
    pub fn contains(&self, account: AccountId) -> bool {
        self.slots.contains_key(&account)
    }

    /// Fail with `NotRegistered` unless the account is a participant
    pub fn require(&self, account: AccountId) -> BallotResult<()> {
        if self.contains(account) {
            Ok(())
        } else {
            Err(BallotError::NotRegistered(account))
        }
    }

    /// All current participants
    pub fn members(&self) -> &[AccountId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: u64) -> AccountId {
        AccountId::new(id)
    }

    #[test]
    fn test_admit_and_contains() {
        let mut registry = ParticipantRegistry::new();
        registry.admit(account(1)).unwrap();
        registry.admit(account(2)).unwrap();

        assert!(registry.contains(account(1)));
        assert!(!registry.contains(account(3)));
        assert_eq!(registry.members(), &[account(1), account(2)]);
    }

    #[test]
    fn test_duplicate_admission_rejected() {
        let mut registry = ParticipantRegistry::new();
        registry.admit(account(1)).unwrap();

        assert_eq!(
            registry.admit(account(1)),
            Err(BallotError::AlreadyRegistered(account(1)))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_unknown_rejected() {
        let mut registry = ParticipantRegistry::new();
        assert_eq!(
            registry.remove(account(5)),
            Err(BallotError::NotRegistered(account(5)))
        );
    }

    #[test]
    fn test_remove_keeps_remaining_members() {
        let mut registry = ParticipantRegistry::new();
        for id in 1..=4 {
            registry.admit(account(id)).unwrap();
        }

        registry.remove(account(2)).unwrap();

        assert!(!registry.contains(account(2)));
        assert_eq!(registry.len(), 3);
        let mut remaining = registry.members().to_vec();
        remaining.sort();
        assert_eq!(remaining, vec![account(1), account(3), account(4)]);

        // The member moved into the freed slot must still be removable
        registry.remove(account(4)).unwrap();
        registry.remove(account(1)).unwrap();
        assert_eq!(registry.members(), &[account(3)]);
    }

    #[test]
    fn test_readmission_after_removal() {
        let mut registry = ParticipantRegistry::new();
        registry.admit(account(1)).unwrap();
        registry.remove(account(1)).unwrap();
        registry.admit(account(1)).unwrap();

        assert!(registry.contains(account(1)));
        assert_eq!(registry.len(), 1);
    }
}
