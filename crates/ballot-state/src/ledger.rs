//! Ballot ledger - who voted for what in the current generation
//!
//! Entries are keyed by `(generation, account, proposal)`. Bumping the
//! generation invalidates every entry at once: lookups only ever consult the
//! current generation, so stale entries read as absent.
//!
//! Stale entries are dropped on the first write after an invalidation, so
//! the ledger holds at most one generation's entries once voting resumes.

use std::collections::{HashMap, HashSet};

use ballot_core::{AccountId, BallotError, BallotResult, Generation, ProposalId};

type EntryKey = (Generation, AccountId, ProposalId);
type VoterKey = (Generation, AccountId);

/// Per-voter, per-proposal approval flags plus abstentions
#[derive(Debug, Default, Clone)]
pub struct BallotLedger {
    generation: Generation,
    entries: HashSet<EntryKey>,
    /// Number of live entries per voter
    active: HashMap<VoterKey, u32>,
    abstained: HashSet<VoterKey>,
    /// Older generations still stored
    stale: bool,
}

impl BallotLedger {
    pub fn new() -> Self {
        BallotLedger::default()
    }

    /// Current generation
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Invalidate every entry and abstention
    pub fn invalidate(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.stale = true;
        self.generation
    }

    fn prune(&mut self) {
        if !self.stale {
            return;
        }
        let current = self.generation;
        self.entries.retain(|&(gen, _, _)| gen == current);
        self.active.retain(|&(gen, _), _| gen == current);
        self.abstained.retain(|&(gen, _)| gen == current);
        self.stale = false;
    }

    pub fn has_voted_for(&self, voter: AccountId, proposal: ProposalId) -> bool {
        self.entries.contains(&(self.generation, voter, proposal))
    }

    /// Number of proposals the voter currently approves
    pub fn active_votes(&self, voter: AccountId) -> u32 {
        self.active
            .get(&(self.generation, voter))
            .copied()
            .unwrap_or(0)
    }

    pub fn has_abstained(&self, voter: AccountId) -> bool {
        self.abstained.contains(&(self.generation, voter))
    }

    /// Record an approval vote
    pub fn cast(&mut self, voter: AccountId, proposal: ProposalId) -> BallotResult<()> {
        if self.has_voted_for(voter, proposal) {
            return Err(BallotError::AlreadyVoted { voter, proposal });
        }
        if self.has_abstained(voter) {
            return Err(BallotError::AlreadyAbstained(voter));
        }

        self.prune();
        self.entries.insert((self.generation, voter, proposal));
        *self.active.entry((self.generation, voter)).or_insert(0) += 1;
        Ok(())
    }

    /// Retract an approval vote
    pub fn retract(&mut self, voter: AccountId, proposal: ProposalId) -> BallotResult<()> {
        if !self.entries.remove(&(self.generation, voter, proposal)) {
            return Err(BallotError::NotVoted { voter, proposal });
        }

        let key = (self.generation, voter);
        if let Some(count) = self.active.get_mut(&key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.active.remove(&key);
            }
        }
        Ok(())
    }

    /// Record an abstention for the rest of the cycle
    pub fn abstain(&mut self, voter: AccountId) -> BallotResult<()> {
        if self.has_abstained(voter) {
            return Err(BallotError::AlreadyAbstained(voter));
        }
        if self.active_votes(voter) > 0 {
            return Err(BallotError::AlreadyVotedConflict(voter));
        }

        self.prune();
        self.abstained.insert((self.generation, voter));
        Ok(())
    }

    /// Number of entries held, current and stale
    pub fn stored_entries(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALICE: AccountId = AccountId(1);
    const BOB: AccountId = AccountId(2);

    #[test]
    fn test_cast_and_retract() {
        let mut ledger = BallotLedger::new();
        let p0 = ProposalId::new(0);

        ledger.cast(ALICE, p0).unwrap();
        assert!(ledger.has_voted_for(ALICE, p0));
        assert!(!ledger.has_voted_for(BOB, p0));
        assert_eq!(
            ledger.cast(ALICE, p0),
            Err(BallotError::AlreadyVoted {
                voter: ALICE,
                proposal: p0
            })
        );

        ledger.retract(ALICE, p0).unwrap();
        assert!(!ledger.has_voted_for(ALICE, p0));
        assert_eq!(
            ledger.retract(ALICE, p0),
            Err(BallotError::NotVoted {
                voter: ALICE,
                proposal: p0
            })
        );
    }

    #[test]
    fn test_approval_across_proposals() {
        let mut ledger = BallotLedger::new();
        ledger.cast(ALICE, ProposalId::new(0)).unwrap();
        ledger.cast(ALICE, ProposalId::new(1)).unwrap();

        assert_eq!(ledger.active_votes(ALICE), 2);
    }

    #[test]
    fn test_abstain_is_exclusive() {
        let mut ledger = BallotLedger::new();
        ledger.cast(ALICE, ProposalId::new(0)).unwrap();
        assert_eq!(
            ledger.abstain(ALICE),
            Err(BallotError::AlreadyVotedConflict(ALICE))
        );

        ledger.abstain(BOB).unwrap();
        assert_eq!(ledger.abstain(BOB), Err(BallotError::AlreadyAbstained(BOB)));
        assert_eq!(
            ledger.cast(BOB, ProposalId::new(0)),
            Err(BallotError::AlreadyAbstained(BOB))
        );
    }

    #[test]
    fn test_abstain_after_full_retraction() {
        let mut ledger = BallotLedger::new();
        ledger.cast(ALICE, ProposalId::new(0)).unwrap();
        ledger.retract(ALICE, ProposalId::new(0)).unwrap();

        assert!(ledger.abstain(ALICE).is_ok());
    }

    #[test]
    fn test_invalidate_clears_everything() {
        let mut ledger = BallotLedger::new();
        ledger.cast(ALICE, ProposalId::new(0)).unwrap();
        ledger.abstain(BOB).unwrap();

        let gen = ledger.invalidate();

        assert_eq!(gen, Generation(1));
        assert!(!ledger.has_voted_for(ALICE, ProposalId::new(0)));
        assert_eq!(ledger.active_votes(ALICE), 0);
        assert!(!ledger.has_abstained(BOB));
        // Stale entries are left in place until the next write
        assert_eq!(ledger.stored_entries(), 1);

        ledger.cast(ALICE, ProposalId::new(0)).unwrap();
        ledger.cast(BOB, ProposalId::new(0)).unwrap();
        assert_eq!(ledger.active_votes(BOB), 1);
        assert_eq!(ledger.stored_entries(), 2);
    }

    #[test]
    fn test_stale_generations_do_not_accumulate() {
        let mut ledger = BallotLedger::new();

        for _ in 0..50 {
            for voter in 0..10 {
                for proposal in 0..5 {
                    ledger
                        .cast(AccountId(voter), ProposalId::new(proposal))
                        .unwrap();
                }
            }
            ledger.abstain(AccountId(99)).unwrap();
            ledger.invalidate();
        }

        assert_eq!(ledger.generation(), Generation(50));
        assert_eq!(ledger.stored_entries(), 50);

        ledger.cast(ALICE, ProposalId::new(0)).unwrap();
        assert_eq!(ledger.stored_entries(), 1);
        assert_eq!(ledger.active_votes(AccountId(2)), 0);
        assert!(!ledger.has_abstained(AccountId(99)));
    }

    proptest! {
        #[test]
        fn prop_toggle_alternates(toggles in proptest::collection::vec(any::<bool>(), 1..64)) {
            let mut ledger = BallotLedger::new();
            let p0 = ProposalId::new(0);

            for cast in toggles {
                let before = ledger.has_voted_for(ALICE, p0);
                let result = if cast { ledger.cast(ALICE, p0) } else { ledger.retract(ALICE, p0) };

                // A cast succeeds exactly when no entry existed, a retract exactly when one did
                prop_assert_eq!(result.is_ok(), cast != before);
                let expected = if result.is_ok() { !before } else { before };
                prop_assert_eq!(ledger.has_voted_for(ALICE, p0), expected);
                prop_assert_eq!(ledger.active_votes(ALICE), expected as u32);
            }
        }
    }
}
