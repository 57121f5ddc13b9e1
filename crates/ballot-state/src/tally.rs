//! Tally - plurality with ties preserved

use ballot_core::{BallotError, BallotResult, Proposal, TallyRecord};

/// Result of tallying one cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallyOutcome {
    /// Every proposal at the maximum vote count, in id order
    pub winners: Vec<Proposal>,
    /// Archive summary, pointing at the lowest-id winner
    pub record: TallyRecord,
}

/// Indices of the proposals holding the maximum vote count
///
/// Single pass: the index list restarts whenever a strictly higher count
/// shows up.
pub fn leading_indices(proposals: &[Proposal]) -> (u64, Vec<usize>) {
    let mut max_votes = 0;
    let mut leaders = Vec::new();

    for (index, proposal) in proposals.iter().enumerate() {
        if leaders.is_empty() || proposal.vote_count > max_votes {
            max_votes = proposal.vote_count;
            leaders.clear();
            leaders.push(index);
        } else if proposal.vote_count == max_votes {
            leaders.push(index);
        }
    }

    (max_votes, leaders)
}

/// Compute the winner set and archive record for a list of proposals
pub fn tally(proposals: &[Proposal]) -> BallotResult<TallyOutcome> {
    let (max_votes, leaders) = leading_indices(proposals);
    let first = leaders
        .first()
        .and_then(|&index| proposals.get(index))
        .ok_or(BallotError::NothingToTally)?;

    let record = TallyRecord {
        winning_proposal_id: first.id,
        winning_proposal_description: first.description.clone(),
        winning_vote_count: max_votes,
        total_proposals: proposals.len() as u64,
    };

    let winners = leaders
        .into_iter()
        .filter_map(|index| proposals.get(index).cloned())
        .collect();

    Ok(TallyOutcome { winners, record })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_core::ProposalId;

    fn proposals(counts: &[u64]) -> Vec<Proposal> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let mut p = Proposal::new(ProposalId::from_index(i), format!("Proposal {}", i + 1));
                p.vote_count = count;
                p
            })
            .collect()
    }

    #[test]
    fn test_tie_preserved() {
        let outcome = tally(&proposals(&[3, 3, 1])).unwrap();

        let ids: Vec<_> = outcome.winners.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProposalId::new(0), ProposalId::new(1)]);
        assert_eq!(outcome.record.winning_proposal_id, ProposalId::new(0));
        assert_eq!(outcome.record.winning_vote_count, 3);
        assert_eq!(outcome.record.total_proposals, 3);
    }

    #[test]
    fn test_later_leader_restarts_set() {
        let outcome = tally(&proposals(&[2, 2, 5, 1, 5])).unwrap();

        let ids: Vec<_> = outcome.winners.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(outcome.record.winning_proposal_description, "Proposal 3");
    }

    #[test]
    fn test_all_zero_is_full_tie() {
        let outcome = tally(&proposals(&[0, 0])).unwrap();
        assert_eq!(outcome.winners.len(), 2);
        assert_eq!(outcome.record.winning_vote_count, 0);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(tally(&[]), Err(BallotError::NothingToTally));
        assert_eq!(leading_indices(&[]), (0, vec![]));
    }
}
