use anchor_lang::prelude::*;

use crate::{constants::*, error::VotingError};

// One counter per creator; poll ids are handed out from it
#[account]
#[derive(InitSpace)]
pub struct PollCounter {
    // Whose polls this counter numbers
    pub creator: Pubkey,

    // Id the creator's next poll will get
    pub poll_count: u64,

    pub bump: u8,
}

// A D21 poll: question, candidates and the running net tallies
#[account]
#[derive(InitSpace)]
pub struct Poll {
    // Who created this poll (the only one allowed to close it)
    pub creator: Pubkey,

    // Creator's poll_count when this poll was created
    pub poll_id: u64,

    #[max_len(200)]
    pub question: String,

    #[max_len(8, 50)] // Max 8 candidates, each up to 50 characters
    pub candidates: Vec<String>,

    // Net votes per candidate (parallel to candidates, may go negative)
    #[max_len(8)]
    pub vote_counts: Vec<i64>,

    // Number of ballots accepted
    pub total_voters: u64,

    pub is_active: bool,

    pub created_at: i64,

    pub max_plus_votes: u8,

    pub allow_minus_vote: bool,

    pub bump: u8,
}

// Marker written on a voter's first accepted ballot in a poll.
// Its existence is what rejects a second ballot from the same key.
#[account]
#[derive(InitSpace)]
pub struct VoteRecord {
    pub voter: Pubkey,
    pub poll: Pubkey,
    pub first_choice: u8,
    pub second_choice: Option<u8>,
    pub minus_choice: Option<u8>,
    pub voted_at: i64,
    pub bump: u8,
}

/// One voter's selections: one or two plus votes, optionally one minus vote.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub first_choice: u8,
    pub second_choice: Option<u8>,
    pub minus_choice: Option<u8>,
}

/// A candidate's place in the read-side ranking of a poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    pub index: u8,
    pub candidate: String,
    pub net_votes: i64,
}

impl PollCounter {
    pub fn new(creator: Pubkey, bump: u8) -> Self {
        Self {
            creator,
            poll_count: 0,
            bump,
        }
    }

    // A freshly allocated account is all zeroes, so an unset creator means
    // no InitCounter ever ran for this address
    pub fn is_initialized(&self) -> bool {
        self.creator != Pubkey::default()
    }

    /// Hand out the next poll id and advance the counter past it
    pub fn claim_next_id(&mut self) -> Result<u64> {
        let poll_id = self.poll_count;
        self.poll_count = poll_id
            .checked_add(1)
            .ok_or(VotingError::MathOverflow)?;
        Ok(poll_id)
    }
}

impl Ballot {
    pub fn new(first_choice: u8, second_choice: Option<u8>, minus_choice: Option<u8>) -> Self {
        Self {
            first_choice,
            second_choice,
            minus_choice,
        }
    }

    pub fn plus_choices(&self) -> impl Iterator<Item = u8> {
        std::iter::once(self.first_choice).chain(self.second_choice)
    }

    pub fn plus_count(&self) -> usize {
        1 + usize::from(self.second_choice.is_some())
    }

    fn choices(&self) -> impl Iterator<Item = u8> {
        self.plus_choices().chain(self.minus_choice)
    }

    /// How much this ballot moves sum(vote_counts)
    pub fn net_delta(&self) -> i64 {
        self.plus_count() as i64 - i64::from(self.minus_choice.is_some())
    }
}

/// Check poll inputs before anything is written
pub fn validate_poll_inputs(question: &str, candidates: &[String]) -> Result<()> {
    require!(!question.trim().is_empty(), VotingError::EmptyQuestion);
    require!(
        question.len() <= MAX_QUESTION_LENGTH,
        VotingError::QuestionTooLong
    );
    require!(
        is_valid_candidate_count(candidates.len()),
        VotingError::InvalidCandidateCount
    );

    for candidate in candidates {
        require!(
            candidate.len() <= MAX_CANDIDATE_LENGTH,
            VotingError::CandidateNameTooLong
        );
    }

    Ok(())
}

impl Poll {
    /// Build a new active poll with zeroed tallies
    pub fn open(
        creator: Pubkey,
        poll_id: u64,
        question: String,
        candidates: Vec<String>,
        allow_minus_vote: bool,
        created_at: i64,
        bump: u8,
    ) -> Result<Self> {
        validate_poll_inputs(&question, &candidates)?;

        let vote_counts = vec![0i64; candidates.len()];

        Ok(Self {
            creator,
            poll_id,
            question,
            candidates,
            vote_counts,
            total_voters: 0,
            is_active: true,
            created_at,
            max_plus_votes: MAX_PLUS_VOTES,
            allow_minus_vote,
            bump,
        })
    }

    pub fn is_valid_candidate(&self, index: u8) -> bool {
        (index as usize) < self.candidates.len()
    }

    /// Check a ballot against this poll without touching it
    pub fn validate_ballot(&self, ballot: &Ballot) -> Result<()> {
        require!(self.is_active, VotingError::PollClosed);

        if ballot.minus_choice.is_some() {
            require!(self.allow_minus_vote, VotingError::MinusVoteNotAllowed);
            // D21: a minus vote only comes after both plus votes
            require!(
                ballot.plus_count() >= 2,
                VotingError::MinusVoteRequiresTwoPlusVotes
            );
        }

        require!(
            ballot.plus_count() <= self.max_plus_votes as usize,
            VotingError::TooManyPlusVotes
        );

        if let Some(second) = ballot.second_choice {
            require!(second != ballot.first_choice, VotingError::DuplicateChoice);
        }
        if let Some(minus) = ballot.minus_choice {
            require!(
                !ballot.plus_choices().any(|plus| plus == minus),
                VotingError::DuplicateChoice
            );
        }

        for index in ballot.choices() {
            require!(
                self.is_valid_candidate(index),
                VotingError::InvalidCandidateIndex
            );
        }

        Ok(())
    }

    /// Apply an accepted ballot. Either every tally moves or none does.
    pub fn record_ballot(&mut self, ballot: &Ballot) -> Result<()> {
        self.validate_ballot(ballot)?;

        let mut vote_counts = self.vote_counts.clone();
        for index in ballot.plus_choices() {
            let count = &mut vote_counts[index as usize];
            *count = count.checked_add(1).ok_or(VotingError::MathOverflow)?;
        }
        if let Some(minus) = ballot.minus_choice {
            let count = &mut vote_counts[minus as usize];
            *count = count.checked_sub(1).ok_or(VotingError::MathOverflow)?;
        }
        let total_voters = self
            .total_voters
            .checked_add(1)
            .ok_or(VotingError::MathOverflow)?;

        self.vote_counts = vote_counts;
        self.total_voters = total_voters;

        Ok(())
    }

    /// Active -> Closed. There is no way back.
    pub fn close(&mut self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.creator, VotingError::Unauthorized);
        require!(self.is_active, VotingError::AlreadyClosed);

        self.is_active = false;
        Ok(())
    }

    /// sum(vote_counts): plus votes cast minus minus votes cast
    pub fn net_total(&self) -> i64 {
        self.vote_counts.iter().sum()
    }

    /// Candidates ordered by net votes, highest first. Equal scores keep
    /// candidate order; that is a display order, not a tie-break.
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .candidates
            .iter()
            .zip(self.vote_counts.iter())
            .enumerate()
            .map(|(index, (candidate, &net_votes))| Standing {
                index: index as u8,
                candidate: candidate.clone(),
                net_votes,
            })
            .collect();

        standings.sort_by(|a, b| b.net_votes.cmp(&a.net_votes).then(a.index.cmp(&b.index)));
        standings
    }

    /// Every candidate sharing the top score. Empty until a ballot is in.
    pub fn leaders(&self) -> Vec<u8> {
        if self.total_voters == 0 {
            return Vec::new();
        }

        let Some(&top) = self.vote_counts.iter().max() else {
            return Vec::new();
        };

        self.vote_counts
            .iter()
            .enumerate()
            .filter(|&(_, &votes)| votes == top)
            .map(|(index, _)| index as u8)
            .collect()
    }
}

impl VoteRecord {
    pub fn new(poll: Pubkey, voter: Pubkey, ballot: &Ballot, voted_at: i64, bump: u8) -> Self {
        Self {
            voter,
            poll,
            first_choice: ballot.first_choice,
            second_choice: ballot.second_choice,
            minus_choice: ballot.minus_choice,
            voted_at,
            bump,
        }
    }

    pub fn is_recorded(&self) -> bool {
        self.voter != Pubkey::default()
    }

    pub fn ballot(&self) -> Ballot {
        Ballot::new(self.first_choice, self.second_choice, self.minus_choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn fruit_poll(allow_minus_vote: bool) -> Poll {
        Poll::open(
            Pubkey::new_unique(),
            0,
            "Best fruit?".to_string(),
            labels(&["Apple", "Banana", "Cherry"]),
            allow_minus_vote,
            1_700_000_000,
            255,
        )
        .unwrap()
    }

    fn poll_with(candidate_count: usize, allow_minus_vote: bool) -> Poll {
        let candidates = (0..candidate_count).map(|i| format!("Option {}", i)).collect();
        Poll::open(
            Pubkey::new_unique(),
            0,
            "Pick".to_string(),
            candidates,
            allow_minus_vote,
            0,
            255,
        )
        .unwrap()
    }

    fn err(error: VotingError) -> Error {
        error.into()
    }

    #[test]
    fn test_counter_hands_out_sequential_ids() {
        let mut counter = PollCounter::new(Pubkey::new_unique(), 254);
        assert!(counter.is_initialized());

        for expected in 0..5u64 {
            assert_eq!(counter.claim_next_id().unwrap(), expected);
        }
        assert_eq!(counter.poll_count, 5);
    }

    #[test]
    fn test_counter_overflow_leaves_counter_unchanged() {
        let mut counter = PollCounter::new(Pubkey::new_unique(), 254);
        counter.poll_count = u64::MAX;

        assert_eq!(counter.claim_next_id().unwrap_err(), err(VotingError::MathOverflow));
        assert_eq!(counter.poll_count, u64::MAX);
    }

    #[test]
    fn test_unset_counter_is_not_initialized() {
        let counter = PollCounter {
            creator: Pubkey::default(),
            poll_count: 0,
            bump: 0,
        };
        assert!(!counter.is_initialized());
    }

    #[test]
    fn test_open_poll() {
        let poll = fruit_poll(true);

        assert_eq!(poll.candidates.len(), 3);
        assert_eq!(poll.vote_counts, vec![0, 0, 0]);
        assert_eq!(poll.total_voters, 0);
        assert!(poll.is_active);
        assert_eq!(poll.max_plus_votes, MAX_PLUS_VOTES);
        assert_eq!(poll.created_at, 1_700_000_000);
    }

    #[test]
    fn test_poll_input_validation() {
        let three = labels(&["a", "b", "c"]);

        assert!(validate_poll_inputs("Q?", &three).is_ok());
        assert_eq!(
            validate_poll_inputs("", &three).unwrap_err(),
            err(VotingError::EmptyQuestion)
        );
        assert_eq!(
            validate_poll_inputs("   ", &three).unwrap_err(),
            err(VotingError::EmptyQuestion)
        );
        assert_eq!(
            validate_poll_inputs(&"q".repeat(MAX_QUESTION_LENGTH + 1), &three).unwrap_err(),
            err(VotingError::QuestionTooLong)
        );
        assert!(validate_poll_inputs(&"q".repeat(MAX_QUESTION_LENGTH), &three).is_ok());

        assert_eq!(
            validate_poll_inputs("Q?", &labels(&["a", "b"])).unwrap_err(),
            err(VotingError::InvalidCandidateCount)
        );
        let nine: Vec<String> = (0..9).map(|i| i.to_string()).collect();
        assert_eq!(
            validate_poll_inputs("Q?", &nine).unwrap_err(),
            err(VotingError::InvalidCandidateCount)
        );

        let long_name = vec!["a".to_string(), "b".to_string(), "c".repeat(MAX_CANDIDATE_LENGTH + 1)];
        assert_eq!(
            validate_poll_inputs("Q?", &long_name).unwrap_err(),
            err(VotingError::CandidateNameTooLong)
        );
    }

    #[test]
    fn test_fruit_ballot() {
        let mut poll = fruit_poll(true);

        poll.record_ballot(&Ballot::new(0, Some(1), Some(2))).unwrap();

        assert_eq!(poll.vote_counts, vec![1, 1, -1]);
        assert_eq!(poll.total_voters, 1);
        assert_eq!(poll.net_total(), 1);
    }

    #[test]
    fn test_single_plus_vote() {
        let mut poll = fruit_poll(false);

        poll.record_ballot(&Ballot::new(2, None, None)).unwrap();

        assert_eq!(poll.vote_counts, vec![0, 0, 1]);
        assert_eq!(poll.total_voters, 1);
    }

    #[test]
    fn test_duplicate_second_choice_rejected_for_all_sizes() {
        for size in MIN_CANDIDATES..=MAX_CANDIDATES {
            let mut poll = poll_with(size, true);
            for index in 0..size as u8 {
                assert_eq!(
                    poll.record_ballot(&Ballot::new(index, Some(index), None)).unwrap_err(),
                    err(VotingError::DuplicateChoice)
                );
            }
            assert_eq!(poll.total_voters, 0);
            assert!(poll.vote_counts.iter().all(|&count| count == 0));
        }
    }

    #[test]
    fn test_minus_on_plus_candidate_is_duplicate() {
        let poll = fruit_poll(true);

        assert_eq!(
            poll.validate_ballot(&Ballot::new(0, Some(1), Some(0))).unwrap_err(),
            err(VotingError::DuplicateChoice)
        );
        assert_eq!(
            poll.validate_ballot(&Ballot::new(0, Some(1), Some(1))).unwrap_err(),
            err(VotingError::DuplicateChoice)
        );
    }

    #[test]
    fn test_minus_needs_two_plus_votes() {
        let mut poll = fruit_poll(true);

        for ballot in [Ballot::new(0, None, Some(1)), Ballot::new(2, None, Some(2))] {
            assert_eq!(
                poll.record_ballot(&ballot).unwrap_err(),
                err(VotingError::MinusVoteRequiresTwoPlusVotes)
            );
        }
        assert_eq!(poll.vote_counts, vec![0, 0, 0]);
        assert_eq!(poll.total_voters, 0);

        poll.record_ballot(&Ballot::new(0, Some(2), Some(1))).unwrap();
        assert_eq!(poll.vote_counts, vec![1, -1, 1]);
    }

    #[test]
    fn test_minus_vote_not_allowed_regardless_of_other_fields() {
        let poll = fruit_poll(false);
        let ballots = [
            Ballot::new(0, Some(1), Some(2)),
            Ballot::new(0, None, Some(1)),
            Ballot::new(0, Some(0), Some(0)),
            Ballot::new(9, Some(9), Some(9)),
            Ballot::new(1, Some(7), Some(200)),
        ];

        for ballot in ballots.iter() {
            assert_eq!(
                poll.validate_ballot(ballot).unwrap_err(),
                err(VotingError::MinusVoteNotAllowed)
            );
        }
    }

    #[test]
    fn test_out_of_range_indices() {
        let poll = fruit_poll(true);

        assert_eq!(
            poll.validate_ballot(&Ballot::new(3, None, None)).unwrap_err(),
            err(VotingError::InvalidCandidateIndex)
        );
        assert_eq!(
            poll.validate_ballot(&Ballot::new(0, Some(3), None)).unwrap_err(),
            err(VotingError::InvalidCandidateIndex)
        );
        assert_eq!(
            poll.validate_ballot(&Ballot::new(0, Some(1), Some(8))).unwrap_err(),
            err(VotingError::InvalidCandidateIndex)
        );
    }

    #[test]
    fn test_plus_votes_bounded_by_poll_limit() {
        let mut poll = fruit_poll(true);
        poll.max_plus_votes = 1;

        assert!(poll.validate_ballot(&Ballot::new(0, None, None)).is_ok());
        assert_eq!(
            poll.validate_ballot(&Ballot::new(0, Some(1), None)).unwrap_err(),
            err(VotingError::TooManyPlusVotes)
        );
    }

    #[test]
    fn test_closed_poll_is_frozen() {
        let mut poll = fruit_poll(true);
        let creator = poll.creator;
        poll.record_ballot(&Ballot::new(0, Some(1), None)).unwrap();
        poll.close(&creator).unwrap();

        let before = poll.clone();
        assert_eq!(
            poll.record_ballot(&Ballot::new(1, Some(2), Some(0))).unwrap_err(),
            err(VotingError::PollClosed)
        );
        assert_eq!(poll.close(&creator).unwrap_err(), err(VotingError::AlreadyClosed));

        assert_eq!(poll.vote_counts, before.vote_counts);
        assert_eq!(poll.total_voters, before.total_voters);
        assert_eq!(poll.question, before.question);
        assert_eq!(poll.candidates, before.candidates);
        assert!(!poll.is_active);
    }

    #[test]
    fn test_only_creator_closes() {
        let mut poll = fruit_poll(true);

        assert_eq!(
            poll.close(&Pubkey::new_unique()).unwrap_err(),
            err(VotingError::Unauthorized)
        );
        assert!(poll.is_active);

        let creator = poll.creator;
        poll.close(&creator).unwrap();
        assert!(!poll.is_active);

        // a stranger is still refused as a stranger once the poll is closed
        assert_eq!(
            poll.close(&Pubkey::new_unique()).unwrap_err(),
            err(VotingError::Unauthorized)
        );
    }

    #[test]
    fn test_tally_overflow_is_all_or_nothing() {
        let mut poll = fruit_poll(true);
        poll.vote_counts = vec![5, i64::MAX, 0];

        assert_eq!(
            poll.record_ballot(&Ballot::new(0, Some(1), None)).unwrap_err(),
            err(VotingError::MathOverflow)
        );
        assert_eq!(poll.vote_counts, vec![5, i64::MAX, 0]);
        assert_eq!(poll.total_voters, 0);
    }

    #[test]
    fn test_net_total_matches_replay() {
        let mut poll = poll_with(5, true);
        let ballots = [
            Ballot::new(0, Some(1), Some(2)),
            Ballot::new(4, None, None),
            Ballot::new(3, Some(0), None),
            Ballot::new(2, Some(1), Some(0)),
            Ballot::new(1, Some(3), Some(4)),
        ];

        let mut expected = 0i64;
        for ballot in ballots.iter() {
            poll.record_ballot(ballot).unwrap();
            expected += ballot.net_delta();
        }

        assert_eq!(poll.net_total(), expected);
        assert_eq!(poll.total_voters, ballots.len() as u64);
        assert_eq!(poll.vote_counts, vec![1, 3, 0, 2, 0]);
    }

    #[test]
    fn test_standings_and_leaders() {
        let mut poll = poll_with(4, true);
        assert!(poll.leaders().is_empty());

        poll.record_ballot(&Ballot::new(2, Some(1), Some(0))).unwrap();
        poll.record_ballot(&Ballot::new(1, Some(2), Some(3))).unwrap();

        let standings = poll.standings();
        let order: Vec<u8> = standings.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
        assert_eq!(standings[0].net_votes, 2);
        assert_eq!(standings[0].candidate, "Option 1");

        // ties are reported, not broken
        assert_eq!(poll.leaders(), vec![1, 2]);
    }

    #[test]
    fn test_vote_record_keeps_ballot() {
        let ballot = Ballot::new(1, Some(2), Some(0));
        let record = VoteRecord::new(Pubkey::new_unique(), Pubkey::new_unique(), &ballot, 42, 250);

        assert!(record.is_recorded());
        assert_eq!(record.ballot(), ballot);
        assert_eq!(record.voted_at, 42);
    }

    #[test]
    fn test_largest_poll_fits_allocated_space() {
        let candidates = (0..MAX_CANDIDATES)
            .map(|_| "c".repeat(MAX_CANDIDATE_LENGTH))
            .collect();
        let poll = Poll::open(
            Pubkey::new_unique(),
            u64::MAX,
            "q".repeat(MAX_QUESTION_LENGTH),
            candidates,
            true,
            i64::MAX,
            255,
        )
        .unwrap();

        let mut data = Vec::new();
        AnchorSerialize::serialize(&poll, &mut data).unwrap();
        assert!(data.len() <= Poll::INIT_SPACE);
    }
}
