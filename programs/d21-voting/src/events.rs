use anchor_lang::prelude::*;

#[event]
pub struct PollCounterInitialized {
    pub creator: Pubkey,
    pub poll_counter: Pubkey,
}

#[event]
pub struct PollCreated {
    pub poll: Pubkey,
    pub creator: Pubkey,
    pub poll_id: u64,
    pub candidates: u8,
    pub allow_minus_vote: bool,
    pub created_at: i64,
}

#[event]
pub struct VoteCast {
    pub poll: Pubkey,
    pub voter: Pubkey,
    pub first_choice: u8,
    pub second_choice: Option<u8>,
    pub minus_choice: Option<u8>,
    pub total_voters: u64,
}

/// Final tallies, so an indexer can audit the result without replaying votes
#[event]
pub struct PollClosed {
    pub poll: Pubkey,
    pub creator: Pubkey,
    pub total_voters: u64,
    pub vote_counts: Vec<i64>,
}
