use anchor_lang::prelude::*;
use crate::{
    constants::*,
    error::VotingError,
    events::VoteCast,
    state::{Ballot, Poll, VoteRecord},
};

// Accounts needed for casting a vote
#[derive(Accounts)]
pub struct CastVote<'info> {
    // The person casting the vote (must sign the transaction)
    #[account(mut)]
    pub voter: Signer<'info>,

    // The poll being voted on
    #[account(
        mut,
        seeds = [POLL_SEED, poll.creator.as_ref(), poll.poll_id.to_le_bytes().as_ref()],
        bump = poll.bump
    )]
    pub poll: Account<'info, Poll>,

    // Vote record PDA - one per voter per poll. A populated record means
    // this key already voted.
    #[account(
        init_if_needed,
        payer = voter,
        space = DISCRIMINATOR_SIZE + VoteRecord::INIT_SPACE,
        seeds = [VOTE_RECORD_SEED, poll.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub vote_record: Account<'info, VoteRecord>,

    pub system_program: Program<'info, System>,
}

impl<'info> CastVote<'info> {
    pub fn cast_vote(
        &mut self,
        first_choice: u8,
        second_choice: Option<u8>,
        minus_choice: Option<u8>,
        bumps: &CastVoteBumps,
    ) -> Result<()> {
        require!(!self.vote_record.is_recorded(), VotingError::AlreadyVoted);

        let ballot = Ballot::new(first_choice, second_choice, minus_choice);
        self.poll.record_ballot(&ballot)?;

        let voted_at = Clock::get()?.unix_timestamp;
        self.vote_record.set_inner(VoteRecord::new(
            self.poll.key(),
            self.voter.key(),
            &ballot,
            voted_at,
            bumps.vote_record,
        ));

        msg!("Vote cast successfully by: {}", self.voter.key());
        msg!("Poll: {}", self.poll.key());
        msg!(
            "Plus: {} {:?}, minus: {:?}",
            first_choice,
            second_choice,
            minus_choice
        );
        msg!("Total voters in poll: {}", self.poll.total_voters);

        emit!(VoteCast {
            poll: self.poll.key(),
            voter: self.voter.key(),
            first_choice,
            second_choice,
            minus_choice,
            total_voters: self.poll.total_voters,
        });

        Ok(())
    }
}
