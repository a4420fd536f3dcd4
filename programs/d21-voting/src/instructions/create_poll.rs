use anchor_lang::prelude::*;
use crate::{
    constants::*,
    error::VotingError,
    events::PollCreated,
    state::{Poll, PollCounter},
};

// Accounts needed for creating a new poll
#[derive(Accounts)]
pub struct CreatePoll<'info> {
    // The person creating the poll (must sign the transaction)
    #[account(mut)]
    pub creator: Signer<'info>,

    // The creator's counter; its poll_count becomes the new poll's id.
    // Allocated here only so a missing counter can be reported as
    // CounterMissing, the failed transaction drops the allocation again.
    #[account(
        init_if_needed,
        payer = creator,
        space = DISCRIMINATOR_SIZE + PollCounter::INIT_SPACE,
        seeds = [POLL_COUNTER_SEED, creator.key().as_ref()],
        bump
    )]
    pub poll_counter: Account<'info, PollCounter>,

    // The poll account (PDA) - will be created
    #[account(
        init,
        payer = creator,
        space = DISCRIMINATOR_SIZE + Poll::INIT_SPACE,
        seeds = [POLL_SEED, creator.key().as_ref(), poll_counter.poll_count.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreatePoll<'info> {
    pub fn create_poll(
        &mut self,
        question: String,
        candidates: Vec<String>,
        max_plus_votes: u8,
        allow_minus_vote: bool,
        bumps: &CreatePollBumps,
    ) -> Result<()> {
        require!(
            self.poll_counter.is_initialized(),
            VotingError::CounterMissing
        );

        if max_plus_votes != MAX_PLUS_VOTES {
            msg!(
                "Requested max_plus_votes={} ignored, polls allow {}",
                max_plus_votes,
                MAX_PLUS_VOTES
            );
        }

        let created_at = Clock::get()?.unix_timestamp;

        // Must be the value the poll address was derived from
        let poll_id = self.poll_counter.poll_count;

        let poll = Poll::open(
            self.creator.key(),
            poll_id,
            question,
            candidates,
            allow_minus_vote,
            created_at,
            bumps.poll,
        )?;
        self.poll_counter.claim_next_id()?;
        self.poll.set_inner(poll);

        msg!("Poll created: {}", self.poll.question);
        msg!("Poll ID: {}", poll_id);
        msg!("Creator: {}", self.creator.key());
        msg!("Candidates: {}", self.poll.candidates.len());

        emit!(PollCreated {
            poll: self.poll.key(),
            creator: self.creator.key(),
            poll_id,
            candidates: self.poll.candidates.len() as u8,
            allow_minus_vote,
            created_at,
        });

        Ok(())
    }
}
