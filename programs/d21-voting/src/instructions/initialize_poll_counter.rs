use anchor_lang::prelude::*;
use crate::{constants::*, error::VotingError, events::PollCounterInitialized, state::PollCounter};

// Accounts needed for creating a creator's poll counter
#[derive(Accounts)]
pub struct InitializePollCounter<'info> {
    // The creator whose polls this counter will number
    #[account(mut)]
    pub creator: Signer<'info>,

    // Counter PDA - one per creator.
    // init_if_needed so a second call fails with AlreadyInitialized
    // instead of the system program's "account already in use"
    #[account(
        init_if_needed,
        payer = creator,
        space = DISCRIMINATOR_SIZE + PollCounter::INIT_SPACE,
        seeds = [POLL_COUNTER_SEED, creator.key().as_ref()],
        bump
    )]
    pub poll_counter: Account<'info, PollCounter>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializePollCounter<'info> {
    pub fn initialize_poll_counter(&mut self, bumps: &InitializePollCounterBumps) -> Result<()> {
        require!(
            !self.poll_counter.is_initialized(),
            VotingError::AlreadyInitialized
        );

        self.poll_counter
            .set_inner(PollCounter::new(self.creator.key(), bumps.poll_counter));

        msg!("Poll counter initialized for creator: {}", self.creator.key());

        emit!(PollCounterInitialized {
            creator: self.creator.key(),
            poll_counter: self.poll_counter.key(),
        });

        Ok(())
    }
}
