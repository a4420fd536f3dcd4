#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

// Import our modules
pub mod constants;
pub mod error;
pub mod events;
pub mod pda;
pub mod state;
pub mod instructions;

// Import instruction handlers
use instructions::*;

declare_id!("HMAsaxWSeKw9Kb8yfLVcCzxktTYw3xxup1rMu6kJfYeX");

#[program]
pub mod d21_voting {
    use super::*;

    /// Create the caller's poll counter (must run once before their first poll)
    pub fn initialize_poll_counter(ctx: Context<InitializePollCounter>) -> Result<()> {
        ctx.accounts.initialize_poll_counter(&ctx.bumps)
    }

    /// Create a poll at the address derived from the creator's next poll id
    pub fn create_poll(
        ctx: Context<CreatePoll>,
        question: String,
        candidates: Vec<String>,
        max_plus_votes: u8,
        allow_minus_vote: bool,
    ) -> Result<()> {
        ctx.accounts
            .create_poll(question, candidates, max_plus_votes, allow_minus_vote, &ctx.bumps)
    }

    /// Cast one D21 ballot: one or two plus votes, optionally one minus vote
    pub fn cast_vote(
        ctx: Context<CastVote>,
        first_choice: u8,
        second_choice: Option<u8>,
        minus_choice: Option<u8>,
    ) -> Result<()> {
        ctx.accounts
            .cast_vote(first_choice, second_choice, minus_choice, &ctx.bumps)
    }

    /// Close a poll (creator only, irreversible)
    pub fn close_poll(ctx: Context<ClosePoll>) -> Result<()> {
        ctx.accounts.close_poll()
    }
}
