use anchor_lang::prelude::*;
use crate::{constants::*, events::PollClosed, state::Poll};

// Accounts needed for closing a poll
#[derive(Accounts)]
pub struct ClosePoll<'info> {
    // Must be the poll creator; checked by Poll::close so a stranger gets
    // Unauthorized rather than a seeds mismatch
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [POLL_SEED, poll.creator.as_ref(), poll.poll_id.to_le_bytes().as_ref()],
        bump = poll.bump
    )]
    pub poll: Account<'info, Poll>,
}

impl<'info> ClosePoll<'info> {
    pub fn close_poll(&mut self) -> Result<()> {
        Poll::close(&mut self.poll, &self.caller.key())?;

        // Log the poll results
        msg!("Poll closed: {}", self.poll.question);
        msg!("Poll ID: {}", self.poll.poll_id);
        msg!("Total voters: {}", self.poll.total_voters);

        for standing in self.poll.standings() {
            msg!(
                "Candidate {}: '{}' - {} net votes",
                standing.index,
                standing.candidate,
                standing.net_votes
            );
        }

        let leaders = self.poll.leaders();
        match leaders.as_slice() {
            [] => msg!("No votes were cast on this poll."),
            [winner] => msg!("Winner: '{}'", self.poll.candidates[*winner as usize]),
            tied => msg!("Tie between candidates {:?}", tied),
        }

        emit!(PollClosed {
            poll: self.poll.key(),
            creator: self.poll.creator,
            total_voters: self.poll.total_voters,
            vote_counts: self.poll.vote_counts.clone(),
        });

        Ok(())
    }
}
