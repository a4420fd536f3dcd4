use anchor_lang::prelude::{Pubkey, Result};
use d21_voting::{pda::parse_identity, state::Ballot};

/// The four operations callers can submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Create the signer's poll counter
    InitCounter,
    CreatePoll {
        creator: Pubkey,
        question: String,
        candidates: Vec<String>,
        /// Accepted for compatibility, always stored as 2
        max_plus_votes: u8,
        allow_minus_vote: bool,
    },
    CastVote {
        poll: Pubkey,
        ballot: Ballot,
    },
    ClosePoll {
        poll: Pubkey,
    },
}

/// An operation together with the identity whose signature the runtime verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedOperation {
    pub signer: Pubkey,
    pub operation: Operation,
}

impl SignedOperation {
    pub fn new(signer: Pubkey, operation: Operation) -> Self {
        Self { signer, operation }
    }

    /// Build from a base58 signer as a client would pass it.
    /// Malformed or all-zero keys fail with `InvalidIdentity`.
    pub fn parse(signer: &str, operation: Operation) -> Result<Self> {
        Ok(Self::new(parse_identity(signer)?, operation))
    }
}

/// What a committed operation wrote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    CounterInitialized { poll_counter: Pubkey },
    PollCreated { poll: Pubkey, poll_id: u64 },
    VoteRecorded { vote_record: Pubkey },
    PollClosed { poll: Pubkey },
}
