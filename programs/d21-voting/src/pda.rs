use std::str::FromStr;

use anchor_lang::prelude::*;

use crate::{constants::*, error::VotingError};

/// Address of a creator's PollCounter: ["poll_counter", creator]
pub fn poll_counter_address(program_id: &Pubkey, creator: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POLL_COUNTER_SEED, creator.as_ref()], program_id)
}

/// Address of a Poll: ["poll", creator, poll_id (le bytes)]
pub fn poll_address(program_id: &Pubkey, creator: &Pubkey, poll_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POLL_SEED, creator.as_ref(), poll_id.to_le_bytes().as_ref()],
        program_id,
    )
}

/// Address of the marker proving `voter` has voted in `poll`: ["vote_record", poll, voter]
pub fn vote_record_address(program_id: &Pubkey, poll: &Pubkey, voter: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[VOTE_RECORD_SEED, poll.as_ref(), voter.as_ref()],
        program_id,
    )
}

/// Parse a base58 identity as supplied by a client. The all-zero key is
/// refused: it is the value of every unset field in a freshly allocated
/// account, so it can't own anything.
pub fn parse_identity(value: &str) -> Result<Pubkey> {
    let identity = Pubkey::from_str(value.trim()).map_err(|_| VotingError::InvalidIdentity)?;
    check_identity(&identity)?;
    Ok(identity)
}

pub fn check_identity(identity: &Pubkey) -> Result<()> {
    require!(*identity != Pubkey::default(), VotingError::InvalidIdentity);
    Ok(())
}
