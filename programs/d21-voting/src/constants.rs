// PDA Seeds for deterministic address generation

/// Seed for PollCounter PDAs: ["poll_counter", creator.key()]
/// One counter per creator, so the creator's key alone locates it
pub const POLL_COUNTER_SEED: &[u8] = b"poll_counter";

/// Seed for Poll PDAs: ["poll", creator.key(), poll_id]
/// poll_id is the creator's poll_count at creation time (little-endian u64)
pub const POLL_SEED: &[u8] = b"poll";

/// Seed for VoteRecord PDAs: ["vote_record", poll.key(), voter.key()]
/// One record per voter per poll
pub const VOTE_RECORD_SEED: &[u8] = b"vote_record";

// Poll shape limits

pub const MIN_CANDIDATES: usize = 3;
pub const MAX_CANDIDATES: usize = 8;

/// Number of distinct candidates a single ballot may give a plus vote to.
/// Fixed policy: callers may pass another value, it is never stored.
pub const MAX_PLUS_VOTES: u8 = 2;

pub const MAX_QUESTION_LENGTH: usize = 200;
pub const MAX_CANDIDATE_LENGTH: usize = 50;

// Anchor discriminator size (8 bytes)
pub const DISCRIMINATOR_SIZE: usize = 8;

/// Check a candidate list length against the poll shape limits
pub fn is_valid_candidate_count(count: usize) -> bool {
    (MIN_CANDIDATES..=MAX_CANDIDATES).contains(&count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_count_bounds() {
        assert!(!is_valid_candidate_count(0));
        assert!(!is_valid_candidate_count(MIN_CANDIDATES - 1));
        assert!(is_valid_candidate_count(MIN_CANDIDATES));
        assert!(is_valid_candidate_count(5));
        assert!(is_valid_candidate_count(MAX_CANDIDATES));
        assert!(!is_valid_candidate_count(MAX_CANDIDATES + 1));
    }

    #[test]
    fn test_seeds_are_distinct() {
        assert_ne!(POLL_COUNTER_SEED, POLL_SEED);
        assert_ne!(POLL_SEED, VOTE_RECORD_SEED);
        assert_ne!(POLL_COUNTER_SEED, VOTE_RECORD_SEED);
    }
}
