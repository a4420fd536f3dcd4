use anchor_lang::prelude::*;

/// Every way an operation on the voting ledger can be rejected.
/// A rejected operation leaves all accounts exactly as they were.
#[error_code]
pub enum VotingError {
    // Poll counter errors
    #[msg("Poll counter is already initialized for this creator")]
    AlreadyInitialized,

    #[msg("Poll counter does not exist, initialize it first")]
    CounterMissing,

    // Poll creation errors
    #[msg("Question must not be empty")]
    EmptyQuestion,

    #[msg("Question is too long (maximum 200 characters)")]
    QuestionTooLong,

    #[msg("Poll must have between 3 and 8 candidates")]
    InvalidCandidateCount,

    #[msg("Candidate name is too long (maximum 50 characters)")]
    CandidateNameTooLong,

    // Voting errors
    #[msg("No poll exists at this address")]
    PollNotFound,

    #[msg("Poll is closed")]
    PollClosed,

    #[msg("Invalid candidate index")]
    InvalidCandidateIndex,

    #[msg("Minus vote is not allowed for this poll")]
    MinusVoteNotAllowed,

    #[msg("The same candidate was chosen more than once")]
    DuplicateChoice,

    #[msg("Too many plus votes")]
    TooManyPlusVotes,

    #[msg("Voter has already cast a ballot in this poll")]
    AlreadyVoted,

    #[msg("Minus vote requires two plus votes")]
    MinusVoteRequiresTwoPlusVotes,

    // Authorization and lifecycle errors
    #[msg("Signer is not the poll creator")]
    Unauthorized,

    #[msg("Poll is already closed")]
    AlreadyClosed,

    // General errors
    #[msg("Identity is not a valid public key")]
    InvalidIdentity,

    #[msg("Mathematical overflow")]
    MathOverflow,
}

impl VotingError {
    /// Stable code for logs and client-side matching
    pub fn error_code(&self) -> u32 {
        match self {
            // Counter errors: 1000-1099
            VotingError::AlreadyInitialized => 1001,
            VotingError::CounterMissing => 1002,

            // Poll creation errors: 1100-1199
            VotingError::EmptyQuestion => 1101,
            VotingError::QuestionTooLong => 1102,
            VotingError::InvalidCandidateCount => 1103,
            VotingError::CandidateNameTooLong => 1104,

            // Ballot errors: 1200-1299
            VotingError::PollNotFound => 1201,
            VotingError::PollClosed => 1202,
            VotingError::InvalidCandidateIndex => 1203,
            VotingError::MinusVoteNotAllowed => 1204,
            VotingError::DuplicateChoice => 1205,
            VotingError::TooManyPlusVotes => 1206,
            VotingError::AlreadyVoted => 1207,
            VotingError::MinusVoteRequiresTwoPlusVotes => 1208,

            // Lifecycle errors: 1300-1399
            VotingError::Unauthorized => 1301,
            VotingError::AlreadyClosed => 1302,

            // General errors: 1400-1499
            VotingError::InvalidIdentity => 1401,
            VotingError::MathOverflow => 1402,
        }
    }

    pub fn category(&self) -> &'static str {
        match self.error_code() {
            1000..=1099 => "Poll Counter",
            1100..=1199 => "Poll Creation",
            1200..=1299 => "Ballot",
            1300..=1399 => "Poll Lifecycle",
            1400..=1499 => "General",
            _ => "Unknown",
        }
    }
}
