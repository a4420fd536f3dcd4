use std::collections::BTreeMap;
use std::fmt::Debug;

use anchor_lang::prelude::*;
use d21_voting::{
    constants::MAX_PLUS_VOTES,
    error::VotingError,
    pda::{self, check_identity},
    state::{Ballot, Poll, PollCounter, VoteRecord},
};
use tracing::{debug, warn};

use crate::operation::{Operation, Outcome, SignedOperation};

/// Records of the voting program, keyed by their derived addresses.
///
/// Methods take `&mut self`, so operations are applied one at a time in the
/// order they are submitted. Every operation stages its writes on copies and
/// only commits them once all checks passed.
#[derive(Clone)]
pub struct Ledger {
    program_id: Pubkey,
    unix_timestamp: i64,
    counters: BTreeMap<Pubkey, PollCounter>,
    polls: BTreeMap<Pubkey, Poll>,
    vote_records: BTreeMap<Pubkey, VoteRecord>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(d21_voting::ID)
    }
}

impl Ledger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            unix_timestamp: 0,
            counters: BTreeMap::new(),
            polls: BTreeMap::new(),
            vote_records: BTreeMap::new(),
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn unix_timestamp(&self) -> i64 {
        self.unix_timestamp
    }

    /// Clock read by operations that stamp records (`created_at`, `voted_at`)
    pub fn set_unix_timestamp(&mut self, unix_timestamp: i64) {
        self.unix_timestamp = unix_timestamp;
    }

    /// Apply one signed operation
    pub fn submit(&mut self, signed: SignedOperation) -> Result<Outcome> {
        let SignedOperation { signer, operation } = signed;

        match operation {
            Operation::InitCounter => self
                .init_counter(signer)
                .map(|poll_counter| Outcome::CounterInitialized { poll_counter }),
            Operation::CreatePoll {
                creator,
                question,
                candidates,
                max_plus_votes,
                allow_minus_vote,
            } => {
                let poll = self.create_poll(
                    signer,
                    creator,
                    question,
                    candidates,
                    max_plus_votes,
                    allow_minus_vote,
                )?;
                let poll_id = self.polls[&poll].poll_id;
                Ok(Outcome::PollCreated { poll, poll_id })
            }
            Operation::CastVote { poll, ballot } => self
                .cast_vote(signer, poll, ballot)
                .map(|vote_record| Outcome::VoteRecorded { vote_record }),
            Operation::ClosePoll { poll } => self
                .close_poll(signer, poll)
                .map(|()| Outcome::PollClosed { poll }),
        }
    }

    /// Create the signer's PollCounter. Returns its address.
    pub fn init_counter(&mut self, creator: Pubkey) -> Result<Pubkey> {
        let result = self.apply_init_counter(creator);
        log_result("init_counter", &creator, &result);
        result
    }

    /// Create a poll under the creator's next id. Returns the poll address.
    pub fn create_poll(
        &mut self,
        signer: Pubkey,
        creator: Pubkey,
        question: String,
        candidates: Vec<String>,
        max_plus_votes: u8,
        allow_minus_vote: bool,
    ) -> Result<Pubkey> {
        let result = self.apply_create_poll(
            signer,
            creator,
            question,
            candidates,
            max_plus_votes,
            allow_minus_vote,
        );
        log_result("create_poll", &signer, &result);
        result
    }

    /// Record the voter's ballot. Returns the address of the new vote record.
    pub fn cast_vote(&mut self, voter: Pubkey, poll: Pubkey, ballot: Ballot) -> Result<Pubkey> {
        let result = self.apply_cast_vote(voter, poll, ballot);
        log_result("cast_vote", &voter, &result);
        result
    }

    pub fn close_poll(&mut self, caller: Pubkey, poll: Pubkey) -> Result<()> {
        let result = self.apply_close_poll(caller, poll);
        log_result("close_poll", &caller, &result);
        result
    }

    fn apply_init_counter(&mut self, creator: Pubkey) -> Result<Pubkey> {
        check_identity(&creator)?;

        let (address, bump) = pda::poll_counter_address(&self.program_id, &creator);
        require!(
            !self.counters.contains_key(&address),
            VotingError::AlreadyInitialized
        );

        self.counters.insert(address, PollCounter::new(creator, bump));
        Ok(address)
    }

    fn apply_create_poll(
        &mut self,
        signer: Pubkey,
        creator: Pubkey,
        question: String,
        candidates: Vec<String>,
        max_plus_votes: u8,
        allow_minus_vote: bool,
    ) -> Result<Pubkey> {
        check_identity(&signer)?;
        require_keys_eq!(signer, creator, VotingError::Unauthorized);

        let (counter_address, _) = pda::poll_counter_address(&self.program_id, &creator);
        let mut counter = self
            .counters
            .get(&counter_address)
            .cloned()
            .ok_or(VotingError::CounterMissing)?;

        if max_plus_votes != MAX_PLUS_VOTES {
            debug!(
                requested = max_plus_votes,
                stored = MAX_PLUS_VOTES,
                "max_plus_votes is fixed, ignoring requested value"
            );
        }

        let poll_id = counter.claim_next_id()?;
        let (poll_address, bump) = pda::poll_address(&self.program_id, &creator, poll_id);
        debug_assert!(
            !self.polls.contains_key(&poll_address),
            "poll address collision for {} #{}",
            creator,
            poll_id
        );

        let poll = Poll::open(
            creator,
            poll_id,
            question,
            candidates,
            allow_minus_vote,
            self.unix_timestamp,
            bump,
        )?;

        self.counters.insert(counter_address, counter);
        self.polls.insert(poll_address, poll);
        Ok(poll_address)
    }

    fn apply_cast_vote(&mut self, voter: Pubkey, poll_address: Pubkey, ballot: Ballot) -> Result<Pubkey> {
        check_identity(&voter)?;

        let mut poll = self
            .polls
            .get(&poll_address)
            .cloned()
            .ok_or(VotingError::PollNotFound)?;

        let (record_address, bump) =
            pda::vote_record_address(&self.program_id, &poll_address, &voter);
        require!(
            !self.vote_records.contains_key(&record_address),
            VotingError::AlreadyVoted
        );

        poll.record_ballot(&ballot)?;
        let record = VoteRecord::new(poll_address, voter, &ballot, self.unix_timestamp, bump);

        self.polls.insert(poll_address, poll);
        self.vote_records.insert(record_address, record);
        Ok(record_address)
    }

    fn apply_close_poll(&mut self, caller: Pubkey, poll_address: Pubkey) -> Result<()> {
        check_identity(&caller)?;

        let poll = self
            .polls
            .get_mut(&poll_address)
            .ok_or(VotingError::PollNotFound)?;

        // Poll::close checks before it writes
        poll.close(&caller)
    }

    pub fn poll_counter(&self, creator: &Pubkey) -> Option<&PollCounter> {
        let (address, _) = pda::poll_counter_address(&self.program_id, creator);
        self.counters.get(&address)
    }

    pub fn poll(&self, address: &Pubkey) -> Option<&Poll> {
        self.polls.get(address)
    }

    /// Look a poll up by its seeds instead of its address
    pub fn find_poll(&self, creator: &Pubkey, poll_id: u64) -> Option<(Pubkey, &Poll)> {
        let (address, _) = pda::poll_address(&self.program_id, creator, poll_id);
        self.polls.get(&address).map(|poll| (address, poll))
    }

    /// Every poll with its address, in address order
    pub fn polls(&self) -> impl Iterator<Item = (&Pubkey, &Poll)> {
        self.polls.iter()
    }

    pub fn polls_by_creator<'a>(
        &'a self,
        creator: &'a Pubkey,
    ) -> impl Iterator<Item = (&'a Pubkey, &'a Poll)> + 'a {
        self.polls().filter(move |(_, poll)| poll.creator == *creator)
    }

    pub fn active_polls(&self) -> impl Iterator<Item = (&Pubkey, &Poll)> {
        self.polls().filter(|(_, poll)| poll.is_active)
    }

    pub fn vote_record(&self, poll: &Pubkey, voter: &Pubkey) -> Option<&VoteRecord> {
        let (address, _) = pda::vote_record_address(&self.program_id, poll, voter);
        self.vote_records.get(&address)
    }

    pub fn has_voted(&self, poll: &Pubkey, voter: &Pubkey) -> bool {
        self.vote_record(poll, voter).is_some()
    }
}

fn log_result<T: Debug>(operation: &str, signer: &Pubkey, result: &Result<T>) {
    match result {
        Ok(value) => debug!(operation, signer = %signer, result = ?value, "operation committed"),
        Err(err) => warn!(operation, signer = %signer, error = %err, "operation rejected"),
    }
}
