//! In-memory model of the runtime that executes the `d21_voting` program.
//!
//! The [`Ledger`] keeps every record at its program-derived address, checks
//! the signer of each operation, and runs the same state rules the on-chain
//! handlers run. An operation either commits all of its writes or none.

pub mod ledger;
pub mod operation;

pub use ledger::Ledger;
pub use operation::{Operation, Outcome, SignedOperation};
