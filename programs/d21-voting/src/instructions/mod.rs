// Export all instruction modules

pub mod initialize_poll_counter;
pub mod create_poll;
pub mod cast_vote;
pub mod close_poll;

// Re-export the instruction structs for easy access
pub use initialize_poll_counter::*;
pub use create_poll::*;
pub use cast_vote::*;
pub use close_poll::*;
