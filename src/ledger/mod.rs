//! Ledger - chain, transaction queues and authority gate

mod state;
mod shared;

pub use state::*;
pub use shared::*;
