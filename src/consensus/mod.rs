//! Consensus module - block structure, authority set, and chain validation

mod block;
mod authority;
mod validation;

pub use block::*;
pub use authority::*;
pub use validation::*;
