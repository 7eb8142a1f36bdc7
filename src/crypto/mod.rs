//! Cryptography module - SHA-256 hashing and canonical serialization

mod hash;
mod canonical;

pub use hash::*;
pub use canonical::*;
