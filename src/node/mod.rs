//! Node bootstrap - genesis block

mod genesis;

pub use genesis::*;
