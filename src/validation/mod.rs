//! Transaction records and admission screening

mod transaction;
mod fraud;

pub use transaction::*;
pub use fraud::*;
