//! Transaction submission module

mod submitter;
mod types;

pub use submitter::TransactionSubmitter;
pub use types::{SignedTransaction, TransactionRequest};
