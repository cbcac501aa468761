//! Transaction record sinks.
//!
//! The core emits one [`Transaction`](crate::service::Transaction) per
//! successful operation to a write-only collaborator; it never reads the
//! records back. Two sinks are provided:
//!
//! - [`TransactionLog`]: line-oriented append-only file, one line per
//!   transaction
//! - [`MemorySink`]: in-memory buffer for tests and rendering layers

mod transaction_log;

pub use transaction_log::{MemorySink, TransactionLog};

use std::io;

use crate::service::Transaction;

/// Write-only collaborator that accepts transaction records for
/// persistence or display.
pub trait TransactionSink {
    /// Record one transaction. Errors are reported to the caller; the
    /// service logs them and continues.
    fn record(&mut self, transaction: &Transaction) -> io::Result<()>;
}
