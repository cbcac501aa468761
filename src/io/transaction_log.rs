//! Line-oriented transaction log.
//!
//! Each transaction is appended as one human-readable line in the
//! transaction's `Display` form, e.g.:
//!
//! ```text
//! park V1 gate=A spot=(0,1) cost=2 route=(0,0)->(0,1)
//! unpark V1 gate=A spot=(0,1) cost=2 route=(0,1)->(0,0)
//! ```
//!
//! The format is append-only and not version-sensitive.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::io::TransactionSink;
use crate::service::Transaction;

/// Append-only file sink
pub struct TransactionLog {
    writer: BufWriter<File>,
}

impl TransactionLog {
    /// Open (or create) the log file for appending
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl TransactionSink for TransactionLog {
    fn record(&mut self, transaction: &Transaction) -> io::Result<()> {
        writeln!(self.writer, "{}", transaction)?;
        // One flush per transaction: lines must survive an abrupt exit.
        self.writer.flush()
    }
}

/// In-memory sink for tests and rendering collaborators
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Recorded transactions, oldest first
    pub transactions: Vec<Transaction>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionSink for MemorySink {
    fn record(&mut self, transaction: &Transaction) -> io::Result<()> {
        self.transactions.push(transaction.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridCoord;
    use crate::pathfinding::Route;
    use crate::service::TransactionKind;

    fn sample_transaction() -> Transaction {
        Transaction {
            kind: TransactionKind::Park,
            vehicle: "V1".to_string(),
            gate: 'A',
            spot: GridCoord::new(0, 1),
            route: Some(Route {
                cells: vec![GridCoord::new(0, 0), GridCoord::new(0, 1)],
            }),
        }
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        let tx = sample_transaction();
        sink.record(&tx).unwrap();
        sink.record(&tx).unwrap();
        assert_eq!(sink.transactions.len(), 2);
        assert_eq!(sink.transactions[0], tx);
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let path = std::env::temp_dir().join(format!(
            "vahana_park_txlog_{}.log",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let mut log = TransactionLog::open(&path).unwrap();
            log.record(&sample_transaction()).unwrap();
        }
        {
            // Reopening appends rather than truncating.
            let mut log = TransactionLog::open(&path).unwrap();
            log.record(&sample_transaction()).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "park V1 gate=A spot=(0,1) cost=2 route=(0,0)->(0,1)");
        assert_eq!(lines[0], lines[1]);

        let _ = std::fs::remove_file(&path);
    }
}
