//! Logging holds wrapper functions for logging loss list events.
//! Each function corresponds to one kind of change to the list and is called
//! from inside the list operations. Per-packet events are logged at TRACE so
//! they cost nothing unless a subscriber asks for them.

use crate::seq_no::SeqNo;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing::{event, Level};
use tracing_subscriber::FmtSubscriber;

/// Installs a JSON subscriber writing to `dir/sndloss-<date>.log`. Should
/// only be called once, when the sender starts.
pub fn init_events(dir: impl AsRef<Path>) -> Result<(), LoggingError> {
    let file_path = dir.as_ref().join(format!(
        "sndloss-{}.log",
        chrono::offset::Local::now().format("%y-%m-%d")
    ));
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(file_path)?;
    let subscriber = FmtSubscriber::builder()
        .with_writer(Arc::new(file))
        .with_max_level(Level::TRACE)
        .json()
        .finish();
    // set the global default so every list in the process logs to the same file
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open the log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("A global subscriber is already installed")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// A loss range was recorded. `added` counts only the sequence numbers that
/// were not already known.
pub(crate) fn insert_event(first: SeqNo, last: SeqNo, added: usize, length: usize) {
    event!(
        Level::TRACE,
        first = first.value(),
        last = last.value(),
        added,
        length,
        "loss inserted"
    );
}

/// A new run was needed but every slot is taken.
pub(crate) fn rejected_event(first: SeqNo, last: SeqNo, capacity: usize) {
    event!(
        Level::DEBUG,
        first = first.value(),
        last = last.value(),
        capacity,
        "loss list full, report dropped"
    );
}

/// The caller passed a range whose end comes before its start.
pub(crate) fn inverted_event(first: SeqNo, last: SeqNo) {
    event!(
        Level::WARN,
        first = first.value(),
        last = last.value(),
        "inverted loss range ignored"
    );
}

pub(crate) fn pop_event(seq: SeqNo, length: usize) {
    event!(Level::TRACE, seq = seq.value(), length, "loss popped");
}

pub(crate) fn remove_event(upto: SeqNo, removed: usize, length: usize) {
    event!(
        Level::TRACE,
        upto = upto.value(),
        removed,
        length,
        "acknowledged losses removed"
    );
}

pub(crate) fn state_event(runs: usize, length: usize, layout: &str) {
    event!(Level::DEBUG, runs, length, layout, "loss list state");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn events_carry_fields() {
        insert_event(SeqNo::new(4), SeqNo::new(9), 6, 6);
        rejected_event(SeqNo::new(20), SeqNo::new(20), 3);
        assert!(logs_contain("loss inserted"));
        assert!(logs_contain("added=6"));
        assert!(logs_contain("loss list full"));
    }

    #[test]
    fn init_reports_missing_directory() {
        let result = init_events("/nonexistent/sndloss/logs");
        assert!(matches!(result, Err(LoggingError::Io(_))));
    }
}
