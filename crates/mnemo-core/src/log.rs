//! Append-only error log.

use crate::error::{ErrorKind, ErrorRecord};

/// Ordered, append-only record of faults.
///
/// One log is owned by each manager instance. Entries are never removed
/// or rewritten.
#[derive(Clone, Debug, Default)]
pub struct ErrorLog {
    records: Vec<ErrorRecord>,
}

impl ErrorLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and emit it as a `warn` event.
    pub fn record(&mut self, kind: ErrorKind, description: impl Into<String>, program: &str) {
        let record = ErrorRecord::new(kind, description, program);
        tracing::warn!(
            kind = %record.kind(),
            program = record.program(),
            "{}",
            record.description()
        );
        self.records.push(record);
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Records attributed to `program`, in insertion order.
    pub fn for_program<'a>(&'a self, program: &'a str) -> impl Iterator<Item = &'a ErrorRecord> + 'a {
        self.records.iter().filter(move |r| r.program() == program)
    }

    /// Records of one kind, in insertion order.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ErrorRecord> + '_ {
        self.records.iter().filter(move |r| r.kind() == kind)
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&ErrorRecord> {
        self.records.last()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_kept_in_order() {
        let mut log = ErrorLog::new();
        log.record(ErrorKind::SizeError, "first", "a");
        log.record(ErrorKind::AccessError, "second", "b");
        assert_eq!(log.len(), 2);
        assert_eq!(log.all()[0].description(), "first");
        assert_eq!(log.last().unwrap().kind(), ErrorKind::AccessError);
    }

    #[test]
    fn filters_by_program_and_kind() {
        let mut log = ErrorLog::new();
        log.record(ErrorKind::SizeError, "x", "a");
        log.record(ErrorKind::MemoryLeak, "y", "b");
        log.record(ErrorKind::SizeError, "z", "b");

        let b: Vec<_> = log.for_program("b").map(|r| r.description()).collect();
        assert_eq!(b, ["y", "z"]);
        assert_eq!(log.of_kind(ErrorKind::SizeError).count(), 2);
        assert_eq!(log.for_program("nobody").count(), 0);
    }

    #[test]
    fn new_log_is_empty() {
        let log = ErrorLog::new();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}
