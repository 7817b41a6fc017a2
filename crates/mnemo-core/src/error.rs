//! Fault taxonomy for the memory simulator.
//!
//! Two channels exist. Registry faults (quota exceeded, duplicate names,
//! double frees, permission failures) are captured as [`ErrorRecord`]s
//! in the manager's log and surfaced by query. Contract violations on
//! typed or raw value access are returned directly as [`ValueError`].

use std::error::Error;
use std::fmt;

/// Category of a recorded fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    /// Capacity or quota exceeded, or an invalid range.
    SizeError,
    /// Duplicate-name allocation, destroy of an unknown name, live
    /// elements at program teardown, or stripping the last shared owner.
    MemoryLeak,
    /// The arena block being released is already free.
    DoubleFree,
    /// Unknown program or element, or permission denied.
    AccessError,
}

impl ErrorKind {
    /// Upper-case tag used in rendered descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SizeError => "SIZE_ERROR",
            Self::MemoryLeak => "MEMORY_LEAK",
            Self::DoubleFree => "DOUBLE_FREE",
            Self::AccessError => "ACCESS_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry of the error log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    kind: ErrorKind,
    description: String,
    program: String,
}

impl ErrorRecord {
    /// Create a record attributed to `program`.
    pub fn new(kind: ErrorKind, description: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            program: program.into(),
        }
    }

    /// The fault category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Free-text description of what went wrong.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Name of the program the fault is attributed to.
    ///
    /// Empty when the fault did not originate from a program (for example
    /// a failed typed write issued directly by a caller).
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error: {}: {} (program '{}')",
            self.kind, self.description, self.program
        )
    }
}

/// Contract violations on element value access.
///
/// These are caller bugs rather than simulated faults, so they are
/// returned immediately instead of being appended to the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueError {
    /// No element is registered under the name.
    UnknownElement {
        /// The name that failed to resolve.
        name: String,
    },
    /// The requested value type matches neither the stride nor the total
    /// size of the element.
    SizeMismatch {
        /// Byte size of the requested type.
        requested: usize,
        /// Stride of the element.
        elem_size: usize,
        /// Total size of the element.
        size: usize,
    },
    /// The addressed byte range falls outside the element.
    RangeOutOfBounds {
        /// First byte addressed, relative to the element.
        begin: usize,
        /// One past the last byte addressed.
        end: usize,
        /// Total size of the element.
        size: usize,
    },
    /// The caller's buffer does not match the addressed range.
    BufferLength {
        /// Bytes covered by the span.
        expected: usize,
        /// Bytes supplied by the caller.
        actual: usize,
    },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement { name } => write!(f, "unknown element '{name}'"),
            Self::SizeMismatch {
                requested,
                elem_size,
                size,
            } => write!(
                f,
                "size mismatch: type is {requested} bytes, element stride {elem_size}, total {size}"
            ),
            Self::RangeOutOfBounds { begin, end, size } => {
                write!(f, "range {begin}..{end} out of bounds for element of {size} bytes")
            }
            Self::BufferLength { expected, actual } => {
                write!(f, "buffer length {actual} does not match span of {expected} bytes")
            }
        }
    }
}

impl Error for ValueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_contains_kind_program_and_text() {
        let error = ErrorRecord::new(ErrorKind::SizeError, "Memory limit exceeded", "test_program");
        let desc = error.to_string();
        assert!(desc.contains("SIZE_ERROR"));
        assert!(desc.contains("test_program"));
        assert!(desc.contains("Memory limit exceeded"));
    }

    #[test]
    fn getters_return_constructor_values() {
        let records = [
            ErrorRecord::new(ErrorKind::SizeError, "msg1", "prog1"),
            ErrorRecord::new(ErrorKind::MemoryLeak, "msg2", "prog2"),
            ErrorRecord::new(ErrorKind::DoubleFree, "msg3", "prog3"),
            ErrorRecord::new(ErrorKind::AccessError, "msg4", "prog4"),
        ];
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.program(), format!("prog{}", i + 1));
            assert_eq!(record.description(), format!("msg{}", i + 1));
        }
        assert_eq!(records[2].kind(), ErrorKind::DoubleFree);
    }

    #[test]
    fn kind_tags_are_stable() {
        assert_eq!(ErrorKind::MemoryLeak.to_string(), "MEMORY_LEAK");
        assert_eq!(ErrorKind::AccessError.as_str(), "ACCESS_ERROR");
    }

    #[test]
    fn size_mismatch_message_names_all_sizes() {
        let err = ValueError::SizeMismatch {
            requested: 8,
            elem_size: 4,
            size: 40,
        };
        let msg = err.to_string();
        assert!(msg.contains('8') && msg.contains('4') && msg.contains("40"));
    }
}
