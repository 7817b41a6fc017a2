//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// No free block is large enough for the request.
    BufferOverflow {
        /// Number of bytes requested.
        requested: usize,
        /// Size of the largest free block at the time of the request.
        largest_free: usize,
    },
    /// The released range extends past the end of the arena.
    OutOfRange {
        /// Start of the released range.
        offset: usize,
        /// Length of the released range.
        size: usize,
        /// Arena capacity in bytes.
        capacity: usize,
    },
    /// The released range overlaps a block that is already free.
    DoubleFree {
        /// Start of the released range.
        offset: usize,
        /// Length of the released range.
        size: usize,
    },
    /// Zero-byte allocations and releases are not meaningful.
    ZeroSized,
    /// The arena configuration failed validation.
    InvalidConfig {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferOverflow {
                requested,
                largest_free,
            } => write!(
                f,
                "buffer overflow: requested {requested} bytes, largest free block {largest_free} bytes"
            ),
            Self::OutOfRange {
                offset,
                size,
                capacity,
            } => write!(
                f,
                "block {offset}+{size} out of range for arena of {capacity} bytes"
            ),
            Self::DoubleFree { offset, size } => {
                write!(f, "double free of block {offset}+{size}")
            }
            Self::ZeroSized => write!(f, "zero-sized block"),
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
