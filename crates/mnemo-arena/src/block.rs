//! Free block descriptors.

use std::fmt;

/// A contiguous run of unallocated bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FreeBlock {
    /// Byte offset of the first free byte.
    pub offset: usize,
    /// Number of free bytes.
    pub size: usize,
}

impl FreeBlock {
    /// Create a block descriptor.
    pub fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// One past the last byte of the block.
    pub fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Whether `other` starts exactly where this block ends.
    pub fn touches(&self, other: &FreeBlock) -> bool {
        self.end() == other.offset
    }
}

impl fmt::Display for FreeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.offset, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_is_offset_plus_size() {
        assert_eq!(FreeBlock::new(100, 24).end(), 124);
    }

    #[test]
    fn touching_blocks() {
        let a = FreeBlock::new(0, 10);
        assert!(a.touches(&FreeBlock::new(10, 5)));
        assert!(!a.touches(&FreeBlock::new(11, 5)));
    }

    #[test]
    fn display_is_half_open() {
        assert_eq!(FreeBlock::new(3, 4).to_string(), "[3, 7)");
    }
}
