//! The byte arena and its first-fit free list.

use smallvec::SmallVec;

use crate::block::FreeBlock;
use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// Fixed-capacity byte store with a first-fit, coalescing free list.
///
/// The free list is kept sorted by offset and fully coalesced: after
/// every mutation no two entries are adjacent. It usually holds only a
/// handful of entries, so it lives inline in a `SmallVec`.
pub struct Arena {
    /// Backing storage. Allocated to full capacity at creation.
    storage: Vec<u8>,
    /// Unallocated runs, sorted by offset.
    free_blocks: SmallVec<[FreeBlock; 8]>,
}

impl Arena {
    /// Create an arena from a validated config.
    ///
    /// The whole store starts as a single free block.
    pub fn new(config: &ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let mut free_blocks = SmallVec::new();
        free_blocks.push(FreeBlock::new(0, config.capacity));
        Ok(Self {
            storage: vec![0; config.capacity],
            free_blocks,
        })
    }

    /// Create an arena of `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::new(&ArenaConfig::new(capacity))
    }

    /// Reserve `size` bytes and return their offset.
    ///
    /// Scans free blocks in ascending-offset order and takes the first
    /// one that fits. Bytes are taken from the low end of the block; an
    /// exact fit removes the block entirely.
    pub fn allocate_block(&mut self, size: usize) -> Result<usize, ArenaError> {
        if size == 0 {
            return Err(ArenaError::ZeroSized);
        }
        let Some(index) = self.free_blocks.iter().position(|b| b.size >= size) else {
            return Err(ArenaError::BufferOverflow {
                requested: size,
                largest_free: self.largest_free_block(),
            });
        };

        let block = &mut self.free_blocks[index];
        let offset = block.offset;
        if block.size == size {
            self.free_blocks.remove(index);
        } else {
            block.offset += size;
            block.size -= size;
        }
        tracing::trace!(offset, size, "arena block allocated");
        Ok(offset)
    }

    /// Return `size` bytes at `offset` to the free list.
    ///
    /// The range must lie inside the arena and must not overlap any free
    /// block. It is merged with the preceding and following free blocks
    /// when they are contiguous.
    pub fn destroy_block(&mut self, offset: usize, size: usize) -> Result<(), ArenaError> {
        if size == 0 {
            return Err(ArenaError::ZeroSized);
        }
        let capacity = self.capacity();
        let end = match offset.checked_add(size) {
            Some(end) if end <= capacity => end,
            _ => {
                return Err(ArenaError::OutOfRange {
                    offset,
                    size,
                    capacity,
                })
            }
        };

        // First free block starting at or after `offset`.
        let index = self.free_blocks.partition_point(|b| b.offset < offset);
        let prev = index.checked_sub(1).map(|i| self.free_blocks[i]);
        let next = self.free_blocks.get(index).copied();

        if prev.is_some_and(|p| p.end() > offset) || next.is_some_and(|n| end > n.offset) {
            return Err(ArenaError::DoubleFree { offset, size });
        }

        let freed = FreeBlock::new(offset, size);
        let merge_prev = prev.is_some_and(|p| p.touches(&freed));
        let merge_next = next.is_some_and(|n| freed.touches(&n));
        match (merge_prev, merge_next) {
            (true, true) => {
                let next_size = self.free_blocks[index].size;
                self.free_blocks[index - 1].size += size + next_size;
                self.free_blocks.remove(index);
            }
            (true, false) => self.free_blocks[index - 1].size += size,
            (false, true) => {
                let next = &mut self.free_blocks[index];
                next.offset = offset;
                next.size += size;
            }
            (false, false) => self.free_blocks.insert(index, freed),
        }
        debug_assert!(self.is_coalesced());
        tracing::trace!(offset, size, "arena block released");
        Ok(())
    }

    /// Move `len` bytes from `from` to `to` inside the store.
    ///
    /// Source and destination may overlap. The free list is not touched;
    /// callers compacting the arena finish with [`Arena::reset_free_list`].
    ///
    /// # Panics
    ///
    /// Panics if either range exceeds the arena.
    pub fn relocate(&mut self, from: usize, to: usize, len: usize) {
        self.storage.copy_within(from..from + len, to);
    }

    /// Replace the free list with a single block covering `[used_end, capacity)`.
    ///
    /// Used after compaction, when every live byte sits below `used_end`.
    pub fn reset_free_list(&mut self, used_end: usize) {
        let capacity = self.capacity();
        self.free_blocks.clear();
        if used_end < capacity {
            self.free_blocks
                .push(FreeBlock::new(used_end, capacity - used_end));
        }
    }

    /// Shared view of `len` bytes at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the arena.
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.storage[offset..offset + len]
    }

    /// Mutable view of `len` bytes at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the arena.
    pub fn bytes_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.storage[offset..offset + len]
    }

    /// The whole backing store.
    pub fn data(&self) -> &[u8] {
        &self.storage
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Current free list, sorted by offset.
    pub fn free_blocks(&self) -> &[FreeBlock] {
        &self.free_blocks
    }

    /// Total free bytes across all blocks.
    pub fn free_bytes(&self) -> usize {
        self.free_blocks.iter().map(|b| b.size).sum()
    }

    /// Bytes currently allocated.
    pub fn used_bytes(&self) -> usize {
        self.capacity() - self.free_bytes()
    }

    /// Size of the largest free block, or 0 when the arena is full.
    pub fn largest_free_block(&self) -> usize {
        self.free_blocks.iter().map(|b| b.size).max().unwrap_or(0)
    }

    /// Whether the free list is sorted with no adjacent or overlapping entries.
    pub fn is_coalesced(&self) -> bool {
        self.free_blocks.windows(2).all(|w| w[0].end() < w[1].offset)
    }
}
