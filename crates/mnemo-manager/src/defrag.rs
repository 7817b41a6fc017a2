//! Arena compaction.

use crate::element::Placement;
use crate::manager::Manager;

/// Outcome of one compaction pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefragReport {
    /// Number of elements whose bytes were moved.
    pub moved: usize,
    /// Offset of the single free block left behind, or the capacity if
    /// the arena is full.
    pub free_from: usize,
}

impl Manager {
    /// Slide every storage-backed element down to the lowest free offset.
    ///
    /// Elements keep their relative order. References are not touched;
    /// they resolve by name and follow their targets automatically. On
    /// return the free list is a single block `[free_from, capacity)`.
    pub fn defragment_memory(&mut self) -> DefragReport {
        let mut live: Vec<(usize, Placement)> = self
            .registry
            .iter()
            .enumerate()
            .filter_map(|(index, (_, element))| element.placement().map(|p| (index, *p)))
            .collect();
        live.sort_by_key(|(_, p)| p.offset);

        let mut cursor = 0;
        let mut moved = 0;
        for (index, placement) in live {
            if placement.offset != cursor {
                self.arena.relocate(placement.offset, cursor, placement.size);
                if let Some(p) = self.registry.placement_at_mut(index) {
                    p.offset = cursor;
                }
                moved += 1;
            }
            cursor += placement.size;
        }
        self.arena.reset_free_list(cursor);

        tracing::info!(moved, free_from = cursor, "defragmentation complete");
        DefragReport {
            moved,
            free_from: cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use mnemo_arena::FreeBlock;
    use mnemo_core::Span;

    use crate::Manager;

    fn fragmented() -> Manager {
        let mut m = Manager::with_capacity(1024).unwrap();
        m.add_program("prog1", "test.cpp", 1024);
        m.allocate_variable("prog1", "var1", 100);
        m.allocate_variable("prog1", "var2", 200);
        m.allocate_variable("prog1", "var3", 300);
        m.destroy_element("prog1", "var2");
        m
    }

    #[test]
    fn compaction_closes_gaps() {
        let mut m = fragmented();
        assert_eq!(m.free_blocks().len(), 2);

        let report = m.defragment_memory();
        assert_eq!(report.moved, 1);
        assert_eq!(report.free_from, 400);
        assert_eq!(m.get_element("var1").unwrap().offset(), 0);
        assert_eq!(m.get_element("var3").unwrap().offset(), 100);
        assert_eq!(m.free_blocks(), &[FreeBlock::new(400, 624)]);

        let var4 = m.allocate_variable("prog1", "var4", 200).unwrap();
        assert_eq!(var4.offset(), 400);
    }

    #[test]
    fn compaction_preserves_contents() {
        let mut m = fragmented();
        let payload: Vec<u8> = (0..=255).cycle().take(300).collect();
        m.write_raw("var3", &Span::Whole, &payload).unwrap();
        m.defragment_memory();
        assert_eq!(m.read_bytes("var3", &Span::Whole).unwrap(), payload);
    }

    #[test]
    fn references_follow_moved_targets() {
        let mut m = fragmented();
        m.make_reference("prog1", "r3", "var3");
        m.defragment_memory();
        assert_eq!(m.get_element("r3").unwrap().offset(), 100);
    }

    #[test]
    fn compacted_arena_is_idempotent() {
        let mut m = fragmented();
        m.defragment_memory();
        let again = m.defragment_memory();
        assert_eq!(again.moved, 0);
        assert_eq!(again.free_from, 400);
    }

    #[test]
    fn empty_arena_compacts_to_one_block() {
        let mut m = Manager::with_capacity(256).unwrap();
        let report = m.defragment_memory();
        assert_eq!(report.free_from, 0);
        assert_eq!(m.free_blocks(), &[FreeBlock::new(0, 256)]);
    }

    #[test]
    fn full_arena_has_no_free_block() {
        let mut m = Manager::with_capacity(64).unwrap();
        m.add_program("p", "p.rs", 64);
        m.allocate_variable("p", "all", 64);
        let report = m.defragment_memory();
        assert_eq!(report.free_from, 64);
        assert!(m.free_blocks().is_empty());
    }

    #[cfg(not(miri))]
    mod proptests {
        use proptest::prelude::*;

        use crate::Manager;

        proptest! {
            #[test]
            fn compaction_keeps_every_element_and_packs_them(
                sizes in prop::collection::vec(1usize..64, 1..24),
                holes in prop::collection::vec(any::<bool>(), 24),
            ) {
                let mut m = Manager::with_capacity(2048).unwrap();
                m.add_program("p", "p.rs", 2048);
                for (i, size) in sizes.iter().enumerate() {
                    m.allocate_variable("p", &format!("e{i}"), *size);
                }
                for (i, _) in sizes.iter().enumerate() {
                    if holes[i] {
                        m.destroy_element("p", &format!("e{i}"));
                    }
                }
                let live: usize = m.used_memory("p").unwrap();
                let report = m.defragment_memory();
                prop_assert_eq!(report.free_from, live);
                prop_assert_eq!(m.arena().free_bytes(), 2048 - live);

                let mut spans: Vec<_> = m.elements().map(|e| (e.offset(), e.size())).collect();
                spans.sort();
                let mut cursor = 0;
                for (offset, size) in spans {
                    prop_assert_eq!(offset, cursor);
                    cursor += size;
                }
            }
        }
    }
}
