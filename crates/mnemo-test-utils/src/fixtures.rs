//! Reusable manager fixtures.
//!
//! - [`manager_with_programs`]: an empty arena with named programs registered.
//! - [`fragmented_manager`]: three contiguous scalars with the middle one freed.
//! - [`ErrorKindCounts`]: tally of logged faults by kind, for assertions.

use mnemo_core::{ErrorKind, ErrorRecord};
use mnemo_manager::Manager;

/// Build a manager of `capacity` bytes with each `(name, limit)` program
/// registered. Program file paths are `"<name>.rs"`.
///
/// # Panics
///
/// Panics if `capacity` is zero or a program name repeats.
pub fn manager_with_programs(capacity: usize, programs: &[(&str, usize)]) -> Manager {
    let mut manager = Manager::with_capacity(capacity).expect("fixture capacity must be non-zero");
    for (name, limit) in programs {
        assert!(
            manager.add_program(name, format!("{name}.rs"), *limit).is_some(),
            "duplicate fixture program '{name}'"
        );
    }
    manager
}

/// A 1 KiB arena with program `prog1` (limit 1024) holding `var1` at
/// offset 0 and `var3` at offset 300, with the 200-byte hole left by
/// `var2` between them.
pub fn fragmented_manager() -> Manager {
    let mut manager = manager_with_programs(1024, &[("prog1", 1024)]);
    for (name, size) in [("var1", 100), ("var2", 200), ("var3", 300)] {
        assert!(manager.allocate_variable("prog1", name, size).is_some());
    }
    assert!(manager.destroy_element("prog1", "var2"));
    manager
}

/// Number of logged faults of each kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ErrorKindCounts {
    pub size: usize,
    pub leak: usize,
    pub double_free: usize,
    pub access: usize,
}

impl ErrorKindCounts {
    pub fn of(records: &[ErrorRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.kind() {
                ErrorKind::SizeError => counts.size += 1,
                ErrorKind::MemoryLeak => counts.leak += 1,
                ErrorKind::DoubleFree => counts.double_free += 1,
                ErrorKind::AccessError => counts.access += 1,
            }
        }
        counts
    }
}
