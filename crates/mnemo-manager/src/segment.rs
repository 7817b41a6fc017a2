//! Shared segments: arrays with a set of owning programs.

use indexmap::IndexSet;

use crate::element::Placement;

/// An array-like allocation visible to several programs.
///
/// The owner set is explicit reference counting: the segment can be
/// destroyed only when exactly one owner remains and that owner asks.
/// Owners are stored by program name, never by pointer.
#[derive(Clone, Debug)]
pub struct SharedSegment {
    placement: Placement,
    owners: IndexSet<String>,
}

impl SharedSegment {
    /// Create a segment owned by `creator`.
    pub(crate) fn new(placement: Placement, creator: impl Into<String>) -> Self {
        let mut owners = IndexSet::new();
        owners.insert(creator.into());
        Self { placement, owners }
    }

    /// Arena placement of the segment.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub(crate) fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    /// Add an owner. Returns `false` if it was already present.
    pub(crate) fn insert_owner(&mut self, program: impl Into<String>) -> bool {
        self.owners.insert(program.into())
    }

    /// Remove an owner. Returns `false` if it was not present.
    pub(crate) fn erase_owner(&mut self, program: &str) -> bool {
        self.owners.shift_remove(program)
    }

    /// Whether `program` is currently an owner.
    pub fn check_access(&self, program: &str) -> bool {
        self.owners.contains(program)
    }

    /// Whether exactly one owner remains.
    pub fn is_last(&self) -> bool {
        self.owners.len() == 1
    }

    /// Owner names in the order they gained access.
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.owners.iter().map(String::as_str)
    }

    /// Number of owners.
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> SharedSegment {
        SharedSegment::new(Placement::new(0, 100, 4), "prog1")
    }

    #[test]
    fn creator_is_sole_owner() {
        let s = segment();
        assert!(s.check_access("prog1"));
        assert!(!s.check_access("prog2"));
        assert!(s.is_last());
    }

    #[test]
    fn insert_and_erase_owners() {
        let mut s = segment();
        assert!(s.insert_owner("prog2"));
        assert!(!s.insert_owner("prog2"));
        assert!(s.check_access("prog2"));
        assert!(!s.is_last());
        assert_eq!(s.owners().collect::<Vec<_>>(), ["prog1", "prog2"]);

        assert!(s.erase_owner("prog2"));
        assert!(!s.erase_owner("prog2"));
        assert!(s.is_last());
        assert_eq!(s.owner_count(), 1);
    }
}
