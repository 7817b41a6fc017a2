//! Read-only element handles.

use mnemo_core::ElementKind;

use crate::element::{Element, Placement};
use crate::registry::Registry;
use crate::segment::SharedSegment;

/// A borrowed, resolved view of one registered element.
///
/// Size and offset queries on a reference are answered from its target
/// at the time of the call. A dangling reference reports size 0 and the
/// arena capacity as its offset.
#[derive(Clone, Copy)]
pub struct ElementView<'a> {
    name: &'a str,
    element: &'a Element,
    registry: &'a Registry,
    capacity: usize,
}

impl<'a> ElementView<'a> {
    pub(crate) fn new(
        name: &'a str,
        element: &'a Element,
        registry: &'a Registry,
        capacity: usize,
    ) -> Self {
        Self {
            name,
            element,
            registry,
            capacity,
        }
    }

    fn resolved(&self) -> Option<&'a Placement> {
        match self.element {
            Element::Reference(reference) => self.registry.get(reference.target())?.placement(),
            element => element.placement(),
        }
    }

    /// The element's own name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The variant tag.
    pub fn kind(&self) -> ElementKind {
        self.element.kind()
    }

    /// The underlying registry entry.
    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// Whether this element is an alias.
    pub fn is_reference(&self) -> bool {
        self.element.is_reference()
    }

    /// Name of the aliased element, for references.
    pub fn target_name(&self) -> Option<&'a str> {
        self.element.as_reference().map(|r| r.target())
    }

    /// `false` only for references whose target does not resolve to storage.
    pub fn is_valid(&self) -> bool {
        self.resolved().is_some()
    }

    /// Total size in bytes, or 0 for a dangling reference.
    pub fn size(&self) -> usize {
        self.resolved().map_or(0, |p| p.size)
    }

    /// Stride in bytes, or 0 for a dangling reference.
    pub fn elem_size(&self) -> usize {
        self.resolved().map_or(0, |p| p.elem_size)
    }

    /// Offset in the arena, or the arena capacity for a dangling reference.
    pub fn offset(&self) -> usize {
        self.resolved().map_or(self.capacity, |p| p.offset)
    }

    /// The shared segment, if this element is one.
    pub fn as_shared(&self) -> Option<&'a SharedSegment> {
        self.element.as_shared()
    }

    /// Whether exactly one owner remains. `false` for non-segments.
    pub fn is_last(&self) -> bool {
        self.as_shared().is_some_and(SharedSegment::is_last)
    }

    /// Whether `program` owns this segment. `false` for non-segments.
    pub fn check_access(&self, program: &str) -> bool {
        self.as_shared().is_some_and(|s| s.check_access(program))
    }
}

impl std::fmt::Debug for ElementView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementView")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("offset", &self.offset())
            .field("size", &self.size())
            .field("elem_size", &self.elem_size())
            .finish()
    }
}
