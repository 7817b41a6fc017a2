//! Registry elements: scalars, arrays, shared segments and references.
//!
//! [`Element`] is a closed enum so every operation matches exhaustively.
//! Storage-backed variants carry a [`Placement`]; a [`Reference`] carries
//! only the name of its target and is resolved through the registry on
//! every access.

use mnemo_core::{ElementKind, ErrorKind};

use crate::segment::SharedSegment;

/// Where an element's bytes live in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Byte offset of the first byte.
    pub(crate) offset: usize,
    /// Total size in bytes.
    pub(crate) size: usize,
    /// Stride in bytes. Equals `size` for scalars.
    pub(crate) elem_size: usize,
}

impl Placement {
    pub(crate) fn new(offset: usize, size: usize, elem_size: usize) -> Self {
        Self {
            offset,
            size,
            elem_size,
        }
    }

    /// Byte offset of the first byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Stride in bytes.
    pub fn elem_size(&self) -> usize {
        self.elem_size
    }

    /// Number of items of `elem_size` bytes.
    pub fn count(&self) -> usize {
        self.size / self.elem_size
    }

    /// One past the last byte.
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// A name-resolved alias.
///
/// Holds no storage. Whether it is valid depends only on whether its
/// target name is registered at the moment of the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    target: String,
}

impl Reference {
    pub(crate) fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Name of the aliased element.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// One entry of the element registry.
#[derive(Clone, Debug)]
pub enum Element {
    /// A single value.
    Scalar(Placement),
    /// A strided run of values.
    Array(Placement),
    /// An array with several owning programs.
    Shared(SharedSegment),
    /// An alias resolved by name.
    Reference(Reference),
}

/// Why a program may not destroy an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Denial {
    /// Fault category to record.
    pub kind: ErrorKind,
    /// Human-readable explanation.
    pub reason: String,
}

impl Element {
    /// The variant tag.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Scalar(_) => ElementKind::Scalar,
            Self::Array(_) => ElementKind::Array,
            Self::Shared(_) => ElementKind::SharedSegment,
            Self::Reference(_) => ElementKind::Reference,
        }
    }

    /// Whether this is an alias rather than a storage-backed element.
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Arena placement of storage-backed variants.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Self::Scalar(p) | Self::Array(p) => Some(p),
            Self::Shared(segment) => Some(segment.placement()),
            Self::Reference(_) => None,
        }
    }

    pub(crate) fn placement_mut(&mut self) -> Option<&mut Placement> {
        match self {
            Self::Scalar(p) | Self::Array(p) => Some(p),
            Self::Shared(segment) => Some(segment.placement_mut()),
            Self::Reference(_) => None,
        }
    }

    /// The shared segment, if this is one.
    pub fn as_shared(&self) -> Option<&SharedSegment> {
        match self {
            Self::Shared(segment) => Some(segment),
            _ => None,
        }
    }

    pub(crate) fn as_shared_mut(&mut self) -> Option<&mut SharedSegment> {
        match self {
            Self::Shared(segment) => Some(segment),
            _ => None,
        }
    }

    /// The reference, if this is one.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Check whether `program` may destroy the element registered as `name`.
    ///
    /// Scalars, arrays and references are always destroyable by a program
    /// that holds them; membership is checked one layer up. A shared
    /// segment is destroyable only by its sole remaining owner.
    pub fn check_destroy(&self, name: &str, program: &str) -> Result<(), Denial> {
        let Self::Shared(segment) = self else {
            return Ok(());
        };
        if !segment.check_access(program) {
            return Err(Denial {
                kind: ErrorKind::AccessError,
                reason: format!("program '{program}' doesn't have access to segment '{name}'"),
            });
        }
        if !segment.is_last() {
            return Err(Denial {
                kind: ErrorKind::MemoryLeak,
                reason: format!("segment '{name}' is still used by other programs"),
            });
        }
        Ok(())
    }
}
