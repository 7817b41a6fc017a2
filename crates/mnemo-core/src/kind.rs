//! Element kinds.

use std::fmt;

/// The closed set of element variants held by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A single value; stride equals total size.
    Scalar,
    /// A strided run of values owned by one program.
    Array,
    /// An array with a set of owning programs.
    SharedSegment,
    /// A name-resolved alias with no storage of its own.
    Reference,
}

impl ElementKind {
    /// Whether elements of this kind occupy arena bytes.
    pub fn has_storage(&self) -> bool {
        !matches!(self, Self::Reference)
    }

    /// Whether elements of this kind are indexed by stride.
    pub fn is_array_like(&self) -> bool {
        matches!(self, Self::Array | Self::SharedSegment)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::Array => "array",
            Self::SharedSegment => "shared segment",
            Self::Reference => "reference",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_references_lack_storage() {
        assert!(ElementKind::Scalar.has_storage());
        assert!(ElementKind::SharedSegment.has_storage());
        assert!(!ElementKind::Reference.has_storage());
    }

    #[test]
    fn array_like_kinds() {
        assert!(ElementKind::Array.is_array_like());
        assert!(ElementKind::SharedSegment.is_array_like());
        assert!(!ElementKind::Scalar.is_array_like());
    }
}
