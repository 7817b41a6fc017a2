//! Sub-range addressing within an element.
//!
//! A [`Span`] is expressed in items (multiples of the element stride),
//! not bytes. [`Span::byte_range`] converts it to a byte range relative
//! to the element's start and validates it against the element size.

use std::ops::Range;

use crate::error::ValueError;

/// Which items of an element an access covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    /// Every byte of the element.
    Whole,
    /// The single item at this index.
    Index(usize),
    /// Items `start..end`.
    Items(Range<usize>),
}

impl Span {
    /// Build a span from a `(begin, end)` pair where `end == 0` means
    /// "the single item at `begin`".
    ///
    /// For scalars `(0, 0)` therefore addresses the whole value.
    pub fn from_bounds(begin: usize, end: usize) -> Self {
        if end == 0 {
            Self::Index(begin)
        } else {
            Self::Items(begin..end)
        }
    }

    /// Number of items covered, given the element's item count.
    pub fn item_count(&self, items: usize) -> usize {
        match self {
            Self::Whole => items,
            Self::Index(_) => 1,
            Self::Items(r) => r.end.saturating_sub(r.start),
        }
    }

    /// Resolve to a byte range relative to the element start.
    ///
    /// Fails with [`ValueError::RangeOutOfBounds`] if the range is
    /// reversed, overflows, or extends past `size`.
    pub fn byte_range(&self, elem_size: usize, size: usize) -> Result<Range<usize>, ValueError> {
        let (first, last) = match self {
            Self::Whole => return Ok(0..size),
            Self::Index(i) => (*i, i.saturating_add(1)),
            Self::Items(r) => (r.start, r.end),
        };
        let begin = first.checked_mul(elem_size);
        let end = last.checked_mul(elem_size);
        match (begin, end) {
            (Some(begin), Some(end)) if first <= last && end <= size => Ok(begin..end),
            (begin, end) => Err(ValueError::RangeOutOfBounds {
                begin: begin.unwrap_or(usize::MAX),
                end: end.unwrap_or(usize::MAX),
                size,
            }),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::Index(0)
    }
}
