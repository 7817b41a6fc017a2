//! Reading and writing element contents.
//!
//! Access goes through the registry by name, so a reference reads and
//! writes its target's bytes. A dangling reference is a silent no-op:
//! reads leave the caller's buffer untouched and report zero bytes.
//!
//! Contract violations (unknown name, wrong value size, out-of-range
//! span) are returned as [`ValueError`] and are not written to the
//! manager's error log.

use std::mem::size_of;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use mnemo_core::{Span, ValueError};

use crate::element::{Element, Placement};
use crate::manager::Manager;

impl Manager {
    /// Placement behind `name`, or `Ok(None)` for a dangling reference.
    fn placement_for(&self, name: &str) -> Result<Option<Placement>, ValueError> {
        match self.registry.get(name) {
            None => Err(ValueError::UnknownElement {
                name: name.to_string(),
            }),
            Some(Element::Reference(_)) => Ok(self.registry.resolve(name).copied()),
            Some(element) => Ok(element.placement().copied()),
        }
    }

    /// Absolute arena range covered by `span` of `placement`.
    fn arena_range(placement: &Placement, span: &Span) -> Result<Range<usize>, ValueError> {
        let rel = span.byte_range(placement.elem_size, placement.size)?;
        Ok(placement.offset + rel.start..placement.offset + rel.end)
    }

    /// Copy the bytes addressed by `span` into `out`.
    ///
    /// `out` must be exactly as long as the addressed range. Returns the
    /// number of bytes copied, which is 0 for a dangling reference.
    pub fn read_raw(&self, name: &str, span: &Span, out: &mut [u8]) -> Result<usize, ValueError> {
        let Some(placement) = self.placement_for(name)? else {
            return Ok(0);
        };
        let range = Self::arena_range(&placement, span)?;
        if range.len() != out.len() {
            return Err(ValueError::BufferLength {
                expected: range.len(),
                actual: out.len(),
            });
        }
        out.copy_from_slice(self.arena.bytes(range.start, range.len()));
        Ok(out.len())
    }

    /// Copy `bytes` into the range addressed by `span`.
    ///
    /// Returns the number of bytes written, which is 0 for a dangling
    /// reference.
    pub fn write_raw(&mut self, name: &str, span: &Span, bytes: &[u8]) -> Result<usize, ValueError> {
        let Some(placement) = self.placement_for(name)? else {
            return Ok(0);
        };
        let range = Self::arena_range(&placement, span)?;
        if range.len() != bytes.len() {
            return Err(ValueError::BufferLength {
                expected: range.len(),
                actual: bytes.len(),
            });
        }
        self.arena.bytes_mut(range.start, range.len()).copy_from_slice(bytes);
        tracing::trace!(element = name, len = bytes.len(), "element written");
        Ok(bytes.len())
    }

    /// The bytes addressed by `span`, or an empty vector for a dangling
    /// reference.
    pub fn read_bytes(&self, name: &str, span: &Span) -> Result<Vec<u8>, ValueError> {
        let Some(placement) = self.placement_for(name)? else {
            return Ok(Vec::new());
        };
        let range = Self::arena_range(&placement, span)?;
        Ok(self.arena.bytes(range.start, range.len()).to_vec())
    }

    /// Read one `T` from `span`.
    ///
    /// `T` must be as large as either the element stride or the whole
    /// element. With [`Span::Whole`] the element must be exactly one `T`.
    /// A dangling reference yields `T::zeroed()`.
    pub fn get_value<T: Pod>(&self, name: &str, span: &Span) -> Result<T, ValueError> {
        let mut value = T::zeroed();
        let Some(placement) = self.placement_for(name)? else {
            return Ok(value);
        };
        let span = Self::value_span::<T>(&placement, span)?;
        let range = Self::arena_range(&placement, &span)?;
        bytemuck::bytes_of_mut(&mut value).copy_from_slice(self.arena.bytes(range.start, range.len()));
        Ok(value)
    }

    /// Write one `T` into `span`.
    ///
    /// Same size rules as [`Manager::get_value`]. A dangling reference
    /// is a no-op.
    pub fn set_value<T: Pod>(&mut self, name: &str, value: T, span: &Span) -> Result<(), ValueError> {
        let Some(placement) = self.placement_for(name)? else {
            return Ok(());
        };
        let span = Self::value_span::<T>(&placement, span)?;
        let range = Self::arena_range(&placement, &span)?;
        self.arena.bytes_mut(range.start, range.len()).copy_from_slice(bytemuck::bytes_of(&value));
        Ok(())
    }

    /// Read every item in `span` as a `T`. `T` must match the stride.
    pub fn get_values<T: Pod>(&self, name: &str, span: &Span) -> Result<Vec<T>, ValueError> {
        let Some(placement) = self.placement_for(name)? else {
            return Ok(Vec::new());
        };
        Self::check_stride::<T>(&placement)?;
        let range = Self::arena_range(&placement, span)?;
        let mut values = vec![T::zeroed(); range.len() / size_of::<T>()];
        bytemuck::cast_slice_mut::<T, u8>(&mut values).copy_from_slice(self.arena.bytes(range.start, range.len()));
        Ok(values)
    }

    /// Write `values` as consecutive items starting at item `begin`.
    pub fn set_values<T: Pod>(&mut self, name: &str, values: &[T], begin: usize) -> Result<(), ValueError> {
        let Some(placement) = self.placement_for(name)? else {
            return Ok(());
        };
        Self::check_stride::<T>(&placement)?;
        let span = Span::Items(begin..begin.saturating_add(values.len()));
        let range = Self::arena_range(&placement, &span)?;
        self.arena.bytes_mut(range.start, range.len()).copy_from_slice(bytemuck::cast_slice(values));
        Ok(())
    }

    /// Narrow `span` to the bytes one `T` covers.
    ///
    /// A `T` the size of the stride addresses one item; a `T` the size of
    /// the whole element addresses all of it.
    fn value_span<T: Pod>(placement: &Placement, span: &Span) -> Result<Span, ValueError> {
        let requested = size_of::<T>();
        let mismatch = || ValueError::SizeMismatch {
            requested,
            elem_size: placement.elem_size,
            size: placement.size,
        };
        match span {
            Span::Whole if requested == placement.size => Ok(Span::Whole),
            Span::Whole => Err(mismatch()),
            Span::Index(i) if requested == placement.elem_size => Ok(Span::Index(*i)),
            Span::Index(0) if requested == placement.size => Ok(Span::Whole),
            Span::Items(r) if r.len().checked_mul(placement.elem_size) == Some(requested) => Ok(span.clone()),
            _ => Err(mismatch()),
        }
    }

    fn check_stride<T: Pod>(placement: &Placement) -> Result<(), ValueError> {
        if size_of::<T>() == placement.elem_size {
            Ok(())
        } else {
            Err(ValueError::SizeMismatch {
                requested: size_of::<T>(),
                elem_size: placement.elem_size,
                size: placement.size,
            })
        }
    }
}
