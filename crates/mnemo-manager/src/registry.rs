//! Name → element mapping.
//!
//! The [`Registry`] is the sole owner of every element. Programs and
//! shared segments refer to entries by name, so destroying an element
//! can never leave a dangling pointer behind, only a dangling name,
//! which references detect on their next lookup.

use indexmap::IndexMap;

use crate::element::{Element, Placement};

/// Owns all registered elements, keyed by name.
///
/// Uses `IndexMap` so iteration follows registration order, which keeps
/// listings and defragmentation tie-breaks deterministic.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    elements: IndexMap<String, Element>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an element.
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.elements.get(name)
    }

    /// Look up an element together with its registered name.
    pub fn get_entry(&self, name: &str) -> Option<(&str, &Element)> {
        self.elements
            .get_key_value(name)
            .map(|(name, e)| (name.as_str(), e))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements.get_mut(name)
    }

    pub(crate) fn placement_at_mut(&mut self, index: usize) -> Option<&mut Placement> {
        self.elements
            .get_index_mut(index)
            .and_then(|(_, e)| e.placement_mut())
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, element: Element) {
        self.elements.insert(name.into(), element);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Element> {
        self.elements.shift_remove(name)
    }

    /// Placement of the storage behind `name`, following one reference hop.
    ///
    /// Returns `None` for unknown names and for dangling references.
    pub fn resolve(&self, name: &str) -> Option<&Placement> {
        match self.elements.get(name)? {
            Element::Reference(reference) => self.get(reference.target())?.placement(),
            element => element.placement(),
        }
    }

    /// Iterate over all entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.elements.iter().map(|(name, e)| (name.as_str(), e))
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
