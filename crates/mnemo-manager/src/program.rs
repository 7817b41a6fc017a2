//! Programs: quota-bounded namespaces of element names.

use std::path::{Path, PathBuf};

use bytemuck::Pod;
use indexmap::IndexSet;

use crate::manager::Manager;
use crate::registry::Registry;
use crate::view::ElementView;

/// A named quota holder.
///
/// A program owns no storage itself. It records which element names it
/// may see and derives its used memory from the registry on demand, so
/// the figure can never drift from what is actually allocated.
#[derive(Clone, Debug)]
pub struct Program {
    name: String,
    file_path: PathBuf,
    memory_limit: usize,
    elements: IndexSet<String>,
}

impl Program {
    pub(crate) fn new(name: impl Into<String>, file_path: impl Into<PathBuf>, memory_limit: usize) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            memory_limit,
            elements: IndexSet::new(),
        }
    }

    /// Program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque path metadata supplied at registration.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Quota in bytes.
    pub fn memory_limit(&self) -> usize {
        self.memory_limit
    }

    /// Names this program can see, in association order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(String::as_str)
    }

    /// Whether `name` is associated with this program.
    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains(name)
    }

    pub(crate) fn insert_element(&mut self, name: impl Into<String>) {
        self.elements.insert(name.into());
    }

    pub(crate) fn erase_element(&mut self, name: &str) -> bool {
        self.elements.shift_remove(name)
    }

    /// Bytes charged against the quota.
    ///
    /// Sums the sizes of associated elements that are not references.
    /// Shared segments are charged in full to every owner.
    pub fn used_memory(&self, registry: &Registry) -> usize {
        self.elements
            .iter()
            .filter_map(|name| registry.get(name))
            .filter_map(|element| element.placement())
            .map(|p| p.size())
            .sum()
    }

    /// Whether `size` more bytes fit under the quota.
    pub fn possible_for_expansion(&self, size: usize, registry: &Registry) -> bool {
        size <= self.memory_limit.saturating_sub(self.used_memory(registry))
    }
}

/// Mutable handle to one program, borrowed from its manager.
///
/// Every operation forwards to the manager with this program as the
/// requester; failures are recorded in the manager's error log.
pub struct ProgramHandle<'a> {
    manager: &'a mut Manager,
    name: String,
}

impl<'a> ProgramHandle<'a> {
    pub(crate) fn new(manager: &'a mut Manager, name: impl Into<String>) -> Self {
        Self {
            manager,
            name: name.into(),
        }
    }

    /// Program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The program record.
    pub fn program(&self) -> Option<&Program> {
        self.manager.program(&self.name)
    }

    /// Bytes charged against the quota.
    pub fn used_memory(&self) -> usize {
        self.manager.used_memory(&self.name).unwrap_or(0)
    }

    /// Whether `size` more bytes fit under the quota.
    pub fn possible_for_expansion(&self, size: usize) -> bool {
        self.program()
            .is_some_and(|p| p.possible_for_expansion(size, self.manager.registry()))
    }

    /// Allocate a scalar of `size` bytes.
    pub fn allocate_variable(&mut self, name: &str, size: usize) -> Option<ElementView<'_>> {
        self.manager.allocate_variable(&self.name, name, size)
    }

    /// Allocate an array of `size` bytes with stride `elem_size`.
    pub fn allocate_array_raw(&mut self, name: &str, size: usize, elem_size: usize) -> Option<ElementView<'_>> {
        self.manager.allocate_array_raw(&self.name, name, size, elem_size)
    }

    /// Allocate a shared segment of `size` bytes with stride `elem_size`.
    pub fn allocate_shared_raw(&mut self, name: &str, size: usize, elem_size: usize) -> Option<ElementView<'_>> {
        self.manager.allocate_shared_raw(&self.name, name, size, elem_size)
    }

    /// Allocate a scalar sized for `T`.
    pub fn allocate_scalar<T: Pod>(&mut self, name: &str) -> Option<ElementView<'_>> {
        self.manager.allocate_scalar::<T>(&self.name, name)
    }

    /// Allocate an array of `count` values of `T`.
    pub fn allocate_array<T: Pod>(&mut self, name: &str, count: usize) -> Option<ElementView<'_>> {
        self.manager.allocate_array::<T>(&self.name, name, count)
    }

    /// Allocate a shared segment of `count` values of `T`.
    pub fn allocate_shared<T: Pod>(&mut self, name: &str, count: usize) -> Option<ElementView<'_>> {
        self.manager.allocate_shared::<T>(&self.name, name, count)
    }

    /// Alias `target` under `name`.
    pub fn make_reference(&mut self, name: &str, target: &str) -> Option<ElementView<'_>> {
        self.manager.make_reference(&self.name, name, target)
    }

    /// Destroy an element this program holds.
    pub fn destroy_element(&mut self, name: &str) -> bool {
        self.manager.destroy_element(&self.name, name)
    }
}
