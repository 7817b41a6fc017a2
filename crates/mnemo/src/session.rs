//! Typed front end over a [`Manager`].
//!
//! A [`Session`] remembers the [`ValueType`] each element was allocated
//! with, so callers such as a UI can render and edit contents without
//! tracking types themselves. Writes that the manager rejects are
//! recorded in the manager's error log as SizeError entries with an
//! empty program name.

use bytemuck::Pod;
use indexmap::IndexMap;
use mnemo_arena::ArenaError;
use mnemo_core::{ErrorKind, Span, ValueError};
use mnemo_manager::{DefragReport, Manager, ManagerConfig};

use crate::value::{Value, ValueType};

/// A manager plus a name → value-type catalogue.
pub struct Session {
    manager: Manager,
    types: IndexMap<String, ValueType>,
}

impl Session {
    /// Wrap an existing manager. Elements already in it are uncatalogued.
    pub fn new(manager: Manager) -> Self {
        Self {
            manager,
            types: IndexMap::new(),
        }
    }

    /// Build a session over a fresh manager.
    pub fn with_config(config: ManagerConfig) -> Result<Self, ArenaError> {
        Manager::new(config).map(Self::new)
    }

    /// Build a session over a fresh manager of `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Manager::with_capacity(capacity).map(Self::new)
    }

    /// The wrapped manager.
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    /// The wrapped manager, mutably. Elements allocated directly through
    /// it are not catalogued.
    pub fn manager_mut(&mut self) -> &mut Manager {
        &mut self.manager
    }

    /// Unwrap the manager.
    pub fn into_manager(self) -> Manager {
        self.manager
    }

    // ── Programs ───────────────────────────────────────────────────

    /// Register a program.
    pub fn add_program(&mut self, name: &str, file_path: &str, memory_limit: usize) -> bool {
        self.manager.add_program(name, file_path, memory_limit).is_some()
    }

    /// Tear a program down, dropping catalogue entries for elements that
    /// went with it.
    pub fn delete_program(&mut self, name: &str) -> bool {
        let deleted = self.manager.delete_program(name);
        self.prune();
        deleted
    }

    // ── Allocation ─────────────────────────────────────────────────

    /// Allocate one value of type `ty`.
    pub fn allocate_variable(&mut self, program: &str, name: &str, ty: ValueType) -> bool {
        let ok = self
            .manager
            .allocate_variable(program, name, ty.size())
            .is_some();
        self.catalogue(ok, name, ty)
    }

    /// Allocate `count` values of type `ty`.
    pub fn allocate_array(&mut self, program: &str, name: &str, count: usize, ty: ValueType) -> bool {
        let Some(size) = self.array_size(program, name, count, ty) else {
            return false;
        };
        let ok = self
            .manager
            .allocate_array_raw(program, name, size, ty.size())
            .is_some();
        self.catalogue(ok, name, ty)
    }

    /// Allocate a shared segment of `count` values of type `ty`.
    pub fn allocate_shared(&mut self, program: &str, name: &str, count: usize, ty: ValueType) -> bool {
        let Some(size) = self.array_size(program, name, count, ty) else {
            return false;
        };
        let ok = self
            .manager
            .allocate_shared_raw(program, name, size, ty.size())
            .is_some();
        self.catalogue(ok, name, ty)
    }

    fn array_size(&mut self, program: &str, name: &str, count: usize, ty: ValueType) -> Option<usize> {
        let size = ty.size().checked_mul(count);
        if size.is_none() {
            self.manager.record_error(
                ErrorKind::SizeError,
                format!("'{name}': {count} items of {ty} overflow"),
                program,
            );
        }
        size
    }

    fn catalogue(&mut self, ok: bool, name: &str, ty: ValueType) -> bool {
        if ok {
            self.types.insert(name.to_string(), ty);
            tracing::debug!(element = name, value_type = %ty, "element catalogued");
        }
        ok
    }

    /// Drop catalogue entries whose element is no longer registered.
    fn prune(&mut self) {
        let registry = self.manager.registry();
        self.types.retain(|name, _| registry.contains(name));
    }

    // ── Element operations ─────────────────────────────────────────

    /// Alias `target` under `name` on behalf of `program`.
    pub fn make_reference(&mut self, name: &str, target: &str, program: &str) -> bool {
        self.manager.make_reference(program, name, target).is_some()
    }

    /// Destroy an element held by `program`.
    pub fn delete_element(&mut self, name: &str, program: &str) -> bool {
        let deleted = self.manager.destroy_element(program, name);
        if deleted {
            self.types.shift_remove(name);
        }
        deleted
    }

    /// Grant `program` access to `segment`.
    pub fn request_access(&mut self, segment: &str, program: &str) -> bool {
        self.manager.get_access_to_shared(program, segment)
    }

    /// Withdraw `program`'s access to `segment`.
    pub fn revoke_access(&mut self, segment: &str, program: &str) -> bool {
        self.manager.revoke_access_to_shared(program, segment)
    }

    /// Compact the arena.
    pub fn defragment(&mut self) -> DefragReport {
        self.manager.defragment_memory()
    }

    // ── Values ─────────────────────────────────────────────────────

    /// Catalogued type of `name`, looking through references.
    pub fn value_type(&self, name: &str) -> Option<ValueType> {
        let element = self.manager.get_element(name)?;
        if !element.is_valid() {
            return None;
        }
        let resolved = element.target_name().unwrap_or(name);
        self.types.get(resolved).copied()
    }

    /// Whether `name` resolves to an array or shared segment.
    pub fn is_array(&self, name: &str) -> bool {
        let Some(element) = self.manager.get_element(name) else {
            return false;
        };
        match element.target_name() {
            Some(target) => self
                .manager
                .get_element(target)
                .is_some_and(|t| t.kind().is_array_like()),
            None => element.kind().is_array_like(),
        }
    }

    /// Decode the items addressed by `span`.
    ///
    /// A dangling reference decodes to no items.
    pub fn get_values(&self, name: &str, span: &Span) -> Result<Vec<Value>, ValueError> {
        let ty = self.value_type(name).ok_or_else(|| ValueError::UnknownElement {
            name: name.to_string(),
        })?;
        let bytes = self.manager.read_bytes(name, span)?;
        Ok(bytes
            .chunks_exact(ty.size())
            .filter_map(|chunk| Value::from_bytes(ty, chunk))
            .collect())
    }

    /// Items addressed by `span` as display text, joined with `", "`.
    pub fn render_value(&self, name: &str, span: &Span) -> Option<String> {
        let values = self.get_values(name, span).ok()?;
        let rendered: Vec<String> = values.iter().map(Value::to_string).collect();
        Some(rendered.join(", "))
    }

    /// Write a raw `T` into `span`, logging failures.
    pub fn set_value<T: Pod>(&mut self, name: &str, value: T, span: &Span) -> bool {
        let result = self.manager.set_value(name, value, span);
        self.log_write(result)
    }

    /// Write a decoded value into `span`, logging failures.
    pub fn set(&mut self, name: &str, value: Value, span: &Span) -> bool {
        let result = match value {
            Value::Bool(v) => self.manager.set_value(name, u8::from(v), span),
            Value::Char(v) => self.manager.set_value(name, v, span),
            Value::Int(v) => self.manager.set_value(name, v, span),
            Value::LongLong(v) => self.manager.set_value(name, v, span),
            Value::SizeT(v) => self.manager.set_value(name, v, span),
            Value::Double(v) => self.manager.set_value(name, v, span),
        };
        self.log_write(result)
    }

    /// Parse `text` as the catalogued type of `name` and write it.
    pub fn set_text(&mut self, name: &str, text: &str, span: &Span) -> bool {
        let parsed = self.value_type(name).and_then(|ty| Value::parse(ty, text));
        match parsed {
            Some(value) => self.set(name, value, span),
            None => {
                self.manager.record_error(
                    ErrorKind::SizeError,
                    format!("cannot store '{text}' in '{name}'"),
                    "",
                );
                false
            }
        }
    }

    fn log_write(&mut self, result: Result<(), ValueError>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                self.manager.record_error(ErrorKind::SizeError, err.to_string(), "");
                false
            }
        }
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Program names in registration order.
    pub fn list_programs(&self) -> Vec<String> {
        self.manager.list_programs()
    }

    /// Names visible to `program`; empty if it doesn't exist.
    pub fn list_elements(&self, program: &str) -> Vec<String> {
        self.manager.list_elements(program).unwrap_or_default()
    }

    /// Shared segment names, optionally only those `program` owns.
    pub fn list_shared_segments(&self, program: Option<&str>) -> Vec<String> {
        self.manager.list_shared_segments(program)
    }

    /// Per-program share of the arena.
    pub fn statistics(&self) -> IndexMap<String, f64> {
        self.manager.statistics()
    }

    /// Every logged fault, rendered.
    pub fn errors(&self) -> Vec<String> {
        self.manager
            .all_errors()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Names of dangling references.
    pub fn dangling_references(&self) -> Vec<String> {
        self.manager.dangling_references()
    }
}
