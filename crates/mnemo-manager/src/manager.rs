//! The manager: arena owner, element registry and program table.
//!
//! All mutation goes through [`Manager`]. Faults are never returned as
//! `Err`; they are appended to the manager's [`ErrorLog`] and the call
//! returns `None` or `false`. Callers inspect the log with
//! [`Manager::all_errors`] and [`Manager::program_errors`].

use std::mem::size_of;
use std::path::PathBuf;

use bytemuck::Pod;
use indexmap::IndexMap;
use mnemo_arena::{Arena, ArenaError, FreeBlock};
use mnemo_core::{ElementKind, ErrorKind, ErrorLog, ErrorRecord};

use crate::config::ManagerConfig;
use crate::element::{Element, Placement, Reference};
use crate::program::{Program, ProgramHandle};
use crate::registry::Registry;
use crate::segment::SharedSegment;
use crate::view::ElementView;

/// Storage-backed element shapes an allocation can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    Scalar,
    Array,
    Shared,
}

impl Shape {
    fn kind(self) -> ElementKind {
        match self {
            Self::Scalar => ElementKind::Scalar,
            Self::Array => ElementKind::Array,
            Self::Shared => ElementKind::SharedSegment,
        }
    }
}

/// Owner of the arena, the element registry, the programs and the error log.
///
/// Single-threaded by construction: every mutating method takes
/// `&mut self`. Wrap the manager in a lock to share it across threads.
pub struct Manager {
    pub(crate) config: ManagerConfig,
    pub(crate) arena: Arena,
    pub(crate) registry: Registry,
    pub(crate) programs: IndexMap<String, Program>,
    pub(crate) errors: ErrorLog,
}

impl Manager {
    /// Create a manager from a validated config.
    pub fn new(config: ManagerConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let arena = Arena::new(&config.arena)?;
        Ok(Self {
            config,
            arena,
            registry: Registry::new(),
            programs: IndexMap::new(),
            errors: ErrorLog::new(),
        })
    }

    /// Create a manager with an arena of `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Self::new(ManagerConfig::with_capacity(capacity))
    }

    /// The configuration this manager was built from.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    // ── Programs ───────────────────────────────────────────────────

    /// Register a program with its own quota.
    ///
    /// Fails with an AccessError if the name is taken. A shared segment
    /// orphaned by an earlier program of the same name is handed to the
    /// new program, so it can be listed and destroyed again.
    pub fn add_program(
        &mut self,
        name: &str,
        file_path: impl Into<PathBuf>,
        memory_limit: usize,
    ) -> Option<ProgramHandle<'_>> {
        if self.programs.contains_key(name) {
            self.errors.record(
                ErrorKind::AccessError,
                format!("program '{name}' already exists"),
                name,
            );
            return None;
        }
        let mut program = Program::new(name, file_path, memory_limit);
        for (segment_name, element) in self.registry.iter() {
            if element.as_shared().is_some_and(|s| s.check_access(name)) {
                tracing::warn!(program = name, segment = segment_name, "orphaned segment adopted");
                program.insert_element(segment_name);
            }
        }
        self.programs.insert(name.to_string(), program);
        tracing::info!(program = name, memory_limit, "program added");
        Some(ProgramHandle::new(self, name))
    }

    /// Register a program with the configured default quota.
    pub fn add_program_default(
        &mut self,
        name: &str,
        file_path: impl Into<PathBuf>,
    ) -> Option<ProgramHandle<'_>> {
        let limit = self.config.resolved_default_limit();
        self.add_program(name, file_path, limit)
    }

    /// Tear a program down.
    ///
    /// References it holds are unregistered. Every scalar or array it
    /// still holds is reported as a MemoryLeak and stays allocated. It is
    /// detached from shared segments that other programs still own; a
    /// segment it owned alone is reported as a MemoryLeak instead.
    pub fn delete_program(&mut self, name: &str) -> bool {
        let Some(program) = self.programs.shift_remove(name) else {
            self.errors.record(
                ErrorKind::AccessError,
                format!("program '{name}' doesn't exist"),
                name,
            );
            return false;
        };

        for element_name in program.elements() {
            let Some(element) = self.registry.get_mut(element_name) else {
                continue;
            };
            match element {
                Element::Reference(_) => {
                    self.registry.remove(element_name);
                }
                Element::Shared(segment) if !segment.is_last() => {
                    segment.erase_owner(name);
                }
                Element::Shared(_) => self.errors.record(
                    ErrorKind::MemoryLeak,
                    format!("shared segment '{element_name}' lost its last owner without being destroyed"),
                    name,
                ),
                Element::Scalar(_) | Element::Array(_) => self.errors.record(
                    ErrorKind::MemoryLeak,
                    format!("element '{element_name}' was not destroyed before program teardown"),
                    name,
                ),
            }
        }
        tracing::info!(program = name, "program deleted");
        true
    }

    /// Look up a program.
    pub fn program(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    /// Mutable handle to a registered program.
    pub fn program_mut(&mut self, name: &str) -> Option<ProgramHandle<'_>> {
        if self.programs.contains_key(name) {
            Some(ProgramHandle::new(self, name))
        } else {
            None
        }
    }

    /// All programs in registration order.
    pub fn programs(&self) -> impl Iterator<Item = &Program> {
        self.programs.values()
    }

    /// Names of all programs in registration order.
    pub fn list_programs(&self) -> Vec<String> {
        self.programs.keys().cloned().collect()
    }

    /// Bytes charged against a program's quota.
    pub fn used_memory(&self, program: &str) -> Option<usize> {
        self.programs
            .get(program)
            .map(|p| p.used_memory(&self.registry))
    }

    // ── Allocation ─────────────────────────────────────────────────

    /// Allocate a scalar of `size` bytes for `program`.
    pub fn allocate_variable(&mut self, program: &str, name: &str, size: usize) -> Option<ElementView<'_>> {
        self.allocate_element(program, name, size, size, Shape::Scalar)
    }

    /// Allocate an array of `size` bytes with stride `elem_size`.
    pub fn allocate_array_raw(
        &mut self,
        program: &str,
        name: &str,
        size: usize,
        elem_size: usize,
    ) -> Option<ElementView<'_>> {
        self.allocate_element(program, name, size, elem_size, Shape::Array)
    }

    /// Allocate a shared segment of `size` bytes with stride `elem_size`.
    ///
    /// The allocating program becomes the segment's first owner.
    pub fn allocate_shared_raw(
        &mut self,
        program: &str,
        name: &str,
        size: usize,
        elem_size: usize,
    ) -> Option<ElementView<'_>> {
        self.allocate_element(program, name, size, elem_size, Shape::Shared)
    }

    /// Allocate a scalar sized for `T`.
    pub fn allocate_scalar<T: Pod>(&mut self, program: &str, name: &str) -> Option<ElementView<'_>> {
        self.allocate_variable(program, name, size_of::<T>())
    }

    /// Allocate an array of `count` values of `T`.
    pub fn allocate_array<T: Pod>(&mut self, program: &str, name: &str, count: usize) -> Option<ElementView<'_>> {
        let size = self.typed_size::<T>(program, name, count)?;
        self.allocate_element(program, name, size, size_of::<T>(), Shape::Array)
    }

    /// Allocate a shared segment of `count` values of `T`.
    pub fn allocate_shared<T: Pod>(&mut self, program: &str, name: &str, count: usize) -> Option<ElementView<'_>> {
        let size = self.typed_size::<T>(program, name, count)?;
        self.allocate_element(program, name, size, size_of::<T>(), Shape::Shared)
    }

    fn typed_size<T: Pod>(&mut self, program: &str, name: &str, count: usize) -> Option<usize> {
        let size = size_of::<T>().checked_mul(count);
        if size.is_none() {
            self.errors.record(
                ErrorKind::SizeError,
                format!("'{name}': {count} items of {} bytes overflow", size_of::<T>()),
                program,
            );
        }
        size
    }

    fn allocate_element(
        &mut self,
        program: &str,
        name: &str,
        size: usize,
        elem_size: usize,
        shape: Shape,
    ) -> Option<ElementView<'_>> {
        let Some(prog) = self.programs.get(program) else {
            self.errors.record(
                ErrorKind::AccessError,
                format!("program '{program}' doesn't exist"),
                program,
            );
            return None;
        };
        if !prog.possible_for_expansion(size, &self.registry) {
            self.errors.record(
                ErrorKind::SizeError,
                format!("the memory limit in the '{program}' program has been exceeded"),
                program,
            );
            return None;
        }
        if elem_size == 0 || size % elem_size != 0 {
            self.errors.record(
                ErrorKind::SizeError,
                format!("'{name}': size {size} is not a multiple of element size {elem_size}"),
                program,
            );
            return None;
        }
        if self.registry.contains(name) {
            self.errors.record(
                ErrorKind::MemoryLeak,
                format!("element '{name}' already exists"),
                program,
            );
            return None;
        }

        let offset = match self.arena.allocate_block(size) {
            Ok(offset) => offset,
            Err(err) => {
                self.record_arena_error(&err, program);
                return None;
            }
        };
        let placement = Placement::new(offset, size, elem_size);
        let element = match shape {
            Shape::Scalar => Element::Scalar(placement),
            Shape::Array => Element::Array(placement),
            Shape::Shared => Element::Shared(SharedSegment::new(placement, program)),
        };
        self.registry.insert(name, element);
        if let Some(prog) = self.programs.get_mut(program) {
            prog.insert_element(name);
        }
        tracing::debug!(program, element = name, offset, size, kind = %shape.kind(), "element allocated");
        self.get_element(name)
    }

    // ── References ─────────────────────────────────────────────────

    /// Register `name` as an alias of `target` on behalf of `program`.
    ///
    /// The program must already see `target`, the name must be free,
    /// and the target must be a storage-backed element rather than
    /// another reference.
    pub fn make_reference(&mut self, program: &str, name: &str, target: &str) -> Option<ElementView<'_>> {
        let Some(prog) = self.programs.get(program) else {
            self.errors.record(
                ErrorKind::AccessError,
                format!("program '{program}' doesn't exist"),
                program,
            );
            return None;
        };
        if !prog.contains(target) {
            self.errors.record(
                ErrorKind::AccessError,
                format!("program '{program}' has no access to '{target}'"),
                program,
            );
            return None;
        }
        if self.registry.contains(name) {
            self.errors.record(
                ErrorKind::MemoryLeak,
                format!("element '{name}' already exists"),
                program,
            );
            return None;
        }
        match self.registry.get(target) {
            None => {
                self.errors.record(
                    ErrorKind::AccessError,
                    format!("target '{target}' doesn't exist"),
                    program,
                );
                return None;
            }
            Some(element) if element.is_reference() => {
                self.errors.record(
                    ErrorKind::AccessError,
                    format!("'{target}' is a reference; references to references are not allowed"),
                    program,
                );
                return None;
            }
            Some(_) => {}
        }

        self.registry
            .insert(name, Element::Reference(Reference::new(target)));
        if let Some(prog) = self.programs.get_mut(program) {
            prog.insert_element(name);
        }
        tracing::debug!(program, element = name, target, "reference created");
        self.get_element(name)
    }

    // ── Destruction ────────────────────────────────────────────────

    /// Destroy an element held by `program`.
    ///
    /// Fails with an AccessError if the program does not hold `name`.
    /// A shared segment can only be destroyed by its sole owner.
    pub fn destroy_element(&mut self, program: &str, name: &str) -> bool {
        let Some(prog) = self.programs.get(program) else {
            self.errors.record(
                ErrorKind::AccessError,
                format!("program '{program}' doesn't exist"),
                program,
            );
            return false;
        };
        if !prog.contains(name) {
            self.errors.record(
                ErrorKind::AccessError,
                format!("element '{name}' not found in program '{program}'"),
                program,
            );
            return false;
        }
        if let Some(element) = self.registry.get(name) {
            if let Err(denial) = element.check_destroy(name, program) {
                self.errors.record(denial.kind, denial.reason, program);
                return false;
            }
        }
        if !self.release_element(name, program) {
            return false;
        }
        if let Some(prog) = self.programs.get_mut(program) {
            prog.erase_element(name);
        }
        true
    }

    /// Release an element's arena block and unregister it.
    ///
    /// The program association is left untouched when this fails, so
    /// the caller's view stays consistent with the registry.
    fn release_element(&mut self, name: &str, program: &str) -> bool {
        let Some(element) = self.registry.get(name) else {
            self.errors.record(
                ErrorKind::MemoryLeak,
                format!("element '{name}' doesn't exist"),
                program,
            );
            return false;
        };
        if let Some(placement) = element.placement().copied() {
            if let Err(err) = self.arena.destroy_block(placement.offset, placement.size) {
                self.record_arena_error(&err, program);
                return false;
            }
        }
        self.registry.remove(name);
        tracing::debug!(program, element = name, "element destroyed");
        true
    }

    // ── Introspection ──────────────────────────────────────────────

    /// Resolved view of a registered element.
    pub fn get_element(&self, name: &str) -> Option<ElementView<'_>> {
        let (name, element) = self.registry.get_entry(name)?;
        Some(ElementView::new(name, element, &self.registry, self.capacity()))
    }

    /// Views of every registered element, in registration order.
    pub fn elements(&self) -> impl Iterator<Item = ElementView<'_>> {
        let capacity = self.capacity();
        self.registry
            .iter()
            .map(move |(name, element)| ElementView::new(name, element, &self.registry, capacity))
    }

    /// Names visible to `program`, or `None` if it doesn't exist.
    pub fn list_elements(&self, program: &str) -> Option<Vec<String>> {
        self.programs
            .get(program)
            .map(|p| p.elements().map(str::to_string).collect())
    }

    /// Names of shared segments, optionally only those `program` owns.
    pub fn list_shared_segments(&self, program: Option<&str>) -> Vec<String> {
        self.registry
            .iter()
            .filter_map(|(name, element)| element.as_shared().map(|s| (name, s)))
            .filter(|(_, segment)| program.is_none_or(|p| segment.check_access(p)))
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Names of references whose target no longer resolves to storage.
    ///
    /// Agrees with [`ElementView::is_valid`]: a target name that was
    /// freed and then reused for another reference still dangles.
    pub fn dangling_references(&self) -> Vec<String> {
        self.registry
            .iter()
            .filter(|(name, element)| element.as_reference().is_some() && self.registry.resolve(name).is_none())
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Per-program share of the arena: `used_memory / capacity`.
    pub fn statistics(&self) -> IndexMap<String, f64> {
        let capacity = self.capacity() as f64;
        self.programs
            .iter()
            .map(|(name, p)| (name.clone(), p.used_memory(&self.registry) as f64 / capacity))
            .collect()
    }

    /// The element registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The arena.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Arena capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Current arena free list.
    pub fn free_blocks(&self) -> &[FreeBlock] {
        self.arena.free_blocks()
    }

    // ── Error log ──────────────────────────────────────────────────

    /// Append a fault to the log.
    pub fn record_error(&mut self, kind: ErrorKind, description: impl Into<String>, program: &str) {
        self.errors.record(kind, description, program);
    }

    fn record_arena_error(&mut self, err: &ArenaError, program: &str) {
        let kind = match err {
            ArenaError::DoubleFree { .. } => ErrorKind::DoubleFree,
            _ => ErrorKind::SizeError,
        };
        self.errors.record(kind, err.to_string(), program);
    }

    /// Every recorded fault, oldest first.
    pub fn all_errors(&self) -> &[ErrorRecord] {
        self.errors.all()
    }

    /// Faults attributed to `program`, oldest first.
    pub fn program_errors(&self, program: &str) -> Vec<ErrorRecord> {
        self.errors.for_program(program).cloned().collect()
    }

    /// The error log.
    pub fn error_log(&self) -> &ErrorLog {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> Manager {
        Manager::with_capacity(1024).unwrap()
    }

    #[test]
    fn add_and_delete_program() {
        let mut m = manager();
        let handle = m.add_program("prog1", "test.cpp", 512).unwrap();
        assert_eq!(handle.name(), "prog1");
        assert_eq!(m.list_programs(), ["prog1"]);

        assert!(m.add_program("prog1", "test2.cpp", 512).is_none());
        assert_eq!(m.all_errors()[0].kind(), ErrorKind::AccessError);

        assert!(m.delete_program("prog1"));
        assert!(m.list_programs().is_empty());
        assert!(!m.delete_program("prog1"));
    }

    #[test]
    fn program_metadata_is_kept() {
        let mut m = manager();
        m.add_program("p", "src/p.rs", 300);
        let p = m.program("p").unwrap();
        assert_eq!(p.file_path(), std::path::Path::new("src/p.rs"));
        assert_eq!(p.memory_limit(), 300);
    }

    #[test]
    fn default_limit_program_gets_capacity() {
        let mut m = manager();
        m.add_program_default("p", "p.rs");
        assert_eq!(m.program("p").unwrap().memory_limit(), 1024);
    }

    #[test]
    fn allocate_variable_and_reject_duplicate() {
        let mut m = manager();
        m.add_program("prog1", "test.cpp", 512);
        let var = m.allocate_scalar::<i32>("prog1", "myVar").unwrap();
        assert_eq!(var.name(), "myVar");
        assert_eq!(var.size(), 4);
        assert_eq!(var.elem_size(), 4);

        assert!(m.allocate_scalar::<i32>("prog1", "myVar").is_none());
        assert_eq!(m.all_errors().last().unwrap().kind(), ErrorKind::MemoryLeak);
        assert_eq!(m.used_memory("prog1"), Some(4));
    }

    #[test]
    fn allocate_array_sets_stride() {
        let mut m = manager();
        m.add_program("prog1", "test.cpp", 512);
        let arr = m.allocate_array::<i32>("prog1", "myArray", 10).unwrap();
        assert_eq!(arr.size(), 40);
        assert_eq!(arr.elem_size(), 4);
        assert_eq!(arr.kind(), ElementKind::Array);
    }

    #[test]
    fn misaligned_raw_array_is_size_error() {
        let mut m = manager();
        m.add_program("p", "p.rs", 512);
        assert!(m.allocate_array_raw("p", "a", 10, 4).is_none());
        assert!(m.allocate_array_raw("p", "b", 8, 0).is_none());
        assert_eq!(m.error_log().of_kind(ErrorKind::SizeError).count(), 2);
    }

    #[test]
    fn zero_sized_allocation_is_size_error() {
        let mut m = manager();
        m.add_program("p", "p.rs", 512);
        assert!(m.allocate_array::<u32>("p", "empty", 0).is_none());
        assert_eq!(m.all_errors()[0].kind(), ErrorKind::SizeError);
        assert!(!m.registry().contains("empty"));
    }

    #[test]
    fn arena_exhaustion_is_size_error() {
        let mut m = manager();
        m.add_program("a", "a.rs", 1024);
        m.add_program("b", "b.rs", 1024);
        assert!(m.allocate_variable("a", "big", 1000).is_some());
        assert!(m.allocate_variable("b", "more", 100).is_none());
        let errors = m.program_errors("b");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ErrorKind::SizeError);
    }

    #[test]
    fn unknown_program_is_access_error() {
        let mut m = manager();
        assert!(m.allocate_variable("ghost", "x", 4).is_none());
        assert!(!m.destroy_element("ghost", "x"));
        assert_eq!(m.error_log().of_kind(ErrorKind::AccessError).count(), 2);
    }

    #[test]
    fn destroy_element_frees_storage() {
        let mut m = manager();
        m.add_program("prog1", "test.cpp", 512);
        m.allocate_scalar::<i32>("prog1", "myVar");
        assert!(m.destroy_element("prog1", "myVar"));
        assert!(m.get_element("myVar").is_none());
        assert_eq!(m.free_blocks(), &[FreeBlock::new(0, 1024)]);
        assert!(!m.destroy_element("prog1", "nonExistent"));
    }

    #[test]
    fn other_programs_cannot_destroy_foreign_elements() {
        let mut m = manager();
        m.add_program("a", "a.rs", 512);
        m.add_program("b", "b.rs", 512);
        m.allocate_variable("a", "x", 8);
        assert!(!m.destroy_element("b", "x"));
        assert!(m.get_element("x").is_some());
        assert_eq!(m.program_errors("b")[0].kind(), ErrorKind::AccessError);
    }

    #[test]
    fn reference_rules() {
        let mut m = manager();
        m.add_program("p", "p.rs", 512);
        m.add_program("q", "q.rs", 512);
        m.allocate_scalar::<i32>("p", "myVar");

        let r = m.make_reference("p", "myRef", "myVar").unwrap();
        assert!(r.is_reference());
        assert!(r.is_valid());
        assert_eq!(r.name(), "myRef");

        // Unknown to the program.
        assert!(m.make_reference("p", "badRef", "nonExistent").is_none());
        // Visible only to another program.
        assert!(m.make_reference("q", "qRef", "myVar").is_none());
        // Name clash.
        assert!(m.make_reference("p", "myRef", "myVar").is_none());
        // Reference to reference.
        assert!(m.make_reference("p", "refRef", "myRef").is_none());

        let kinds: Vec<_> = m.all_errors().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            [
                ErrorKind::AccessError,
                ErrorKind::AccessError,
                ErrorKind::MemoryLeak,
                ErrorKind::AccessError
            ]
        );
    }

    #[test]
    fn references_are_not_charged_to_quota() {
        let mut m = manager();
        m.add_program("p", "p.rs", 512);
        m.allocate_array::<u64>("p", "arr", 8);
        m.make_reference("p", "r", "arr");
        assert_eq!(m.used_memory("p"), Some(64));
    }

    #[test]
    fn destroying_reference_keeps_target() {
        let mut m = manager();
        m.add_program("p", "p.rs", 512);
        m.allocate_variable("p", "x", 8);
        m.make_reference("p", "r", "x");
        assert!(m.destroy_element("p", "r"));
        assert!(m.get_element("x").is_some());
        assert_eq!(m.list_elements("p").unwrap(), ["x"]);
    }

    #[test]
    fn delete_program_reports_leaks_and_drops_references() {
        let mut m = manager();
        m.add_program("p", "p.rs", 512);
        m.allocate_variable("p", "leaked", 16);
        m.make_reference("p", "r", "leaked");
        assert!(m.delete_program("p"));

        let leaks = m.program_errors("p");
        assert_eq!(leaks.len(), 1);
        assert_eq!(leaks[0].kind(), ErrorKind::MemoryLeak);
        assert!(leaks[0].description().contains("leaked"));
        assert!(m.get_element("leaked").is_some());
        assert!(m.get_element("r").is_none());
    }

    #[test]
    fn reference_to_reused_name_is_still_dangling() {
        let mut m = manager();
        m.add_program("p", "p.rs", 512);
        m.allocate_variable("p", "a", 8);
        m.allocate_variable("p", "b", 8);
        m.make_reference("p", "r", "a");
        assert!(m.destroy_element("p", "a"));
        assert!(m.make_reference("p", "a", "b").is_some());

        let r = m.get_element("r").unwrap();
        assert!(!r.is_valid());
        assert_eq!(r.size(), 0);
        assert_eq!(m.dangling_references(), ["r"]);
        for view in m.elements() {
            assert_eq!(!view.is_valid(), m.dangling_references().contains(&view.name().to_string()));
        }
    }

    #[test]
    fn statistics_is_ratio_of_capacity() {
        let mut m = manager();
        m.add_program("prog1", "test1.cpp", 512);
        m.add_program("prog2", "test2.cpp", 512);
        m.allocate_variable("prog1", "var1", 256);
        let stats = m.statistics();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["prog1"], 0.25);
        assert_eq!(stats["prog2"], 0.0);
    }

    #[test]
    fn elements_lists_whole_registry() {
        let mut m = manager();
        m.add_program("prog1", "test.cpp", 512);
        m.allocate_scalar::<i32>("prog1", "var1");
        m.allocate_scalar::<f64>("prog1", "var2");
        let names: Vec<_> = m.elements().map(|e| e.name()).collect();
        assert_eq!(names, ["var1", "var2"]);
    }

    #[test]
    fn program_handle_forwards_operations() {
        let mut m = manager();
        let mut p = m.add_program("p", "p.rs", 100).unwrap();
        assert!(p.allocate_variable("a", 50).is_some());
        assert!(p.allocate_variable("b", 60).is_none());
        assert_eq!(p.used_memory(), 50);
        assert!(p.possible_for_expansion(50));
        assert!(p.make_reference("ra", "a").is_some());
        assert!(p.destroy_element("a"));
        assert_eq!(p.used_memory(), 0);
    }

    #[cfg(not(miri))]
    mod proptests {
        use proptest::prelude::*;

        use super::*;

        #[derive(Clone, Debug)]
        enum Op {
            Alloc(usize, usize),
            Destroy(usize),
            Share(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0usize..8, 1usize..200).prop_map(|(n, size)| Op::Alloc(n, size)),
                (0usize..8).prop_map(Op::Destroy),
                (0usize..8).prop_map(Op::Share),
            ]
        }

        proptest! {
            #[test]
            fn used_memory_never_exceeds_limit(ops in prop::collection::vec(op(), 1..64)) {
                let mut m = Manager::with_capacity(2048).unwrap();
                m.add_program("a", "a.rs", 300);
                m.add_program("b", "b.rs", 500);
                for (i, op) in ops.into_iter().enumerate() {
                    let owner = if i % 2 == 0 { "a" } else { "b" };
                    match op {
                        Op::Alloc(n, size) => {
                            if n % 3 == 0 {
                                m.allocate_shared_raw(owner, &format!("e{n}"), size, 1);
                            } else {
                                m.allocate_variable(owner, &format!("e{n}"), size);
                            }
                        }
                        Op::Destroy(n) => {
                            m.destroy_element(owner, &format!("e{n}"));
                        }
                        Op::Share(n) => {
                            m.get_access_to_shared(owner, &format!("e{n}"));
                        }
                    }
                    for program in m.programs() {
                        prop_assert!(
                            program.used_memory(m.registry()) <= program.memory_limit()
                        );
                    }
                    prop_assert!(m.arena().is_coalesced());
                }
            }
        }
    }
}
