//! Mnemo: a simulated process-memory manager.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Mnemo sub-crates and adds the typed [`Session`] front end.
//!
//! # Quick start
//!
//! ```rust
//! use mnemo::prelude::*;
//!
//! let mut manager = Manager::with_capacity(1024).unwrap();
//! manager.add_program("prog1", "prog1.rs", 512);
//! manager.allocate_array::<i32>("prog1", "xs", 10);
//! manager.set_value("xs", 42i32, &Span::Index(5)).unwrap();
//! assert_eq!(manager.get_value::<i32>("xs", &Span::Index(5)).unwrap(), 42);
//!
//! manager.make_reference("prog1", "alias", "xs");
//! manager.destroy_element("prog1", "xs");
//! assert_eq!(manager.dangling_references(), ["alias"]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `mnemo-arena` | Byte arena and first-fit free list |
//! | [`types`] | `mnemo-core` | Fault taxonomy, error log, element kinds, spans |
//! | [`manager`] | `mnemo-manager` | Registry, programs, shared segments, defragmentation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod session;
pub mod value;

pub use session::Session;
pub use value::{Value, ValueType};

/// Byte arena and free-list allocator (`mnemo-arena`).
pub use mnemo_arena as arena;

/// Fault taxonomy, error log, element kinds and spans (`mnemo-core`).
pub use mnemo_core as types;

/// Element registry, program quotas and shared access (`mnemo-manager`).
pub use mnemo_manager as manager;

/// Common imports for typical Mnemo usage.
///
/// ```rust
/// use mnemo::prelude::*;
/// ```
pub mod prelude {
    // Arena
    pub use mnemo_arena::{ArenaConfig, ArenaError, FreeBlock};

    // Core types
    pub use mnemo_core::{ElementKind, ErrorKind, ErrorRecord, Span, ValueError};

    // Manager
    pub use mnemo_manager::{
        DefragReport, Element, ElementView, Manager, ManagerConfig, Program, ProgramHandle,
    };

    // Session
    pub use crate::session::Session;
    pub use crate::value::{Value, ValueType};
}
