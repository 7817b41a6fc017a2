//! Element registry, program quotas and shared-memory access control for Mnemo.
//!
//! The [`Manager`] owns a single [`Arena`](mnemo_arena::Arena) and every
//! element allocated in it. Programs are quota-bounded namespaces: each
//! sees a set of element names, and its used memory is the sum of the
//! storage-backed elements it sees. Shared segments may be seen by
//! several programs at once and are charged to each of them.
//!
//! # Faults
//!
//! Registry operations never return `Err`. A rejected request appends an
//! [`ErrorRecord`](mnemo_core::ErrorRecord) to the manager's log and the
//! call returns `None` or `false`. Only value access (see
//! [`Manager::get_value`]) reports contract violations through
//! [`ValueError`](mnemo_core::ValueError).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod access;
pub mod config;
pub mod defrag;
pub mod element;
pub mod manager;
pub mod program;
pub mod registry;
pub mod segment;
pub mod shared;
pub mod view;

pub use config::ManagerConfig;
pub use defrag::DefragReport;
pub use element::{Denial, Element, Placement, Reference};
pub use manager::Manager;
pub use program::{Program, ProgramHandle};
pub use registry::Registry;
pub use segment::SharedSegment;
pub use view::ElementView;
