//! Core types for the Mnemo memory simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the arena, the element registry and the facade:
//! the fault taxonomy recorded in the [`ErrorLog`], the element kinds,
//! and the [`Span`] used to address a sub-range of an element.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod kind;
pub mod log;
pub mod span;

pub use error::{ErrorKind, ErrorRecord, ValueError};
pub use kind::ElementKind;
pub use log::ErrorLog;
pub use span::Span;
