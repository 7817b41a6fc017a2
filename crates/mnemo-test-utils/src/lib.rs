//! Test fixtures for Mnemo development.
//!
//! Builders for managers in commonly needed states, shared by the
//! integration tests and the benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{fragmented_manager, manager_with_programs, ErrorKindCounts};
