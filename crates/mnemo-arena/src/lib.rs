//! Fixed-capacity byte arena for the Mnemo memory simulator.
//!
//! The arena owns one contiguous `Vec<u8>` and an ordered list of free
//! blocks. Allocation is first-fit in ascending-offset order; release
//! coalesces with both neighbours so the free list never holds two
//! adjacent blocks.
//!
//! # Layout
//!
//! ```text
//! Arena
//! ├── storage: Vec<u8>             (capacity bytes, zero-initialised)
//! └── free_blocks: [FreeBlock]     (sorted by offset, fully coalesced)
//! ```
//!
//! The arena knows nothing about element names or programs. The manager
//! crate layers the registry and quota accounting on top and translates
//! [`ArenaError`] values into logged faults.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod block;
pub mod config;
pub mod error;

pub use arena::Arena;
pub use block::FreeBlock;
pub use config::ArenaConfig;
pub use error::ArenaError;
