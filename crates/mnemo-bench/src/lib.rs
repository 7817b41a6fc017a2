//! Benchmark profiles for the Mnemo memory simulator.
//!
//! - [`populated_profile`]: one program holding `count` scalars of varied size.
//! - [`checkerboard_profile`]: the same, with every other element freed.
//! - [`element_size`]: deterministic size sequence used by both.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mnemo_manager::Manager;

/// Name of the single program every profile registers.
pub const BENCH_PROGRAM: &str = "bench";

/// Size in bytes of the `i`-th element: cycles through 8..128.
pub fn element_size(i: usize) -> usize {
    8 + (i * 37) % 120
}

/// Bytes needed to hold elements `0..count`.
pub fn total_size(count: usize) -> usize {
    (0..count).map(element_size).sum()
}

/// Manager holding `count` scalars named `e0..e{count-1}`, packed from
/// offset 0, all owned by [`BENCH_PROGRAM`].
///
/// The arena is sized with `headroom` spare bytes past the last element.
pub fn populated_profile(count: usize, headroom: usize) -> Option<Manager> {
    let capacity = total_size(count) + headroom;
    let mut manager = Manager::with_capacity(capacity).ok()?;
    manager.add_program(BENCH_PROGRAM, "bench.rs", capacity)?;
    for i in 0..count {
        manager.allocate_variable(BENCH_PROGRAM, &format!("e{i}"), element_size(i))?;
    }
    Some(manager)
}

/// [`populated_profile`] with every odd-indexed element destroyed,
/// leaving `count / 2` holes for defragmentation to close.
pub fn checkerboard_profile(count: usize) -> Option<Manager> {
    let mut manager = populated_profile(count, 0)?;
    for i in (1..count).step_by(2) {
        if !manager.destroy_element(BENCH_PROGRAM, &format!("e{i}")) {
            return None;
        }
    }
    Some(manager)
}
