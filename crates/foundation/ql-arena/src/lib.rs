//! Indexed arena backing declaration contexts
//!
//! This is a re-export of `la-arena`, the arena used by rust-analyzer.
//! Arenas only grow; their contents are released together when the arena is
//! dropped.

pub use la_arena::{Arena, Idx, RawIdx};
