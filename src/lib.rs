//! Reconstructs tree-structured neuron skeletons from binary microscopy
//! volumes: 26-connected labeling, distance-banded cluster extraction,
//! cluster-graph assembly with loop cutting, and rooted-tree splitting.
//!
//! The algorithmic core (`core`) takes and returns plain in-memory types
//! and never performs I/O; `io` and `post` are the collaborators that
//! connect it to a directory of image files and the SWC output format.

pub mod core;
pub mod io;
pub mod post;
pub mod util;
