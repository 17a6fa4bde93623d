//! Semantic simplifier and discrete-event simulation kernel for a VHDL
//! compiler/simulator toolchain.
//!
//! The pipeline this crate implements is split across three layers:
//!
//! - [`tree`]: the arena-owned syntax/semantic tree every later stage reads
//!   and rewrites in place.
//! - [`eval`]: constant folding over that tree (literal arithmetic,
//!   references to constants, type conversions).
//! - [`simplify`]: the post-order rewriter that desugars call arguments,
//!   array/aggregate indexing, control flow, `for` ranges, `wait`/sensitivity
//!   lists, and concurrent statements into the sequential, fully-positional
//!   form the kernel expects.
//! - [`kernel`]: the delta-queue discrete-event scheduler that actually runs
//!   the simplified process bodies.
//!
//! [`error`] and [`config`] hold the error taxonomy and run options shared
//! across those layers.

pub mod config;
pub mod error;
pub mod eval;
pub mod kernel;
pub mod simplify;
pub mod tree;

pub use config::KernelOptions;
pub use error::{KernelError, TreeError};
pub use kernel::Kernel;
pub use tree::{Arena, NodeId, NodeKind};
