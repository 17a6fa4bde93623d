//! Error taxonomy (§7). Structural violations and evaluator-internal faults
//! are plain enums with hand-written `Display` impls, the same shape as
//! `compiler::error::CompilerError` — not a `thiserror` derive, which this
//! crate reserves for IO-facing edges it doesn't have. Unfoldable
//! expressions (division by zero, out-of-range extraction) are deliberately
//! *not* represented here: per §4.1/§7 they are not errors, they are
//! "return the input node unchanged".

use std::fmt::{self, Display};

/// A structural violation in the tree: a programmer error in the upstream
/// checker or simplifier, never a condition a well-formed design can
/// trigger (§7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A named actual in the tail of a call's parameter list had no
    /// matching formal port (§4.3).
    UnresolvedFormal { port: String },
    /// A node kind was used somewhere only a residual-only kind is valid,
    /// e.g. `Null` reaching the kernel (§3, §7).
    UnexpectedKind { expected: &'static str, found: String },
    /// A `for` loop's declaration slot was empty.
    MissingLoopVariable,
}

impl Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::UnresolvedFormal { port } => {
                write!(f, "unresolved formal port `{port}` in call argument normalisation")
            }
            TreeError::UnexpectedKind { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            TreeError::MissingLoopVariable => {
                write!(f, "`for` loop has no loop variable declaration")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Elaboration failures (§7): fatal before the kernel starts, returned as a
/// `Result` from kernel construction rather than panicking, since this is
/// the one fallible boundary a host embedding the kernel is expected to
/// handle (a missing or mis-kinded top-level unit is an ordinary "nothing
/// to run" condition, not a compiler bug).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    MissingTopUnit { name: String },
    WrongTopKind { found: String },
    /// `KernelOptions::max_steps` was exceeded without the delta-queue
    /// emptying; guards embedding hosts and tests against runaway designs.
    StepBudgetExceeded { max_steps: u64 },
}

impl Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::MissingTopUnit { name } => {
                write!(f, "{name} not elaborated")
            }
            KernelError::WrongTopKind { found } => {
                write!(f, "{found} not suitable top level")
            }
            KernelError::StepBudgetExceeded { max_steps } => {
                write!(f, "simulation exceeded step budget of {max_steps} cycles")
            }
        }
    }
}

impl std::error::Error for KernelError {}
