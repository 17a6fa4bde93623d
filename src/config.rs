//! Kernel configuration, in the same spirit as
//! `compiler::precompiler::options::PrecompilerOptions`: a small options
//! struct threaded through construction instead of ad hoc constructor
//! arguments or module-global flags.

/// Options controlling a single [`crate::kernel::Kernel`] run.
#[derive(Debug, Clone, Copy)]
pub struct KernelOptions {
    /// Emit `TRACE <time>+<delta>: ...` lines via `log::trace!` for every
    /// process dispatch, scheduled wake, and assertion (§4.10).
    pub trace: bool,
    /// Upper bound on the number of cycles `Kernel::run` will execute
    /// before giving up with [`crate::error::KernelError::StepBudgetExceeded`].
    /// Not part of the distilled spec and not excluded by any of its
    /// Non-goals; it exists purely so a host (or this crate's own test
    /// suite) can bound a design that never empties its delta-queue.
    pub max_steps: Option<u64>,
}

impl Default for KernelOptions {
    fn default() -> Self {
        KernelOptions {
            trace: false,
            max_steps: None,
        }
    }
}

impl KernelOptions {
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}
