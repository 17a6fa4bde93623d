//! Process records (§3, §6): a process's compiled body, represented here as
//! a boxed `FnMut`, since binding a real native-codegen function pointer is
//! out of scope for this crate.

use super::SchedulerHandle;

/// Index into [`super::Kernel`]'s process table.
pub type ProcessId = usize;

/// A process's body. Called with a [`SchedulerHandle`] giving it access to
/// `_sched_process`/`_std_standard_now` without exposing the rest of the
/// kernel; it must either call `sched_process` before returning (to be
/// re-awakened) or simply return (to retire).
pub type ProcessBody = Box<dyn FnMut(&mut SchedulerHandle<'_>)>;

pub struct ProcessRecord {
    pub name: String,
    pub body: ProcessBody,
}

impl ProcessRecord {
    pub fn new(name: impl Into<String>, body: ProcessBody) -> Self {
        ProcessRecord { name: name.into(), body }
    }
}

impl std::fmt::Debug for ProcessRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRecord").field("name", &self.name).finish_non_exhaustive()
    }
}
