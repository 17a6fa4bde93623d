//! The discrete-event simulation kernel (§4.10). Binds one boxed `FnMut`
//! process body per elaborated `Process`, runs the LRM §12.6.4
//! initialisation pass, then cycles the delta-queue until it empties.
//!
//! Grounded on the explicit "state struct + loop, no global mutable state"
//! shape of `runtime::execution::execution_loop` (minus its nightly
//! coroutine machinery, which this crate deliberately does not reach for —
//! see the design notes), with every timing/ordering/intrinsic detail taken
//! from `examples/original_source/src/rt/rtkern.c`.

mod intrinsics;
mod process;
mod queue;
mod time;

pub use intrinsics::IntrinsicRegistry;
pub use process::{ProcessBody, ProcessId, ProcessRecord};
pub use queue::DeltaQueue;
pub use time::{fmt_time, Clock};

use crate::config::KernelOptions;
use crate::error::KernelError;
use crate::tree::{NodeKind, Severity};

/// Handed to a running process body so it can call `_sched_process`/
/// `_std_standard_now` without holding a reference to the whole kernel
/// (which owns the process table the body itself lives in).
pub struct SchedulerHandle<'a> {
    queue: &'a mut DeltaQueue,
    active_proc: ProcessId,
    now: u64,
    delta_cycle: i32,
    trace: bool,
}

impl SchedulerHandle<'_> {
    /// `_sched_process(delay_fs)`: append a queue entry for the currently
    /// running process at `delay_fs` from now.
    pub fn sched_process(&mut self, delay_fs: u64) {
        if self.trace {
            log::trace!(
                "TRACE {}+{}: scheduled wake +{delay_fs}fs for process {}",
                fmt_time(self.now),
                self.delta_cycle,
                self.active_proc
            );
        }
        self.queue.insert(delay_fs, self.active_proc);
    }

    /// `_std_standard_now()`.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn delta_cycle(&self) -> i32 {
        self.delta_cycle
    }
}

#[derive(Debug)]
pub struct Kernel {
    options: KernelOptions,
    processes: Vec<ProcessRecord>,
    queue: DeltaQueue,
    clock: Clock,
    active_proc: Option<ProcessId>,
    intrinsics: IntrinsicRegistry,
}

impl Kernel {
    /// Binds `processes` (one per top-level `Process` of the elaborated
    /// unit, in declaration order) under `options`. Fails only on the
    /// elaboration-time conditions §7 names as fatal-before-start.
    pub fn new(
        options: KernelOptions,
        top_name: &str,
        top_kind: NodeKind,
        processes: Vec<ProcessRecord>,
    ) -> Result<Self, KernelError> {
        if top_kind != NodeKind::Elab {
            return Err(KernelError::WrongTopKind { found: top_kind.to_string() });
        }
        if processes.is_empty() {
            return Err(KernelError::MissingTopUnit { name: top_name.to_string() });
        }
        Ok(Kernel {
            options,
            processes,
            queue: DeltaQueue::new(),
            clock: Clock::default(),
            active_proc: None,
            intrinsics: IntrinsicRegistry::default(),
        })
    }

    pub fn now(&self) -> u64 {
        self.clock.now
    }

    pub fn delta_cycle(&self) -> i32 {
        self.clock.delta_cycle
    }

    /// The built-in function registry (§6) a host can query before binding
    /// a process body that expects e.g. `STD.STANDARD.NOW` to be available.
    pub fn intrinsics(&self) -> &IntrinsicRegistry {
        &self.intrinsics
    }

    /// Runs initialisation, then cycles the delta-queue until it's empty
    /// or the process' declared severity gate aborts execution (§4.10, §5).
    pub fn run(&mut self) -> Result<(), KernelError> {
        self.initial();

        let mut steps: u64 = 0;
        while let Some(entry) = self.queue.pop() {
            if let Some(max_steps) = self.options.max_steps {
                if steps >= max_steps {
                    return Err(KernelError::StepBudgetExceeded { max_steps });
                }
            }
            steps += 1;

            if entry.delta > 0 {
                self.clock.now += entry.delta;
                self.clock.delta_cycle = 0;
            } else {
                self.clock.delta_cycle += 1;
            }

            self.dispatch(entry.process);
        }
        Ok(())
    }

    /// LRM §12.6.4: `now = 0`, `delta_cycle = 0`, every process runs once
    /// in declaration order.
    fn initial(&mut self) {
        self.clock = Clock::default();
        for id in 0..self.processes.len() {
            self.dispatch(id);
        }
    }

    fn dispatch(&mut self, proc_id: ProcessId) {
        self.active_proc = Some(proc_id);
        if self.options.trace {
            log::trace!(
                "TRACE {}+{}: dispatch process {}",
                fmt_time(self.clock.now),
                self.clock.delta_cycle,
                self.processes[proc_id].name
            );
        }

        let mut handle = SchedulerHandle {
            queue: &mut self.queue,
            active_proc: proc_id,
            now: self.clock.now,
            delta_cycle: self.clock.delta_cycle,
            trace: self.options.trace,
        };
        (self.processes[proc_id].body)(&mut handle);
    }

    /// `_assert_fail(has_report, msg, severity)`: report, then hard-abort
    /// on `Error`/`Failure` via `std::process::exit` (§4.10, §7).
    pub fn assert_fail(&self, has_report: bool, msg: &[u8], severity: Severity) {
        let text = if has_report {
            String::from_utf8_lossy(msg).into_owned()
        } else {
            "Assertion violation.".to_string()
        };
        let line = intrinsics::format_assertion(self.clock.now, self.clock.delta_cycle, severity, &text);
        if self.options.trace {
            log::trace!("TRACE {line}");
        }
        eprintln!("{line}");
        if intrinsics::should_abort(severity) {
            std::process::exit(1);
        }
    }
}
