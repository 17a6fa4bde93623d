//! End-to-end scheduling scenarios driven purely through `Kernel`'s public
//! API: no access to the delta-queue or clock internals, only the process
//! bodies' own observations of `now()`/`delta_cycle()`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rtlsim_core::kernel::{fmt_time, ProcessBody, ProcessRecord, SchedulerHandle};
use rtlsim_core::tree::NodeKind;
use rtlsim_core::{Kernel, KernelError, KernelOptions};

/// Three processes scheduled with delays 10, 5, 10 fs (in that declaration
/// order) during the initial pass wake in the order B, A, C at simulated
/// times 5, 10, 10 fs, with the two simultaneous wakes at 10 fs falling into
/// successive delta cycles.
#[test]
fn wake_order_matches_delta_queue_tie_break_rule() {
    let _ = env_logger::try_init();
    let log = Rc::new(RefCell::new(Vec::<(u64, i32, &'static str)>::new()));

    let make_body = |label: &'static str, delay: u64| -> ProcessBody {
        let log = log.clone();
        let first = Cell::new(true);
        Box::new(move |handle: &mut SchedulerHandle<'_>| {
            log.borrow_mut().push((handle.now(), handle.delta_cycle(), label));
            if first.get() {
                first.set(false);
                handle.sched_process(delay);
            }
        })
    };

    let mut kernel = Kernel::new(
        KernelOptions::default().with_trace(true),
        "top",
        NodeKind::Elab,
        vec![
            ProcessRecord::new("A", make_body("A", 10)),
            ProcessRecord::new("B", make_body("B", 5)),
            ProcessRecord::new("C", make_body("C", 10)),
        ],
    )
    .unwrap();

    kernel.run().unwrap();

    let entries = log.borrow();
    assert_eq!(
        &entries[3..],
        &[(5, 0, "B"), (10, 0, "A"), (10, 1, "C")]
    );
}

/// A design that keeps rescheduling itself forever is stopped by the step
/// budget rather than hanging the host.
#[test]
fn runaway_design_is_bounded_by_max_steps() {
    let body: ProcessBody = Box::new(|handle| handle.sched_process(1));
    let options = KernelOptions::default().with_max_steps(100);
    let mut kernel =
        Kernel::new(options, "top", NodeKind::Elab, vec![ProcessRecord::new("p", body)]).unwrap();

    assert_eq!(kernel.run().unwrap_err(), KernelError::StepBudgetExceeded { max_steps: 100 });
}

/// An elaborated unit with no processes at all can't be simulated.
#[test]
fn empty_design_is_rejected_before_the_clock_starts() {
    let err = Kernel::new(KernelOptions::default(), "top", NodeKind::Elab, Vec::new());
    assert_eq!(err.unwrap_err(), KernelError::MissingTopUnit { name: "top".to_string() });
}

/// `fmt_time` is part of the same public surface a host would use to
/// render trace output; exercised here with values spanning every unit.
#[test]
fn time_formatting_picks_the_coarsest_exact_unit() {
    assert_eq!(fmt_time(1_000_000), "1ns");
    assert_eq!(fmt_time(1_500), "1500fs");
    assert_eq!(fmt_time(2_000_000_000_000), "2ms");
    assert_eq!(fmt_time(3_000_000_000), "3us");
}

/// A freshly constructed kernel's built-in function registry already knows
/// `STD.STANDARD.NOW`, the one intrinsic every design implicitly depends on.
#[test]
fn fresh_kernel_registers_standard_now() {
    let body: ProcessBody = Box::new(|_| {});
    let kernel = Kernel::new(
        KernelOptions::default(),
        "top",
        NodeKind::Elab,
        vec![ProcessRecord::new("p", body)],
    )
    .unwrap();

    assert!(kernel.intrinsics().is_registered("STD.STANDARD.NOW"));
    assert!(!kernel.intrinsics().is_registered("STD.STANDARD.NOTHING"));
}
