//! Runtime intrinsics callable from generated process bodies (§4.10, §6):
//! `_std_standard_now` is just [`SchedulerHandle::now`]; `_sched_process` is
//! [`SchedulerHandle::sched_process`]; `_assert_fail`'s message formatting
//! lives here so it's testable without forcing a process exit.

use indexmap::IndexSet;

use crate::tree::Severity;

use super::time::fmt_time;

/// The built-in function registry named in §6: a name lookup the kernel
/// populates at construction with every intrinsic a bound process body is
/// entitled to call. The actual bodies (`_sched_process`, `_std_standard_now`)
/// are plain methods on [`super::SchedulerHandle`] rather than function
/// pointers behind this map — there is no native codegen boundary in this
/// crate for the map to dispatch through — so this stays a membership set
/// a host can query (`is_registered("STD.STANDARD.NOW")`) rather than a
/// callable table.
#[derive(Debug, Clone)]
pub struct IntrinsicRegistry {
    names: IndexSet<&'static str>,
}

impl Default for IntrinsicRegistry {
    fn default() -> Self {
        let mut names = IndexSet::new();
        names.insert("STD.STANDARD.NOW");
        IntrinsicRegistry { names }
    }
}

impl IntrinsicRegistry {
    pub fn is_registered(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }
}

/// The exact `"<time>+<delta> Assertion <Severity>: <msg>"` line this crate
/// writes to stderr for every assertion, per §4.10/§6. Pulled out of
/// `Kernel::assert_fail` so the format itself has a test that doesn't need
/// to fork a process to check the `Failure`/`Error` exit path.
pub fn format_assertion(now_fs: u64, delta_cycle: i32, severity: Severity, message: &str) -> String {
    format!("{}+{delta_cycle} Assertion {severity}: {message}", fmt_time(now_fs))
}

/// Per §7: `Note`/`Warning` continue, `Error`/`Failure` is a hard abort.
pub fn should_abort(severity: Severity) -> bool {
    severity >= Severity::Error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_standard_now_by_default() {
        let reg = IntrinsicRegistry::default();
        assert!(reg.is_registered("STD.STANDARD.NOW"));
        assert!(!reg.is_registered("STD.STANDARD.NOTHING"));
    }

    #[test]
    fn formats_assertion_line() {
        let line = format_assertion(1_000_000, 0, Severity::Warning, "x");
        assert_eq!(line, "1ns+0 Assertion Warning: x");
    }

    #[test]
    fn warning_and_note_do_not_abort_error_and_failure_do() {
        assert!(!should_abort(Severity::Note));
        assert!(!should_abort(Severity::Warning));
        assert!(should_abort(Severity::Error));
        assert!(should_abort(Severity::Failure));
    }
}
