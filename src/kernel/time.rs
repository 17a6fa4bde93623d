//! Simulation clock and time formatting (§3, §4.10). All times are
//! femtoseconds as an unsigned 64-bit integer; there is no floating point
//! anywhere in the kernel.

/// `now` (fs) + `delta_cycle`, advanced by [`super::Kernel::run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    pub now: u64,
    pub delta_cycle: i32,
}

const UNITS: [(u64, &str); 5] = [
    (1_000_000_000_000, "ms"),
    (1_000_000_000, "us"),
    (1_000_000, "ns"),
    (1_000, "ps"),
    (1, "fs"),
];

/// Format `fs` using the coarsest unit that still divides it evenly.
pub fn fmt_time(fs: u64) -> String {
    for (scale, suffix) in UNITS {
        if fs % scale == 0 {
            return format!("{}{suffix}", fs / scale);
        }
    }
    unreachable!("fs divides evenly into femtoseconds")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_coarsest_unit_that_divides_evenly() {
        assert_eq!(fmt_time(1_000_000), "1ns");
        assert_eq!(fmt_time(1_500), "1500fs");
        assert_eq!(fmt_time(2_000_000_000_000), "2ms");
    }

    #[test]
    fn picks_microseconds_when_that_is_coarsest() {
        assert_eq!(fmt_time(3_000_000_000), "3us");
    }
}
