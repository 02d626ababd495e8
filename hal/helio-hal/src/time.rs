//! Time sources for bus timeout accounting

/// Free-running microsecond clock
///
/// Only differences between two readings are used, so the epoch is
/// irrelevant. Implementations must not go backwards.
pub trait Monotonic {
    /// Current time in microseconds
    fn now_us(&self) -> u64;
}

/// Clock that never advances
///
/// Used when no timer is available. Elapsed time is always zero, so
/// timeouts armed on a bus using this clock never fire.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClock;

impl Monotonic for NoClock {
    fn now_us(&self) -> u64 {
        0
    }
}
