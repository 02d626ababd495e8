//! Monotonic clock on the embassy time driver

use embassy_time::Instant;
use helio_hal::Monotonic;

/// Microsecond clock backed by `embassy_time::Instant`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
