// src/common/timing.rs

// All values are milliseconds on the driver clock (`Clock::now_ms`).
// Comparisons go through the helpers below so a wrapping u32 counter
// keeps working after ~49 days of uptime. The constants are raw `u32`
// clock ticks in the unit `Clock::now_ms` returns, not
// `core::time::Duration`, and add directly to a timestamp.

// === Start-up (datasheet: 8.3 ms after VDD, rounded up) ===

/// Time since boot before the device may be addressed.
pub const POWER_UP_MS: u32 = 14;
/// Delay between a successful presence check and the first register write.
pub const SETTLE_MS: u32 = 1;

// === Polling ===

/// Interval between consecutive bus requests. Matches the 75 Hz output rate.
pub const POLL_INTERVAL_MS: u32 = 14;
/// A present sensor without a successful transfer for longer than this is
/// considered gone.
pub const STALENESS_WINDOW_MS: u32 = 200;

/// Milliseconds from `since` to `now`, tolerant of counter wrap.
#[inline]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// True once `now` has reached or passed `deadline`.
///
/// Valid as long as the two are less than `i32::MAX` ms apart.
#[inline]
pub const fn deadline_reached(now: u32, deadline: u32) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}
