//! Hardware watchdog adapter.

use embassy_rp::watchdog::Watchdog as RpWatchdog;
use embassy_time::Duration;
use ppm_joystick_core::Watchdog;

/// RP2040 watchdog, fed by the cooperative loop.
pub struct HardwareWatchdog(RpWatchdog);

impl HardwareWatchdog {
    /// Arm the watchdog. From here on it must be fed at least every `period`.
    pub fn start(mut watchdog: RpWatchdog, period: Duration) -> Self {
        watchdog.start(period);
        Self(watchdog)
    }
}

impl Watchdog for HardwareWatchdog {
    fn feed(&mut self) {
        self.0.feed();
    }
}
