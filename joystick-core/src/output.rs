//! Report sink trait.

/// Interrupt endpoint that carries joystick reports to the host.
///
/// Every call is non-blocking. From the caller's point of view there are
/// exactly two states: ready for a new report, or still busy with the
/// previous one. Link-level failures are the implementation's business.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportSink {
    /// Let the USB stack make protocol progress.
    ///
    /// Called once per loop iteration. Stacks that run in their own task
    /// keep the default no-op.
    fn poll(&mut self) {}

    /// Check whether the previous report was collected and a new one may be
    /// submitted.
    fn is_ready(&self) -> bool;

    /// Submit a report. Only called after [`is_ready`](Self::is_ready)
    /// returned `true` in the same iteration.
    fn send(&mut self, report: &[u8]);

    /// Report, once, that the host may have lost what was last submitted.
    ///
    /// Returns `true` after a bus reset, a failed transfer or a fresh
    /// configuration, then `false` until the next such event. The bridge
    /// answers by sending the current report again. Sinks that never lose
    /// a submitted report keep the default.
    fn take_link_reset(&mut self) -> bool {
        false
    }
}
