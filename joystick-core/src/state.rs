//! ReportState: the report context owned by the main loop.

use crate::builder::build_report;
use crate::mapping::ChannelMapping;
use crate::types::{ChannelFrame, JoystickReport};

/// Current report, last transmitted report, and whether they still differ
/// from the host's point of view.
///
/// `current` only becomes `last_sent` after the transport accepted it.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportState {
    current: JoystickReport,
    last_sent: JoystickReport,
    pending: bool,
}

impl ReportState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: JoystickReport::ZERO,
            last_sent: JoystickReport::ZERO,
            pending: false,
        }
    }

    /// Run the report builder over `frame`.
    ///
    /// Returns whether the report changed. A change marks the report pending;
    /// an unchanged frame never clears a report that is still waiting.
    pub fn apply_frame(&mut self, frame: &ChannelFrame, mapping: &ChannelMapping) -> bool {
        let (report, changed) = build_report(frame, &self.current, mapping);
        self.current = report;
        self.pending |= changed;
        changed
    }

    /// Record that `current` was handed to the transport.
    pub fn mark_sent(&mut self) {
        self.last_sent = self.current;
        self.pending = false;
    }

    /// Mark the current report pending again, whether or not it changed.
    ///
    /// Used when the transport lost the last report it was handed.
    pub fn resend(&mut self) {
        self.pending = true;
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> &JoystickReport {
        &self.current
    }

    #[inline]
    #[must_use]
    pub fn last_sent(&self) -> &JoystickReport {
        &self.last_sent
    }

    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::DEFAULT_MAPPING;

    #[test]
    fn test_new_state_is_idle() {
        let state = ReportState::new();
        assert!(!state.is_pending());
        assert_eq!(*state.current(), JoystickReport::ZERO);
    }

    #[test]
    fn test_change_sets_pending_until_sent() {
        let mut state = ReportState::new();
        let frame = ChannelFrame::new([1, 2, 3, 4, 5, 128, 128, 0]);

        assert!(state.apply_frame(&frame, &DEFAULT_MAPPING));
        assert!(state.is_pending());
        assert_eq!(*state.last_sent(), JoystickReport::ZERO);

        state.mark_sent();
        assert!(!state.is_pending());
        assert_eq!(state.last_sent(), state.current());
    }

    #[test]
    fn test_unchanged_frame_keeps_pending() {
        let mut state = ReportState::new();
        let frame = ChannelFrame::new([1, 2, 3, 4, 5, 128, 128, 0]);

        state.apply_frame(&frame, &DEFAULT_MAPPING);
        assert!(!state.apply_frame(&frame, &DEFAULT_MAPPING));
        assert!(state.is_pending());
    }

    #[test]
    fn test_unchanged_frame_after_send_stays_idle() {
        let mut state = ReportState::new();
        let frame = ChannelFrame::new([1, 2, 3, 4, 5, 128, 128, 0]);

        state.apply_frame(&frame, &DEFAULT_MAPPING);
        state.mark_sent();
        assert!(!state.apply_frame(&frame, &DEFAULT_MAPPING));
        assert!(!state.is_pending());
    }

    #[test]
    fn test_resend_makes_sent_report_pending() {
        let mut state = ReportState::new();
        let frame = ChannelFrame::new([1, 2, 3, 4, 5, 128, 128, 0]);

        state.apply_frame(&frame, &DEFAULT_MAPPING);
        state.mark_sent();
        state.resend();

        assert!(state.is_pending());
        assert_eq!(state.current(), state.last_sent());
        // A repeated frame does not undo the resend
        assert!(!state.apply_frame(&frame, &DEFAULT_MAPPING));
        assert!(state.is_pending());
    }
}
