//! Transport Gate: hands a pending report to the endpoint once it is free.

use crate::output::ReportSink;
use crate::state::ReportState;
use crate::types::JoystickReport;

/// Result of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// Nothing was pending.
    Idle,
    /// A report is pending but the endpoint is still busy; retried next tick.
    Busy,
    /// The report was submitted and is now the last sent report.
    Sent(JoystickReport),
}

/// Attempt to deliver the pending report.
///
/// There is no queue: whatever `state` holds when the endpoint frees up is
/// what gets sent, so intermediate reports that never made it out are
/// superseded rather than replayed. Retries are unbounded.
pub fn deliver<O: ReportSink>(state: &mut ReportState, sink: &mut O) -> Delivery {
    if !state.is_pending() {
        return Delivery::Idle;
    }
    if !sink.is_ready() {
        return Delivery::Busy;
    }

    let report = *state.current();
    sink.send(&report.as_bytes());
    state.mark_sent();
    Delivery::Sent(report)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mapping::DEFAULT_MAPPING;
    use crate::types::{Buttons, ChannelFrame, REPORT_SIZE};
    use std::vec::Vec;

    struct MockSink {
        ready: bool,
        sent: Vec<Vec<u8>>,
    }

    impl MockSink {
        fn new(ready: bool) -> Self {
            Self {
                ready,
                sent: Vec::new(),
            }
        }
    }

    impl ReportSink for MockSink {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn send(&mut self, report: &[u8]) {
            self.sent.push(report.to_vec());
        }
    }

    fn frame(ch4: u8, ch5: u8) -> ChannelFrame {
        ChannelFrame::new([10, 20, 30, 40, ch4, ch5, 128, 0])
    }

    #[test]
    fn test_nothing_pending_is_noop() {
        let mut state = ReportState::new();
        let mut sink = MockSink::new(true);
        assert_eq!(deliver(&mut state, &mut sink), Delivery::Idle);
        assert!(sink.sent.is_empty());
    }

    #[test]
    fn test_ready_endpoint_gets_five_bytes() {
        let mut state = ReportState::new();
        let mut sink = MockSink::new(true);
        state.apply_frame(&frame(50, 170), &DEFAULT_MAPPING);

        let delivery = deliver(&mut state, &mut sink);

        assert!(matches!(delivery, Delivery::Sent(r) if r.buttons == Buttons::BUTTON4));
        assert_eq!(sink.sent.len(), 1);
        assert_eq!(sink.sent[0].len(), REPORT_SIZE);
        assert_eq!(sink.sent[0], [50, 10, 20, 30, 0x08]);
        assert!(!state.is_pending());
        assert_eq!(state.last_sent(), state.current());
    }

    #[test]
    fn test_busy_endpoint_keeps_report_pending() {
        let mut state = ReportState::new();
        let mut sink = MockSink::new(false);
        state.apply_frame(&frame(50, 170), &DEFAULT_MAPPING);
        let built = *state.current();

        for _ in 0..5 {
            assert_eq!(deliver(&mut state, &mut sink), Delivery::Busy);
            assert!(state.is_pending());
            assert_eq!(*state.current(), built);
        }
        assert!(sink.sent.is_empty());

        sink.ready = true;
        assert_eq!(deliver(&mut state, &mut sink), Delivery::Sent(built));
        assert_eq!(deliver(&mut state, &mut sink), Delivery::Idle);
        assert_eq!(sink.sent.len(), 1);
    }

    #[test]
    fn test_last_value_wins_while_busy() {
        let mut state = ReportState::new();
        let mut sink = MockSink::new(false);

        for ch4 in [60, 70, 80] {
            state.apply_frame(&frame(ch4, 128), &DEFAULT_MAPPING);
            assert_eq!(deliver(&mut state, &mut sink), Delivery::Busy);
        }

        sink.ready = true;
        deliver(&mut state, &mut sink);
        assert_eq!(sink.sent, [[80, 10, 20, 30, 0x00]]);
    }
}
