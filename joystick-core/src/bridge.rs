//! JoystickBridge: one iteration of the cooperative main loop.

use crate::gate::{deliver, Delivery};
use crate::input::ChannelSource;
use crate::mapping::ChannelMapping;
use crate::output::ReportSink;
use crate::state::ReportState;

/// Liveness timer that resets the device unless fed periodically.
pub trait Watchdog {
    /// Restart the countdown.
    fn feed(&mut self);
}

/// What happened during one [`JoystickBridge::poll_once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// A new frame was taken from the source.
    pub new_frame: bool,
    /// That frame changed the report.
    pub changed: bool,
    /// Outcome of the delivery attempt.
    pub delivery: Delivery,
}

/// Connects a channel source to a report sink.
///
/// Owns the [`ReportState`] context and the channel mapping; the caller owns
/// the loop and decides how iterations are paced.
pub struct JoystickBridge<S, O, W> {
    source: S,
    sink: O,
    watchdog: W,
    mapping: ChannelMapping,
    state: ReportState,
}

impl<S: ChannelSource, O: ReportSink, W: Watchdog> JoystickBridge<S, O, W> {
    /// Create a new bridge with an empty report state.
    pub fn new(source: S, sink: O, watchdog: W, mapping: ChannelMapping) -> Self {
        Self {
            source,
            sink,
            watchdog,
            mapping,
            state: ReportState::new(),
        }
    }

    /// Run one loop iteration.
    ///
    /// Feeds the watchdog, lets the sink poll its stack, re-arms the current
    /// report if the sink lost its link, builds at most one report from a
    /// newly arrived frame, then tries to deliver whatever is pending.
    /// Never blocks.
    pub fn poll_once(&mut self) -> Tick {
        self.watchdog.feed();
        self.sink.poll();
        if self.sink.take_link_reset() {
            self.state.resend();
        }

        let (new_frame, changed) = match self.source.take_frame() {
            Some(frame) => (true, self.state.apply_frame(&frame, &self.mapping)),
            None => (false, false),
        };

        let delivery = deliver(&mut self.state, &mut self.sink);

        Tick {
            new_frame,
            changed,
            delivery,
        }
    }

    /// Get a reference to the report state.
    pub fn state(&self) -> &ReportState {
        &self.state
    }

    /// Get a reference to the channel source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a reference to the report sink.
    pub fn sink(&self) -> &O {
        &self.sink
    }

    /// Decompose the bridge into its source, sink and watchdog.
    pub fn into_parts(self) -> (S, O, W) {
        (self.source, self.sink, self.watchdog)
    }
}
