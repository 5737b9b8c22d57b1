//! PPM pulse-train decoder.
//!
//! A PPM frame is a burst of pulses whose rising-edge-to-rising-edge
//! periods encode one channel each (nominally 1000-2000 us), followed by a
//! long sync gap. The decoder is fed edge timestamps and emits a
//! [`ChannelFrame`] every time a sync gap closes a long enough burst.

use crate::types::{ChannelFrame, CHANNEL_COUNT};

/// Periods longer than this separate two frames.
pub const PPM_SYNC_GAP_US: u32 = 3_000;

/// Period mapped to channel value 0.
pub const PPM_PULSE_MIN_US: u32 = 1_000;

/// Period mapped to channel value 255.
pub const PPM_PULSE_MAX_US: u32 = 2_000;

/// Fewest channels a burst must carry to be published (channels 0-6 feed the report).
pub const PPM_MIN_CHANNELS: usize = 7;

/// Scale a channel period to 0-255, clamping out-of-range periods.
#[inline]
#[must_use]
pub fn pulse_to_value(period_us: u32) -> u8 {
    let clamped = period_us.clamp(PPM_PULSE_MIN_US, PPM_PULSE_MAX_US) - PPM_PULSE_MIN_US;
    ((clamped * 255) / (PPM_PULSE_MAX_US - PPM_PULSE_MIN_US)) as u8
}

/// Edge-timestamp driven PPM decoder.
#[derive(Debug, Clone)]
pub struct PpmDecoder {
    last_edge_us: Option<u64>,
    /// `None` until the first sync gap has been seen.
    next_channel: Option<usize>,
    channels: [u8; CHANNEL_COUNT],
}

impl PpmDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_edge_us: None,
            next_channel: None,
            channels: [0; CHANNEL_COUNT],
        }
    }

    /// Feed the timestamp of a rising edge, in microseconds.
    ///
    /// Returns a frame when this edge ends a sync gap that followed at least
    /// [`PPM_MIN_CHANNELS`] channel periods. Channels past the eighth are
    /// ignored; a short burst is dropped and decoding restarts.
    pub fn push_edge(&mut self, now_us: u64) -> Option<ChannelFrame> {
        let previous = self.last_edge_us.replace(now_us)?;
        let period = u32::try_from(now_us.saturating_sub(previous)).unwrap_or(u32::MAX);

        if period > PPM_SYNC_GAP_US {
            let seen = self.next_channel.replace(0);
            let frame = match seen {
                Some(count) if count >= PPM_MIN_CHANNELS => Some(ChannelFrame(self.channels)),
                _ => None,
            };
            self.channels = [0; CHANNEL_COUNT];
            return frame;
        }

        if let Some(index) = self.next_channel.as_mut() {
            if let Some(slot) = self.channels.get_mut(*index) {
                *slot = pulse_to_value(period);
            }
            *index = index.saturating_add(1);
        }
        None
    }

    /// Forget any partial frame and wait for the next sync gap.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PpmDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed edges `periods` apart starting at `start_us`, then a closing sync gap.
    fn feed(
        decoder: &mut PpmDecoder,
        start_us: u64,
        periods: &[u32],
    ) -> (u64, Option<ChannelFrame>) {
        let mut t = start_us;
        let mut out = None;
        for &p in periods {
            t += u64::from(p);
            if let Some(f) = decoder.push_edge(t) {
                out = Some(f);
            }
        }
        t += 10_000;
        if let Some(f) = decoder.push_edge(t) {
            out = Some(f);
        }
        (t, out)
    }

    #[test]
    fn test_pulse_to_value_scaling() {
        assert_eq!(pulse_to_value(1_000), 0);
        assert_eq!(pulse_to_value(2_000), 255);
        assert_eq!(pulse_to_value(1_500), 127);
        assert_eq!(pulse_to_value(500), 0);
        assert_eq!(pulse_to_value(2_500), 255);
    }

    #[test]
    fn test_nothing_before_first_sync() {
        let mut decoder = PpmDecoder::new();
        assert_eq!(decoder.push_edge(0), None);
        assert_eq!(decoder.push_edge(1_500), None);
        assert_eq!(decoder.push_edge(3_000), None);
    }

    #[test]
    fn test_decodes_eight_channel_frame() {
        let mut decoder = PpmDecoder::new();
        decoder.push_edge(0);
        decoder.push_edge(20_000); // first sync gap

        let periods = [1_000, 2_000, 1_500, 1_000, 2_000, 1_000, 2_000, 1_500];
        let (_, frame) = feed(&mut decoder, 20_000, &periods);

        assert_eq!(
            frame,
            Some(ChannelFrame::new([0, 255, 127, 0, 255, 0, 255, 127]))
        );
    }

    #[test]
    fn test_extra_channels_are_ignored() {
        let mut decoder = PpmDecoder::new();
        decoder.push_edge(0);
        decoder.push_edge(20_000);

        let periods = [2_000; 10];
        let (_, frame) = feed(&mut decoder, 20_000, &periods);
        assert_eq!(frame, Some(ChannelFrame::new([255; 8])));
    }

    #[test]
    fn test_short_burst_is_dropped() {
        let mut decoder = PpmDecoder::new();
        decoder.push_edge(0);
        decoder.push_edge(20_000);

        let (t, frame) = feed(&mut decoder, 20_000, &[1_500; 4]);
        assert_eq!(frame, None);

        // The closing gap of the short burst opens the next frame
        let (_, frame) = feed(&mut decoder, t, &[2_000; 7]);
        assert_eq!(frame, Some(ChannelFrame::new([255, 255, 255, 255, 255, 255, 255, 0])));
    }

    #[test]
    fn test_reset_waits_for_sync() {
        let mut decoder = PpmDecoder::new();
        decoder.push_edge(0);
        decoder.push_edge(20_000);
        decoder.reset();

        let (_, frame) = feed(&mut decoder, 20_000, &[1_500; 8]);
        assert_eq!(frame, None);
    }
}
