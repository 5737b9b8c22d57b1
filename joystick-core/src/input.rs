//! Channel source trait.

use crate::types::ChannelFrame;

/// Source of decoded PPM channel frames.
///
/// This trait abstracts where channel values come from (GPIO edge capture,
/// a timer input-capture interrupt, a test fixture) so the main loop can be
/// driven identically on hardware and on the host.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ChannelSource {
    /// Take the newest frame if one arrived since the last call.
    ///
    /// Clears the "new frame" condition, so each frame is returned once.
    fn take_frame(&mut self) -> Option<ChannelFrame>;

    /// Latest value of a single channel, `None` past the last channel.
    fn channel(&self, index: usize) -> Option<u8>;
}
