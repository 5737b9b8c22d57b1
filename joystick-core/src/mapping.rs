//! Channel-to-report mapping configuration.
//!
//! A PPM frame carries up to eight channels (0-7), each already scaled to
//! 0-255. Every channel is tagged with a [`ChannelRole`]: it either drives one
//! report axis, is sliced into a pair of mutually exclusive buttons, or is
//! ignored.

use crate::types::{Axis, Buttons, CHANNEL_COUNT};

/// Channel 5: below this value Button 3 is pressed.
pub const CH5_LOW_THRESHOLD: u8 = 90;
/// Channel 5: above this value Button 4 is pressed.
pub const CH5_HIGH_THRESHOLD: u8 = 160;
/// Channel 6: below this value Button 1 is pressed.
pub const CH6_LOW_THRESHOLD: u8 = 56;
/// Channel 6: above this value Button 2 is pressed.
pub const CH6_HIGH_THRESHOLD: u8 = 200;

/// A continuous channel read as a three-position switch.
///
/// Values strictly above `high` press `above`, values strictly below `low`
/// press `below`, anything in between (thresholds included) presses nothing.
/// The two buttons can therefore never be pressed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchPair {
    pub low: u8,
    pub high: u8,
    pub below: Buttons,
    pub above: Buttons,
}

impl SwitchPair {
    #[must_use]
    pub const fn new(low: u8, high: u8, below: Buttons, above: Buttons) -> Self {
        Self {
            low,
            high,
            below,
            above,
        }
    }

    /// Buttons pressed for the given channel value.
    #[inline]
    #[must_use]
    pub const fn evaluate(&self, value: u8) -> Buttons {
        if value > self.high {
            self.above
        } else if value < self.low {
            self.below
        } else {
            Buttons::NONE
        }
    }
}

/// What a physical channel contributes to the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelRole {
    /// The channel value is copied verbatim into one axis byte.
    Axis(Axis),
    /// The channel value is thresholded into the button byte.
    Switch(SwitchPair),
    /// The channel is not part of the report.
    Unused,
}

/// Role of every channel slot, indexed by physical channel.
///
/// Customize this at compile-time by creating your own const and checking
/// it with [`ChannelMapping::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMapping {
    pub roles: [ChannelRole; CHANNEL_COUNT],
}

/// Default mapping of the PPM-to-joystick adapter.
///
/// - CH0 -> Y
/// - CH1 -> Z
/// - CH2 -> Rx
/// - CH3 -> not reported
/// - CH4 -> X
/// - CH5 -> Button 3 (low) / Button 4 (high)
/// - CH6 -> Button 1 (low) / Button 2 (high)
/// - CH7 -> not reported
pub const DEFAULT_MAPPING: ChannelMapping = ChannelMapping {
    roles: [
        ChannelRole::Axis(Axis::Y),
        ChannelRole::Axis(Axis::Z),
        ChannelRole::Axis(Axis::Rx),
        ChannelRole::Unused,
        ChannelRole::Axis(Axis::X),
        ChannelRole::Switch(SwitchPair::new(
            CH5_LOW_THRESHOLD,
            CH5_HIGH_THRESHOLD,
            Buttons::BUTTON3,
            Buttons::BUTTON4,
        )),
        ChannelRole::Switch(SwitchPair::new(
            CH6_LOW_THRESHOLD,
            CH6_HIGH_THRESHOLD,
            Buttons::BUTTON1,
            Buttons::BUTTON2,
        )),
        ChannelRole::Unused,
    ],
};

const _: () = assert!(DEFAULT_MAPPING.validate().is_ok());

/// Reasons a [`ChannelMapping`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MappingError {
    /// Two channels write the same axis.
    DuplicateAxis(Axis),
    /// Switch on this channel has `low >= high`, leaving no neutral zone.
    InvertedThresholds { channel: usize },
    /// Switch on this channel has an empty button or presses the same
    /// button from both zones.
    OverlappingButtons { channel: usize },
    /// Switch on this channel drives a button already owned by another switch.
    SharedButton { channel: usize },
}

impl ChannelMapping {
    /// Role of a channel, `Unused` past the last slot.
    #[inline]
    #[must_use]
    pub fn role(&self, channel: usize) -> ChannelRole {
        self.roles.get(channel).copied().unwrap_or(ChannelRole::Unused)
    }

    /// Check the mapping for conflicting roles.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`] found, scanning channels in order.
    pub const fn validate(&self) -> Result<(), MappingError> {
        let mut axes_seen = [false; Axis::COUNT];
        let mut buttons_seen = Buttons::NONE;
        let mut channel = 0;

        while channel < CHANNEL_COUNT {
            match self.roles[channel] {
                ChannelRole::Axis(axis) => {
                    if axes_seen[axis.index()] {
                        return Err(MappingError::DuplicateAxis(axis));
                    }
                    axes_seen[axis.index()] = true;
                }
                ChannelRole::Switch(pair) => {
                    if pair.low >= pair.high {
                        return Err(MappingError::InvertedThresholds { channel });
                    }
                    if pair.below.is_empty()
                        || pair.above.is_empty()
                        || pair.below.intersects(pair.above)
                    {
                        return Err(MappingError::OverlappingButtons { channel });
                    }
                    if buttons_seen.intersects(pair.below) || buttons_seen.intersects(pair.above) {
                        return Err(MappingError::SharedButton { channel });
                    }
                    buttons_seen = Buttons::from_raw(
                        buttons_seen.raw() | pair.below.raw() | pair.above.raw(),
                    );
                }
                ChannelRole::Unused => {}
            }
            channel += 1;
        }

        Ok(())
    }
}

impl Default for ChannelMapping {
    fn default() -> Self {
        DEFAULT_MAPPING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch5() -> SwitchPair {
        match DEFAULT_MAPPING.role(5) {
            ChannelRole::Switch(pair) => pair,
            other => panic!("channel 5 is not a switch: {:?}", other),
        }
    }

    fn ch6() -> SwitchPair {
        match DEFAULT_MAPPING.role(6) {
            ChannelRole::Switch(pair) => pair,
            other => panic!("channel 6 is not a switch: {:?}", other),
        }
    }

    #[test]
    fn test_ch5_thresholds_are_exclusive() {
        assert_eq!(ch5().evaluate(160), Buttons::NONE);
        assert_eq!(ch5().evaluate(161), Buttons::BUTTON4);
        assert_eq!(ch5().evaluate(89), Buttons::BUTTON3);
        assert_eq!(ch5().evaluate(90), Buttons::NONE);
    }

    #[test]
    fn test_ch6_thresholds_are_exclusive() {
        assert_eq!(ch6().evaluate(200), Buttons::NONE);
        assert_eq!(ch6().evaluate(201), Buttons::BUTTON2);
        assert_eq!(ch6().evaluate(55), Buttons::BUTTON1);
        assert_eq!(ch6().evaluate(56), Buttons::NONE);
    }

    #[test]
    fn test_zero_is_low_zone() {
        assert_eq!(ch5().evaluate(0), Buttons::BUTTON3);
        assert_eq!(ch6().evaluate(0), Buttons::BUTTON1);
    }

    #[test]
    fn test_full_scale_is_high_zone() {
        assert_eq!(ch5().evaluate(255), Buttons::BUTTON4);
        assert_eq!(ch6().evaluate(255), Buttons::BUTTON2);
    }

    #[test]
    fn test_default_mapping_roles() {
        assert_eq!(DEFAULT_MAPPING.role(4), ChannelRole::Axis(Axis::X));
        assert_eq!(DEFAULT_MAPPING.role(0), ChannelRole::Axis(Axis::Y));
        assert_eq!(DEFAULT_MAPPING.role(1), ChannelRole::Axis(Axis::Z));
        assert_eq!(DEFAULT_MAPPING.role(2), ChannelRole::Axis(Axis::Rx));
        assert_eq!(DEFAULT_MAPPING.role(3), ChannelRole::Unused);
        assert_eq!(DEFAULT_MAPPING.role(7), ChannelRole::Unused);
        assert_eq!(DEFAULT_MAPPING.role(42), ChannelRole::Unused);
        assert_eq!(DEFAULT_MAPPING.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_duplicate_axis() {
        let mut mapping = DEFAULT_MAPPING;
        mapping.roles[3] = ChannelRole::Axis(Axis::X);
        assert_eq!(mapping.validate(), Err(MappingError::DuplicateAxis(Axis::X)));
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut mapping = DEFAULT_MAPPING;
        mapping.roles[5] = ChannelRole::Switch(SwitchPair::new(
            160,
            90,
            Buttons::BUTTON3,
            Buttons::BUTTON4,
        ));
        assert_eq!(
            mapping.validate(),
            Err(MappingError::InvertedThresholds { channel: 5 })
        );
    }

    #[test]
    fn test_validate_rejects_overlapping_buttons() {
        let mut mapping = DEFAULT_MAPPING;
        mapping.roles[5] = ChannelRole::Switch(SwitchPair::new(
            90,
            160,
            Buttons::BUTTON3,
            Buttons::BUTTON3,
        ));
        assert_eq!(
            mapping.validate(),
            Err(MappingError::OverlappingButtons { channel: 5 })
        );
    }

    #[test]
    fn test_validate_rejects_shared_button() {
        let mut mapping = DEFAULT_MAPPING;
        mapping.roles[7] = ChannelRole::Switch(SwitchPair::new(
            50,
            150,
            Buttons::BUTTON1,
            Buttons::BUTTON4,
        ));
        assert_eq!(
            mapping.validate(),
            Err(MappingError::SharedButton { channel: 7 })
        );
    }
}
