//! Report Builder: turns a decoded channel frame into a joystick report.

use crate::mapping::{ChannelMapping, ChannelRole};
use crate::types::{Buttons, ChannelFrame, JoystickReport};

/// Build the report for `frame` and tell whether it differs from `previous`.
///
/// Axis channels overwrite their axis byte, switch channels are OR-ed into a
/// freshly cleared button byte, unused channels are skipped. Axes that no
/// channel maps to keep their value from `previous`.
///
/// This is a pure computation; it never touches the transport.
///
/// # Example
///
/// ```
/// use ppm_joystick_core::{build_report, ChannelFrame, JoystickReport, DEFAULT_MAPPING};
///
/// let frame = ChannelFrame::new([10, 20, 30, 40, 50, 170, 128, 0]);
/// let (report, changed) = build_report(&frame, &JoystickReport::ZERO, &DEFAULT_MAPPING);
/// assert!(changed);
/// assert_eq!(report.as_bytes(), [50, 10, 20, 30, 0x08]);
/// ```
#[must_use]
pub fn build_report(
    frame: &ChannelFrame,
    previous: &JoystickReport,
    mapping: &ChannelMapping,
) -> (JoystickReport, bool) {
    let mut report = JoystickReport {
        axes: previous.axes,
        buttons: Buttons::NONE,
    };

    for (channel, value) in frame.iter() {
        match mapping.role(channel) {
            ChannelRole::Axis(axis) => report.axes[axis.index()] = value,
            ChannelRole::Switch(pair) => report.buttons |= pair.evaluate(value),
            ChannelRole::Unused => {}
        }
    }

    let changed = report != *previous;
    (report, changed)
}
