//! Core joystick types: ChannelFrame, Axis, Buttons, JoystickReport.

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Number of channel slots carried by one decoded PPM frame.
pub const CHANNEL_COUNT: usize = 8;

/// Size of the HID input report on the wire (4 axis bytes + 1 button byte).
pub const REPORT_SIZE: usize = 5;

/// Size of the backing report buffer returned to GET_REPORT requests.
pub const REPORT_BUFFER_SIZE: usize = 8;

/// The latest fully decoded PPM frame: one 0-255 magnitude per channel.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelFrame(pub [u8; CHANNEL_COUNT]);

impl ChannelFrame {
    /// A frame with every channel at zero.
    pub const ZERO: Self = Self([0; CHANNEL_COUNT]);

    #[must_use]
    pub const fn new(channels: [u8; CHANNEL_COUNT]) -> Self {
        Self(channels)
    }

    /// Value of channel `index`, or `None` past the last channel.
    #[inline]
    #[must_use]
    pub fn channel(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Iterate over `(channel index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.0.iter().copied().enumerate()
    }
}

/// Logical report axis, in report byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
    Rx = 3,
}

impl Axis {
    /// Number of analog axes in the report.
    pub const COUNT: usize = 4;

    /// Byte offset of this axis inside the report.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Button state of the report's fifth byte.
///
/// Only the low nibble is meaningful; the high nibble is constant padding
/// in the report descriptor and is never set by the public constants.
///
/// # Example
///
/// ```
/// use ppm_joystick_core::Buttons;
///
/// let buttons = Buttons::BUTTON1 | Buttons::BUTTON4;
/// assert!(buttons.contains(Buttons::BUTTON4));
/// assert_eq!(buttons.raw(), 0x09);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    pub const BUTTON1: Self = Self(1 << 0);
    pub const BUTTON2: Self = Self(1 << 1);
    pub const BUTTON3: Self = Self(1 << 2);
    pub const BUTTON4: Self = Self(1 << 3);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Mask of the bits backed by button usages in the descriptor.
    pub const MASK: u8 = 0x0F;

    /// Build from a raw byte, dropping the padding nibble.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw & Self::MASK)
    }

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Check whether `self` and `other` share any button.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Buttons) -> bool {
        (self.0 & other.0) != 0
    }

    /// Get the raw byte value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0 & Self::MASK)
    }
}

/// HID joystick input report.
///
/// Wire layout (5 bytes), matching [`REPORT_DESCRIPTOR`](crate::REPORT_DESCRIPTOR):
///
/// | Byte | Content |
/// |------|---------|
/// | 0    | X       |
/// | 1    | Y       |
/// | 2    | Z       |
/// | 3    | Rx      |
/// | 4    | Buttons 1-4 (bits 0-3), padding (bits 4-7) |
///
/// The axes and the button byte are separate fields; no byte is ever
/// shared between an analog value and the button mask.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReport {
    /// Axis values indexed by [`Axis::index`].
    pub axes: [u8; Axis::COUNT],
    /// Button mask.
    pub buttons: Buttons,
}

impl JoystickReport {
    /// All axes at zero, no buttons.
    pub const ZERO: Self = Self {
        axes: [0; Axis::COUNT],
        buttons: Buttons::NONE,
    };

    /// Value of a single axis.
    #[inline]
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> u8 {
        self.axes[axis.index()]
    }

    /// Encode the report exactly as it travels on the interrupt endpoint.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; REPORT_SIZE] {
        [
            self.axes[0],
            self.axes[1],
            self.axes[2],
            self.axes[3],
            self.buttons.raw(),
        ]
    }

    /// Encode the report into the full backing buffer.
    ///
    /// Bytes past [`REPORT_SIZE`] are zero.
    #[must_use]
    pub fn buffer(&self) -> [u8; REPORT_BUFFER_SIZE] {
        let mut buf = [0u8; REPORT_BUFFER_SIZE];
        buf[..REPORT_SIZE].copy_from_slice(&self.as_bytes());
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = Buttons::BUTTON2 | Buttons::BUTTON3;
        assert!(buttons.contains(Buttons::BUTTON2));
        assert!(buttons.contains(Buttons::BUTTON3));
        assert!(!buttons.contains(Buttons::BUTTON1));
        assert_eq!(buttons.raw(), 0x06);
    }

    #[test]
    fn test_buttons_not_stays_in_low_nibble() {
        assert_eq!((!Buttons::NONE).raw(), 0x0F);
        assert_eq!((!Buttons::BUTTON1).raw(), 0x0E);
        assert_eq!(Buttons::from_raw(0xF3).raw(), 0x03);
    }

    #[test]
    fn test_report_wire_layout() {
        let report = JoystickReport {
            axes: [50, 10, 20, 30],
            buttons: Buttons::BUTTON4,
        };
        assert_eq!(report.as_bytes(), [50, 10, 20, 30, 0x08]);
        assert_eq!(report.axis(Axis::X), 50);
        assert_eq!(report.axis(Axis::Rx), 30);
    }

    #[test]
    fn test_report_buffer_is_zero_padded() {
        let report = JoystickReport {
            axes: [1, 2, 3, 4],
            buttons: Buttons::BUTTON1,
        };
        assert_eq!(report.buffer(), [1, 2, 3, 4, 0x01, 0, 0, 0]);
    }

    #[test]
    fn test_channel_frame_out_of_range() {
        let frame = ChannelFrame::new([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(frame.channel(7), Some(8));
        assert_eq!(frame.channel(8), None);
    }
}
