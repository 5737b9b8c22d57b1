//! HID class control requests: GET_REPORT, GET_IDLE, SET_IDLE.
//!
//! Everything else is answered with "no data", never an error.

use crate::types::{JoystickReport, REPORT_BUFFER_SIZE};

/// bmRequestType type field mask.
pub const REQUEST_TYPE_MASK: u8 = 0x60;
/// bmRequestType value for class requests.
pub const REQUEST_TYPE_CLASS: u8 = 0x20;

pub const HID_GET_REPORT: u8 = 0x01;
pub const HID_GET_IDLE: u8 = 0x02;
pub const HID_SET_IDLE: u8 = 0x0A;

/// Idle rate unit of the HID class protocol.
pub const IDLE_RATE_UNIT_MS: u32 = 4;

/// Convert milliseconds to an idle rate, saturating at 255 (1020 ms).
#[must_use]
pub const fn idle_rate_from_ms(duration_ms: u32) -> u8 {
    let rate = duration_ms / IDLE_RATE_UNIT_MS;
    if rate > u8::MAX as u32 {
        u8::MAX
    } else {
        rate as u8
    }
}

/// Convert an idle rate to milliseconds.
#[must_use]
pub const fn idle_ms_from_rate(rate: u8) -> u32 {
    rate as u32 * IDLE_RATE_UNIT_MS
}

/// A decoded setup request, as far as the joystick cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClassRequest {
    GetReport,
    GetIdle,
    /// New idle rate, in 4 ms units.
    SetIdle(u8),
    /// Any other request; carries `bRequest` for logging.
    Unsupported(u8),
}

impl ClassRequest {
    /// Decode `bmRequestType`, `bRequest` and `wValue` of a setup packet.
    ///
    /// Entry point for USB stacks that hand raw setup packets to the class.
    /// Stacks that decode HID requests themselves (embassy-usb) build the
    /// variants directly and pass them to [`HidControl::handle`].
    #[must_use]
    pub const fn from_setup(request_type: u8, request: u8, value: u16) -> Self {
        if (request_type & REQUEST_TYPE_MASK) != REQUEST_TYPE_CLASS {
            return Self::Unsupported(request);
        }
        match request {
            HID_GET_REPORT => Self::GetReport,
            HID_GET_IDLE => Self::GetIdle,
            HID_SET_IDLE => Self::SetIdle((value >> 8) as u8),
            other => Self::Unsupported(other),
        }
    }
}

/// HID control state: only the idle rate, which is stored and echoed back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidControl {
    idle_rate: u8,
}

impl HidControl {
    #[must_use]
    pub const fn new() -> Self {
        Self { idle_rate: 0 }
    }

    /// Answer a class request.
    ///
    /// Writes the response into `out` and returns its length, truncated to
    /// `out.len()`. GET_REPORT answers with the whole backing buffer of
    /// `report`; requests without a data stage return 0.
    pub fn handle(&mut self, request: ClassRequest, report: &JoystickReport, out: &mut [u8]) -> usize {
        match request {
            ClassRequest::GetReport => {
                let buf = report.buffer();
                let len = out.len().min(REPORT_BUFFER_SIZE);
                out[..len].copy_from_slice(&buf[..len]);
                len
            }
            ClassRequest::GetIdle => match out.first_mut() {
                Some(byte) => {
                    *byte = self.idle_rate;
                    1
                }
                None => 0,
            },
            ClassRequest::SetIdle(rate) => {
                self.idle_rate = rate;
                0
            }
            ClassRequest::Unsupported(_) => 0,
        }
    }

    /// Idle rate in 4 ms units; 0 means "report only on change".
    #[inline]
    #[must_use]
    pub fn idle_rate(&self) -> u8 {
        self.idle_rate
    }

    /// Idle rate in milliseconds.
    #[inline]
    #[must_use]
    pub fn idle_ms(&self) -> u32 {
        idle_ms_from_rate(self.idle_rate)
    }

    /// Store an idle rate given in milliseconds, saturating at 1020 ms.
    pub fn set_idle_ms(&mut self, duration_ms: u32) {
        self.idle_rate = idle_rate_from_ms(duration_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Buttons;

    const CLASS_IN: u8 = 0xA1;
    const CLASS_OUT: u8 = 0x21;
    const VENDOR_IN: u8 = 0xC1;

    fn report() -> JoystickReport {
        JoystickReport {
            axes: [50, 10, 20, 30],
            buttons: Buttons::BUTTON4,
        }
    }

    #[test]
    fn test_decode_setup() {
        assert_eq!(ClassRequest::from_setup(CLASS_IN, 0x01, 0x0100), ClassRequest::GetReport);
        assert_eq!(ClassRequest::from_setup(CLASS_IN, 0x02, 0), ClassRequest::GetIdle);
        assert_eq!(
            ClassRequest::from_setup(CLASS_OUT, 0x0A, 0x7D00),
            ClassRequest::SetIdle(0x7D)
        );
        assert_eq!(
            ClassRequest::from_setup(CLASS_OUT, 0x0B, 0),
            ClassRequest::Unsupported(0x0B)
        );
        assert_eq!(
            ClassRequest::from_setup(VENDOR_IN, 0x01, 0),
            ClassRequest::Unsupported(0x01)
        );
    }

    #[test]
    fn test_get_report_returns_full_buffer() {
        let mut control = HidControl::new();
        let mut out = [0xEE; 64];
        let len = control.handle(ClassRequest::GetReport, &report(), &mut out);
        assert_eq!(len, 8);
        assert_eq!(&out[..len], &[50, 10, 20, 30, 0x08, 0, 0, 0]);
    }

    #[test]
    fn test_get_report_truncates_to_buffer() {
        let mut control = HidControl::new();
        let mut out = [0u8; 3];
        let len = control.handle(ClassRequest::GetReport, &report(), &mut out);
        assert_eq!(len, 3);
        assert_eq!(out, [50, 10, 20]);
    }

    #[test]
    fn test_set_then_get_idle() {
        let mut control = HidControl::new();
        let mut out = [0u8; 8];

        assert_eq!(control.handle(ClassRequest::SetIdle(125), &report(), &mut out), 0);
        assert_eq!(control.handle(ClassRequest::GetIdle, &report(), &mut out), 1);
        assert_eq!(out[0], 125);
        assert_eq!(control.idle_ms(), 500);
    }

    #[test]
    fn test_get_idle_with_empty_buffer() {
        let mut control = HidControl::new();
        assert_eq!(control.handle(ClassRequest::GetIdle, &report(), &mut [0u8; 0]), 0);
    }

    #[test]
    fn test_unsupported_returns_no_data() {
        let mut control = HidControl::new();
        let mut out = [0u8; 8];
        assert_eq!(control.handle(ClassRequest::Unsupported(0x09), &report(), &mut out), 0);
        assert_eq!(out, [0u8; 8]);
    }

    #[test]
    fn test_idle_ms_conversion_saturates() {
        let mut control = HidControl::new();
        control.set_idle_ms(40);
        assert_eq!(control.idle_rate(), 10);
        control.set_idle_ms(10_000);
        assert_eq!(control.idle_rate(), 255);
    }

    #[test]
    fn test_millisecond_requests_round_trip_through_handle() {
        let mut control = HidControl::new();
        let mut rate = [0u8; 1];

        let request = ClassRequest::SetIdle(idle_rate_from_ms(500));
        assert_eq!(control.handle(request, &report(), &mut [0u8; 0]), 0);
        assert_eq!(control.handle(ClassRequest::GetIdle, &report(), &mut rate), 1);
        assert_eq!(idle_ms_from_rate(rate[0]), 500);

        // Out-of-range durations clamp to the largest rate
        let request = ClassRequest::SetIdle(idle_rate_from_ms(u32::MAX));
        control.handle(request, &report(), &mut [0u8; 0]);
        control.handle(ClassRequest::GetIdle, &report(), &mut rate);
        assert_eq!(idle_ms_from_rate(rate[0]), 1020);
    }
}
