//! HID report descriptor for the joystick.

use crate::types::REPORT_SIZE;

/// Joystick report descriptor.
///
/// This descriptor defines:
/// - one joystick application collection
/// - X/Y and Z/Rx as two physical collections, 8 bits each, 0-255
/// - buttons 1-4, one bit each
/// - 4 constant padding bits closing the fifth byte
pub const REPORT_DESCRIPTOR: [u8; 62] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x15, 0x00, // Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x75, 0x08, // Report Size (8)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x82, //     Input (Data, Variable, Absolute, Volatile)
    0xC0, //   End Collection
    0xA1, 0x00, //   Collection (Physical)
    0x09, 0x32, //     Usage (Z)
    0x09, 0x33, //     Usage (Rx)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x82, //     Input (Data, Variable, Absolute, Volatile)
    0xC0, //   End Collection
    //
    // --- Buttons ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x04, //   Usage Maximum (Button 4)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x04, //   Report Count (4)
    0x65, 0x00, //   Unit (None)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Padding ---
    0x95, 0x01, //   Report Count (1)
    0x75, 0x04, //   Report Size (4)
    0x81, 0x03, //   Input (Constant, Variable, Absolute)
    //
    0xC0, // End Collection
];

const ITEM_REPORT_SIZE: u8 = 0x74;
const ITEM_REPORT_COUNT: u8 = 0x94;
const ITEM_INPUT: u8 = 0x80;
const ITEM_LONG: u8 = 0xFE;

/// Total number of input report bits declared by a descriptor.
///
/// Walks the short items, tracking the Report Size and Report Count globals,
/// and sums `size * count` for every Input main item. Push/Pop and report IDs
/// are not tracked; the joystick descriptor uses neither.
#[must_use]
pub const fn input_report_bits(descriptor: &[u8]) -> usize {
    let mut bits = 0;
    let mut report_size = 0;
    let mut report_count = 0;
    let mut i = 0;

    while i < descriptor.len() {
        let prefix = descriptor[i];

        if prefix == ITEM_LONG {
            // Long item: bDataSize follows the prefix, then bLongItemTag
            if i + 1 >= descriptor.len() {
                break;
            }
            i += 3 + descriptor[i + 1] as usize;
            continue;
        }

        let len = match prefix & 0x03 {
            3 => 4,
            n => n as usize,
        };

        let mut value = 0usize;
        let mut b = 0;
        while b < len && i + 1 + b < descriptor.len() {
            value |= (descriptor[i + 1 + b] as usize) << (8 * b);
            b += 1;
        }

        match prefix & 0xFC {
            ITEM_REPORT_SIZE => report_size = value,
            ITEM_REPORT_COUNT => report_count = value,
            ITEM_INPUT => bits += report_size * report_count,
            _ => {}
        }

        i += 1 + len;
    }

    bits
}

const _: () = assert!(input_report_bits(&REPORT_DESCRIPTOR) == REPORT_SIZE * 8);
