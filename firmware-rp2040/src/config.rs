//! Compile-time configuration of the adapter.
//!
//! # Hardware Configuration
//!
//! | Function        | GPIO | Description |
//! |-----------------|------|-------------|
//! | PPM input       | 2    | Receiver PPM/CPPM output (3.3 V logic) |
//! | Status LED      | 25   | On-board LED, lit once USB is configured |
//! | Activity LED    | 15   | Toggles on every report sent |

use embassy_rp::interrupt::Priority;
use embassy_time::Duration;

/// USB vendor ID (shared V-USB ID for HID joysticks).
pub const USB_VID: u16 = 0x16C0;
/// USB product ID (shared V-USB ID for HID joysticks).
pub const USB_PID: u16 = 0x27DC;
pub const USB_MANUFACTURER: &str = "Rust Joystick";
pub const USB_PRODUCT: &str = "PPM-to-USB Joystick";
pub const USB_SERIAL: &str = "001";
/// Bus power requested from the host, in mA.
pub const USB_MAX_POWER_MA: u16 = 100;

/// Host polling interval of the interrupt IN endpoint.
pub const HID_POLL_MS: u8 = 10;
/// Max packet size of the interrupt IN endpoint; one report fits.
pub const HID_MAX_PACKET_SIZE: u16 = 8;

/// Watchdog period. Any stall longer than this resets the device.
pub const WATCHDOG_PERIOD: Duration = Duration::from_secs(1);

/// How long the device stays detached at boot so the host re-enumerates.
pub const FORCED_DISCONNECT: Duration = Duration::from_millis(300);
/// Watchdog feed interval while waiting out the forced disconnect.
pub const DISCONNECT_FEED_INTERVAL: Duration = Duration::from_millis(50);

/// Period of the cooperative main loop.
pub const LOOP_PERIOD: Duration = Duration::from_millis(1);

/// Priority of the interrupt executor running PPM capture and of the GPIO
/// bank interrupt that wakes it. Above thread mode, so edge timestamps do
/// not wait for the USB task or the main loop.
pub const CAPTURE_PRIORITY: Priority = Priority::P1;
