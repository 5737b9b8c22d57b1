//! PPM to USB joystick adapter for RP2040.
//!
//! This crate binds [`ppm_joystick_core`] to the peripherals of a
//! Raspberry Pi Pico: a GPIO pin capturing the receiver's PPM train, the
//! USB device controller presenting a HID joystick, the hardware watchdog
//! and two status LEDs.
//!
//! # Overview
//!
//! The firmware:
//! 1. Timestamps PPM rising edges and decodes them into channel frames
//! 2. Maps channels to four axes and four buttons
//! 3. Sends a 5-byte HID report whenever the result changes
//!
//! See [`config`] for the pin assignment and USB identity.
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three tasks plus the
//! main loop:
//!
//! - **USB Task**: Runs the USB device stack (enumeration, control pipe)
//! - **PPM Task**: Captures edges and publishes frames ([`ppm_input`])
//! - **Writer Task**: Moves submitted reports onto the interrupt endpoint ([`usb_output`])
//! - **Main Loop**: Every millisecond, one [`JoystickBridge::poll_once`]
//!
//! Frames reach the loop through a [`FrameMailbox`]; reports leave it
//! through a [`ReportChannel`](usb_output::ReportChannel). Both hold only
//! the latest value.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset, like a watchdog bite)
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`ppm_joystick_core`] it is
//! built from, so the binary only needs to depend on this crate.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

pub use ppm_joystick_core::{
    ChannelFrame, ChannelSource, Delivery, FrameMailbox, JoystickBridge, JoystickReport,
    ReportSink, Tick, Watchdog, DEFAULT_MAPPING,
};

pub mod config;
pub mod ppm_input;
pub mod status;
pub mod usb_output;
pub mod watchdog;

pub use ppm_input::{run_capture, PpmMailbox};
pub use status::StatusLeds;
pub use usb_output::{
    configure_usb_hid, run_writer, JoystickRequestHandler, JoystickWriter, ReportChannel,
    UsbReportSink,
};
pub use watchdog::HardwareWatchdog;
