//! Platform-agnostic PPM-to-joystick translation.
//!
//! This crate turns decoded PPM radio-control channels into a 5-byte USB HID
//! joystick report without any platform-specific dependencies. It can be
//! used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Core data structures ([`ChannelFrame`], [`JoystickReport`], [`Buttons`], [`Axis`])
//! - [`mapping`]: Channel roles and thresholds ([`ChannelMapping`], [`DEFAULT_MAPPING`])
//! - [`builder`]: Report Builder ([`build_report`])
//! - [`state`]: Current / last-sent report context ([`ReportState`])
//! - [`gate`]: Transport Gate ([`deliver`])
//! - [`bridge`]: One iteration of the main loop ([`JoystickBridge`])
//! - [`mailbox`]: Frame handoff from the capture side ([`FrameMailbox`])
//! - [`ppm`]: Edge-timestamp PPM decoder ([`PpmDecoder`])
//! - [`descriptor`]: HID report descriptor ([`REPORT_DESCRIPTOR`])
//! - [`control`]: HID class requests ([`HidControl`])
//! - [`input`] / [`output`]: Seam traits ([`ChannelSource`], [`ReportSink`])
//!
//! # Data flow
//!
//! ```text
//! PPM edges -> PpmDecoder -> FrameMailbox -> JoystickBridge -> ReportSink
//!                                              |  build_report
//!                                              |  deliver
//! ```
//!
//! # Example
//!
//! ```rust
//! use ppm_joystick_core::{ChannelFrame, ReportState, DEFAULT_MAPPING};
//!
//! let mut state = ReportState::new();
//! let frame = ChannelFrame::new([10, 20, 30, 40, 50, 170, 128, 0]);
//!
//! assert!(state.apply_frame(&frame, &DEFAULT_MAPPING));
//! assert!(state.is_pending());
//! assert_eq!(state.current().as_bytes(), [50, 10, 20, 30, 0x08]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod builder;
pub mod control;
pub mod descriptor;
pub mod gate;
pub mod input;
pub mod mailbox;
pub mod mapping;
pub mod output;
pub mod ppm;
pub mod state;
pub mod types;

// Re-export main types at crate root
pub use bridge::{JoystickBridge, Tick, Watchdog};
pub use builder::build_report;
pub use control::{idle_ms_from_rate, idle_rate_from_ms, ClassRequest, HidControl};
pub use descriptor::{input_report_bits, REPORT_DESCRIPTOR};
pub use gate::{deliver, Delivery};
pub use input::ChannelSource;
pub use mailbox::FrameMailbox;
pub use mapping::{ChannelMapping, ChannelRole, MappingError, SwitchPair, DEFAULT_MAPPING};
pub use output::ReportSink;
pub use ppm::{pulse_to_value, PpmDecoder};
pub use state::ReportState;
pub use types::{
    Axis, Buttons, ChannelFrame, JoystickReport, CHANNEL_COUNT, REPORT_BUFFER_SIZE, REPORT_SIZE,
};
