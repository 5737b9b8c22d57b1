//! PPM capture: GPIO rising edges in, channel frames out.

use defmt::trace;
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Instant;
use ppm_joystick_core::{FrameMailbox, PpmDecoder};

/// Mailbox shared between the capture task and the main loop.
pub type PpmMailbox = FrameMailbox<CriticalSectionRawMutex>;

/// Capture task body.
///
/// Timestamps every rising edge on `pin` with the uptime clock and publishes
/// each completed frame into `mailbox`. Never returns. Meant to run on an
/// interrupt executor so the timestamp is taken right after the edge.
pub async fn run_capture(mut pin: Input<'static>, mailbox: &PpmMailbox) -> ! {
    let mut decoder = PpmDecoder::new();

    loop {
        pin.wait_for_rising_edge().await;
        let now_us = Instant::now().as_micros();

        if let Some(frame) = decoder.push_edge(now_us) {
            trace!("PPM frame {}", frame);
            mailbox.publish(frame);
        }
    }
}
