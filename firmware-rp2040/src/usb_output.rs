//! USB HID joystick output implementation.
//!
//! The cooperative loop must never block on the bus, so the async
//! [`HidWriter`] lives in its own task ([`run_writer`]) and the loop talks
//! to it through a [`ReportChannel`]: a latest-value [`Signal`] carrying the
//! next report, and an idle flag that is raised whenever the writer is
//! parked waiting for one. [`UsbReportSink`] turns that pair into the
//! non-blocking [`ReportSink`] the bridge expects.
//!
//! Every (re)configuration raises a link-reset flag, so the bridge sends
//! the current report again after a failed write or a bus reset even when
//! no channel moves.

use core::cell::Cell;

use defmt::{debug, info, warn};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{
    Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::Builder;
use portable_atomic::{AtomicBool, Ordering};
use ppm_joystick_core::{
    idle_ms_from_rate, idle_rate_from_ms, ClassRequest, HidControl, JoystickReport, ReportSink,
    REPORT_BUFFER_SIZE, REPORT_DESCRIPTOR, REPORT_SIZE,
};

use crate::config::{HID_MAX_PACKET_SIZE, HID_POLL_MS};

/// HID writer type for the RP2040 USB peripheral.
pub type JoystickWriter<'d> = HidWriter<'d, Driver<'d, USB>, REPORT_BUFFER_SIZE>;

/// Shared state between the main loop, the writer task and the control pipe.
pub struct ReportChannel {
    report: Signal<CriticalSectionRawMutex, [u8; REPORT_SIZE]>,
    idle: AtomicBool,
    configured: AtomicBool,
    link_reset: AtomicBool,
    current: Mutex<CriticalSectionRawMutex, Cell<JoystickReport>>,
}

impl ReportChannel {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            report: Signal::new(),
            idle: AtomicBool::new(false),
            configured: AtomicBool::new(false),
            link_reset: AtomicBool::new(false),
            current: Mutex::new(Cell::new(JoystickReport::ZERO)),
        }
    }

    /// Whether the host has configured the device.
    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::Acquire)
    }

    /// Publish the report GET_REPORT should answer with.
    pub fn set_current(&self, report: JoystickReport) {
        self.current.lock(|cell| cell.set(report));
    }

    /// Latest report published with [`set_current`](Self::set_current).
    pub fn current(&self) -> JoystickReport {
        self.current.lock(Cell::get)
    }
}

impl Default for ReportChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-blocking report sink backed by a [`ReportChannel`].
///
/// The interrupt endpoint counts as ready while the device is configured
/// and the writer task is parked with nothing to send.
pub struct UsbReportSink<'a> {
    channel: &'a ReportChannel,
}

impl<'a> UsbReportSink<'a> {
    pub fn new(channel: &'a ReportChannel) -> Self {
        Self { channel }
    }
}

impl ReportSink for UsbReportSink<'_> {
    fn is_ready(&self) -> bool {
        self.channel.is_configured() && self.channel.idle.load(Ordering::Acquire)
    }

    fn send(&mut self, report: &[u8]) {
        let Ok(bytes) = <[u8; REPORT_SIZE]>::try_from(report) else {
            warn!("Dropping report of {} bytes", report.len());
            return;
        };
        self.channel.idle.store(false, Ordering::Release);
        self.channel.report.signal(bytes);
    }

    fn take_link_reset(&mut self) -> bool {
        self.channel.link_reset.swap(false, Ordering::AcqRel)
    }
}

/// HID class request handler.
///
/// Every request goes through [`HidControl::handle`]. GET_REPORT answers
/// with the snapshot kept in the [`ReportChannel`]; the idle rate is stored
/// and echoed back but never acted on.
pub struct JoystickRequestHandler {
    control: HidControl,
    channel: &'static ReportChannel,
}

impl JoystickRequestHandler {
    pub const fn new(channel: &'static ReportChannel) -> Self {
        Self {
            control: HidControl::new(),
            channel,
        }
    }
}

impl RequestHandler for JoystickRequestHandler {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        match id {
            ReportId::In(_) => {
                let report = self.channel.current();
                Some(self.control.handle(ClassRequest::GetReport, &report, buf))
            }
            _ => None,
        }
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, duration_ms: u32) {
        let request = ClassRequest::SetIdle(idle_rate_from_ms(duration_ms));
        self.control.handle(request, &self.channel.current(), &mut [0u8; 0]);
        debug!("SET_IDLE rate={}", self.control.idle_rate());
    }

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        let mut rate = [0u8; 1];
        match self.control.handle(ClassRequest::GetIdle, &self.channel.current(), &mut rate) {
            1 => Some(idle_ms_from_rate(rate[0])),
            _ => None,
        }
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by [`run_writer`].
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    request_handler: &'d mut JoystickRequestHandler,
) -> JoystickWriter<'d> {
    let config = HidConfig {
        report_descriptor: &REPORT_DESCRIPTOR,
        request_handler: Some(request_handler),
        poll_ms: HID_POLL_MS,
        max_packet_size: HID_MAX_PACKET_SIZE,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}

/// Writer task body: moves submitted reports onto the interrupt endpoint.
///
/// Waits for configuration, then alternates between "idle" and writing one
/// report. An endpoint error (bus reset, unplug) drops the report and goes
/// back to waiting for configuration; the link-reset flag raised on the
/// next configuration makes the bridge hand the current report over again.
pub async fn run_writer(mut writer: JoystickWriter<'_>, channel: &ReportChannel) -> ! {
    loop {
        writer.ready().await;
        channel.link_reset.store(true, Ordering::Release);
        channel.configured.store(true, Ordering::Release);
        info!("USB HID configured");

        loop {
            channel.idle.store(true, Ordering::Release);
            let report = channel.report.wait().await;

            if let Err(e) = writer.write(&report).await {
                warn!("USB write failed: {:?}", e);
                break;
            }
            debug!("Sent report {:02x}", report);
        }

        channel.configured.store(false, Ordering::Release);
        channel.idle.store(false, Ordering::Release);
    }
}
