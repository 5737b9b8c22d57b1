#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::InterruptExt;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{Instant, Ticker, Timer};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig, UsbDevice};
use ppm_joystick_rp2040::config::{
    CAPTURE_PRIORITY, DISCONNECT_FEED_INTERVAL, FORCED_DISCONNECT, LOOP_PERIOD, USB_MANUFACTURER,
    USB_MAX_POWER_MA, USB_PID, USB_PRODUCT, USB_SERIAL, USB_VID, WATCHDOG_PERIOD,
};
use ppm_joystick_rp2040::{
    configure_usb_hid, run_capture, run_writer, Delivery, FrameMailbox, HardwareWatchdog,
    JoystickBridge, JoystickRequestHandler, JoystickWriter, PpmMailbox, ReportChannel,
    StatusLeds, UsbReportSink, Watchdog, DEFAULT_MAPPING,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Runs PPM capture above the thread-mode tasks.
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Latest decoded PPM frame, written by the capture task.
static PPM_MAILBOX: PpmMailbox = FrameMailbox::new();

/// Reports on their way to the interrupt endpoint, plus the GET_REPORT snapshot.
static REPORTS: ReportChannel = ReportChannel::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<JoystickRequestHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PPM-to-Joystick starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Watchdog ---
    let mut watchdog = HardwareWatchdog::start(
        embassy_rp::watchdog::Watchdog::new(p.WATCHDOG),
        WATCHDOG_PERIOD,
    );

    // --- Status LEDs ---
    let mut leds = StatusLeds::new(
        Output::new(p.PIN_25, Level::Low),
        Output::new(p.PIN_15, Level::Low),
    );

    // --- PPM input ---
    let ppm_pin = Input::new(p.PIN_2, Pull::None);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some(USB_MANUFACTURER);
    usb_config.product = Some(USB_PRODUCT);
    usb_config.serial_number = Some(USB_SERIAL);
    usb_config.max_power = USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    let hid_state = HID_STATE.init(State::new());
    let request_handler = REQUEST_HANDLER.init(JoystickRequestHandler::new(&REPORTS));
    let hid_writer = configure_usb_hid(&mut builder, hid_state, request_handler);

    let usb_device = builder.build();

    // The pull-up stays off until the USB task runs; keep it off long
    // enough for the host to notice a disconnect.
    let reconnect_at = Instant::now() + FORCED_DISCONNECT;
    while Instant::now() < reconnect_at {
        watchdog.feed();
        Timer::after(DISCONNECT_FEED_INTERVAL).await;
    }

    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(writer_task(hid_writer).unwrap());

    interrupt::IO_IRQ_BANK0.set_priority(CAPTURE_PRIORITY);
    interrupt::SWI_IRQ_1.set_priority(CAPTURE_PRIORITY);
    let capture_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    capture_spawner.spawn(ppm_task(ppm_pin).unwrap());

    info!("PPM-to-Joystick initialized, waiting for frames...");

    let mut bridge = JoystickBridge::new(
        &PPM_MAILBOX,
        UsbReportSink::new(&REPORTS),
        watchdog,
        DEFAULT_MAPPING,
    );
    let mut ticker = Ticker::every(LOOP_PERIOD);

    loop {
        let tick = bridge.poll_once();

        REPORTS.set_current(*bridge.state().current());
        leds.set_configured(REPORTS.is_configured());
        if let Delivery::Sent(_) = tick.delivery {
            leds.toggle_activity();
        }

        ticker.next().await;
    }
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Writer task - forwards submitted reports to the interrupt endpoint.
#[embassy_executor::task]
async fn writer_task(writer: JoystickWriter<'static>) {
    run_writer(writer, &REPORTS).await;
}

/// PPM task - decodes the receiver's pulse train into channel frames.
/// Runs on [`EXECUTOR_HIGH`].
#[embassy_executor::task]
async fn ppm_task(pin: Input<'static>) {
    run_capture(pin, &PPM_MAILBOX).await;
}
