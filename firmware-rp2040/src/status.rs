//! Status LEDs.

use embedded_hal::digital::OutputPin;

/// The two status LEDs of the adapter.
///
/// `configured` mirrors the USB configuration state, `activity` toggles
/// every time a report is handed to the endpoint. Pin errors are ignored;
/// an LED is never worth stopping the loop for.
pub struct StatusLeds<C, A> {
    configured: C,
    activity: A,
    configured_on: bool,
    activity_on: bool,
}

impl<C: OutputPin, A: OutputPin> StatusLeds<C, A> {
    /// Take ownership of both pins and switch them off.
    pub fn new(mut configured: C, mut activity: A) -> Self {
        let _ = configured.set_low();
        let _ = activity.set_low();
        Self {
            configured,
            activity,
            configured_on: false,
            activity_on: false,
        }
    }

    /// Follow the USB configuration state. Only touches the pin on change.
    pub fn set_configured(&mut self, on: bool) {
        if on == self.configured_on {
            return;
        }
        self.configured_on = on;
        let _ = self.configured.set_state(on.into());
    }

    pub fn toggle_activity(&mut self) {
        self.activity_on = !self.activity_on;
        let _ = self.activity.set_state(self.activity_on.into());
    }
}
