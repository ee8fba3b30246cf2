//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns every driver plus the display/SNTP/timer adapters, exposing the
//! lot through the port traits the [`AppService`](crate::app::service::AppService)
//! consumes.  This is the only type in the system that touches actual
//! hardware.  On non-espidf targets the underlying drivers use cfg-gated
//! simulation stubs, so the full adapter is constructible on the host.

use crate::adapters::oled::OledDisplay;
use crate::adapters::sntp::SntpSync;
use crate::adapters::time::MonotonicTimer;
use crate::app::ports::{
    AnnunciatorPort, ButtonId, ClimatePort, DisplayPort, InputPort, SensorError, SyncError,
    TimeSyncPort, TimerPort,
};
use crate::climate::ClimateReading;
use crate::clock::ClockTime;
use crate::drivers::buttons::ButtonPad;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::dht22::Dht22;
use crate::drivers::status_led::StatusLed;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    buttons: ButtonPad,
    buzzer: Buzzer,
    led: StatusLed,
    dht: Dht22,
    display: OledDisplay,
    timer: MonotonicTimer,
    sntp: SntpSync,
}

impl HardwareAdapter {
    pub fn new(
        buttons: ButtonPad,
        buzzer: Buzzer,
        led: StatusLed,
        dht: Dht22,
        display: OledDisplay,
        timer: MonotonicTimer,
        sntp: SntpSync,
    ) -> Self {
        Self {
            buttons,
            buzzer,
            led,
            dht,
            display,
            timer,
            sntp,
        }
    }

    /// Silence and darken everything (shutdown / fault path).
    pub fn all_off(&mut self) {
        self.buzzer.silence();
        self.led.off();
    }
}

// ── InputPort ─────────────────────────────────────────────────

impl InputPort for HardwareAdapter {
    fn read_button(&mut self) -> Option<ButtonId> {
        self.buttons.poll()
    }
}

// ── AnnunciatorPort ───────────────────────────────────────────

impl AnnunciatorPort for HardwareAdapter {
    fn play_tone(&mut self, freq_hz: u16) {
        self.buzzer.tone(freq_hz);
    }

    fn stop_tone(&mut self) {
        self.buzzer.silence();
    }

    fn set_led(&mut self, on: bool) {
        self.led.set(on);
    }
}

// ── DisplayPort ───────────────────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn render(&mut self, text: &str, col: i32, row: i32, size: u8) {
        self.display.render(text, col, row, size);
    }

    fn clear(&mut self) {
        self.display.clear();
    }
}

// ── TimerPort ─────────────────────────────────────────────────

impl TimerPort for HardwareAdapter {
    fn now_ms(&self) -> u64 {
        self.timer.now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay_ms(ms);
    }
}

// ── ClimatePort ───────────────────────────────────────────────

impl ClimatePort for HardwareAdapter {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.dht.read()
    }
}

// ── TimeSyncPort ──────────────────────────────────────────────

impl TimeSyncPort for HardwareAdapter {
    fn sync_clock(&mut self) -> Result<ClockTime, SyncError> {
        self.sntp.sync_clock()
    }

    fn set_utc_offset(&mut self, offset_secs: i32) {
        self.sntp.set_utc_offset(offset_secs);
    }
}
