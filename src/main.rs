//! Medibox Firmware — Main Entry Point
//!
//! Hexagonal architecture around one cooperative driver loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter           LogEventSink    WifiAdapter       │
//! │  (Input+Annunciator+       (EventSink)     (STA bring-up)    │
//! │   Display+Timer+                                             │
//! │   Climate+TimeSync)                                          │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────        │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)                 │      │
//! │  │  Clock · AlarmScheduler · ClimateMonitor           │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  Menu (blocking config flows, AppCommand producer)           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
mod alarm;
mod app;
mod climate;
mod clock;
mod config;
mod error;
mod menu;
mod pins;

mod adapters;
mod drivers;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{error, info, warn};

use esp_idf_hal::i2c::{config::Config as I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::oled::OledDisplay;
use adapters::sntp::SntpSync;
use adapters::time::MonotonicTimer;
use adapters::wifi::WifiAdapter;
use app::ports::{ButtonId, DisplayPort, InputPort, TimerPort};
use app::service::AppService;
use config::{SystemConfig, TimeSource};
use drivers::buttons::ButtonPad;
use drivers::buzzer::Buzzer;
use drivers::dht22::Dht22;
use drivers::status_led::StatusLed;
use menu::Menu;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Medibox v{} booting", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    // ── 2. Peripheral init — failure is fatal, halt loud ──────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;

    // ── 3. Display bring-up — same fatal policy ───────────────
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(400_000)),
    )?;
    let display = match OledDisplay::new(i2c) {
        Ok(d) => d,
        Err(e) => {
            error!("display init failed: {} — halting", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };

    // ── 4. Network + SNTP (synced variant) ────────────────────
    let mut wifi = WifiAdapter::new(peripherals.modem, sysloop)?;
    if config.time_source == TimeSource::Ntp {
        if let Err(e) = wifi.connect(&config.wifi_ssid, &config.wifi_password) {
            // Degraded mode: the clock free-wheels on its last value and
            // the SNTP adapter keeps reporting NotSynced.
            warn!("WiFi connect failed ({e}); running unsynced");
        }
    }
    let sntp = SntpSync::new(&config)?;

    // ── 5. Wire the hardware adapter ──────────────────────────
    let mut hw = HardwareAdapter::new(
        ButtonPad::new(),
        Buzzer::new(),
        StatusLed::new(),
        Dht22::new(pins::DHT22_GPIO),
        display,
        MonotonicTimer::new(),
        sntp,
    );
    let mut sink = LogEventSink::new();

    // ── 6. Application service + menu ─────────────────────────
    let mut app = AppService::new(config);
    let mut menu = Menu::new();

    hw.render(" Welcome\n    to\n  Medibox", 10, 10, 2);
    hw.delay_ms(1000);

    app.start(&hw, &mut sink);
    info!("System ready. Entering driver loop.");

    // ── 7. Cooperative driver loop ────────────────────────────
    //
    // One logical writer owns every piece of state; a ringing alarm
    // blocks the whole loop until the user answers it.
    loop {
        app.tick(&mut hw, &mut sink);

        if hw.read_button() == Some(ButtonId::Ok) {
            hw.delay_ms(app.config().button_debounce_ms);
            info!("OK pressed — entering menu");
            menu.run(&mut app, &mut hw, &mut sink);
        }

        app.check_climate(&mut hw, &mut sink);

        hw.delay_ms(app.config().loop_interval_ms);
    }
}
