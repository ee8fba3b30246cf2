//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).  A future MQTT or BLE
//! adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | service up"),
            AppEvent::AlarmFired { slot } => info!("ALARM | slot {slot} fired"),
            AppEvent::AlarmSnoozed { slot, until_ms } => {
                info!("ALARM | slot {slot} snoozed until {until_ms}ms");
            }
            AppEvent::AlarmCancelled { slot } => info!("ALARM | slot {slot} cancelled"),
            AppEvent::AlarmConfigured { slot, target } => info!(
                "ALARM | slot {slot} set to {:02}:{:02}:{:02}",
                target.hours, target.minutes, target.seconds
            ),
            AppEvent::AlarmDeleted { slot } => info!("ALARM | slot {slot} deleted"),
            AppEvent::ClockSet(t) => info!(
                "CLOCK | set to day {} {:02}:{:02}:{:02}",
                t.days, t.hours, t.minutes, t.seconds
            ),
            AppEvent::TimeZoneChanged { utc_offset_secs } => {
                info!("CLOCK | UTC offset now {utc_offset_secs}s");
            }
            AppEvent::SyncFailed => warn!("CLOCK | network sync failed, running on last known time"),
            AppEvent::ClimateWarning { flags, reading } => warn!(
                "CLIMATE | out of range (0b{flags:04b}): {:.1}degC {:.1}%",
                reading.temperature_c, reading.humidity_pct
            ),
        }
    }
}
