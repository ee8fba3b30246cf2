//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — today they go to the serial log.

use crate::alarm::AlarmTime;
use crate::climate::ClimateReading;
use crate::clock::ClockTime;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The application service has started.
    Started,

    /// A slot's target matched the clock; the ring protocol is starting.
    AlarmFired { slot: usize },

    /// A ringing alarm was snoozed; it stays suppressed until the given
    /// monotonic deadline.
    AlarmSnoozed { slot: usize, until_ms: u64 },

    /// A ringing alarm was cancelled and its slot disarmed.
    AlarmCancelled { slot: usize },

    /// A slot was (re)configured and armed through the menu.
    AlarmConfigured { slot: usize, target: AlarmTime },

    /// A slot was disarmed through the menu.
    AlarmDeleted { slot: usize },

    /// The wall clock was manually overridden.
    ClockSet(ClockTime),

    /// The UTC offset changed.
    TimeZoneChanged { utc_offset_secs: i32 },

    /// A network time query failed; last-known time retained.
    SyncFailed,

    /// A climate sample left the healthy band (bitmask of
    /// [`ClimateWarning`](crate::climate::ClimateWarning) bits).
    ClimateWarning { flags: u8, reading: ClimateReading },
}
