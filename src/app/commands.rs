//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (the menu flow
//! today; a serial or BLE channel would produce the same commands) that
//! the [`AppService`](super::service::AppService) interprets and acts
//! upon.  Each command is a complete, validated edit — the wrapping field
//! editors make out-of-range values unrepresentable before a command is
//! ever constructed.

use crate::alarm::AlarmTime;
use crate::clock::ClockTime;

/// Commands that external flows can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Manually override the wall clock (free-running variant).
    SetTime(ClockTime),

    /// Change the UTC offset applied to synced time.
    SetTimeZone { utc_offset_secs: i32 },

    /// Set a slot's target time-of-day and arm it.
    ConfigureAlarm { slot: usize, target: AlarmTime },

    /// Disarm a slot ("delete" in the menu's vocabulary).
    DeleteAlarm { slot: usize },
}
