//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (display, buttons, buzzer/LED, DHT22, SNTP, timer)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly — and host tests substitute mocks with scripted input and a
//! simulated monotonic clock.

use crate::clock::ClockTime;
use crate::climate::ClimateReading;

// ───────────────────────────────────────────────────────────────
// Display port (domain → OLED)
// ───────────────────────────────────────────────────────────────

/// Opaque text rendering, side-effect only.  Layout is the adapter's
/// problem; the domain just names a grid position and a text size.
pub trait DisplayPort {
    /// Render `text` with its top-left corner at `(col, row)` pixels.
    /// `size` selects a font scale (1 = small, 2 = large).
    fn render(&mut self, text: &str, col: i32, row: i32, size: u8);

    /// Blank the display.
    fn clear(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Input port (buttons → domain)
// ───────────────────────────────────────────────────────────────

/// The four Medibox push-buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Cancel,
    Ok,
    Up,
    Down,
}

/// Polled button input.  `None` means "nothing pressed" and is a regular,
/// expected value — never an error.  Callers debounce by waiting a fixed
/// delay after any `Some` read.
pub trait InputPort {
    fn read_button(&mut self) -> Option<ButtonId>;
}

// ───────────────────────────────────────────────────────────────
// Annunciator port (domain → buzzer / LED)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the audible/visual alarm indicators.
pub trait AnnunciatorPort {
    /// Start sounding a square-wave tone at `freq_hz`.
    fn play_tone(&mut self, freq_hz: u16);

    /// Silence the buzzer.
    fn stop_tone(&mut self);

    /// Alarm LED on/off.
    fn set_led(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Timer port (monotonic time base)
// ───────────────────────────────────────────────────────────────

/// Injectable monotonic time source.  All blocking waits in the system go
/// through [`delay_ms`](Self::delay_ms), so tests can run the poll-sleep
/// loops against a simulated clock with zero real delay.
pub trait TimerPort {
    /// Milliseconds since boot (monotonic).
    fn now_ms(&self) -> u64;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Climate port (DHT22 → domain)
// ───────────────────────────────────────────────────────────────

/// Temperature/humidity sampling.
pub trait ClimatePort {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Time sync port (SNTP → domain)
// ───────────────────────────────────────────────────────────────

/// External wall-clock source for the synced variant.
///
/// The source tracks its own continuous time; the domain re-queries it on
/// every scheduler check.  Failure is non-fatal — the caller retains the
/// last-known `ClockTime` and keeps running in degraded mode.
pub trait TimeSyncPort {
    fn sync_clock(&mut self) -> Result<ClockTime, SyncError>;

    /// Update the UTC offset applied to synced readings.
    fn set_utc_offset(&mut self, offset_secs: i32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// a future MQTT or BLE characteristic would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ClimatePort`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer the start signal.
    NoResponse,
    /// Pulse-train decode failed or checksum mismatch.
    BadChecksum,
    /// Reading is outside the physically plausible range.
    OutOfRange,
    /// Sensor queried again before its minimum sampling period.
    TooSoon,
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoResponse => write!(f, "no response"),
            Self::BadChecksum => write!(f, "bad checksum"),
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::TooSoon => write!(f, "sampled too soon"),
        }
    }
}

/// Errors from [`TimeSyncPort`] queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncError {
    /// No sync has completed yet (SNTP still converging, or no network).
    NotSynced,
    /// The network stack is down.
    NetworkUnavailable,
}

impl core::fmt::Display for SyncError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotSynced => write!(f, "time not synced yet"),
            Self::NetworkUnavailable => write!(f, "network unavailable"),
        }
    }
}
