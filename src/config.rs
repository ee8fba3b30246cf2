//! System configuration parameters
//!
//! All tunable parameters for the Medibox system.  Nothing here is
//! persisted — the device resets to these defaults on every boot.

use serde::{Deserialize, Serialize};

/// Where the wall clock gets its time from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSource {
    /// Advance one second per accumulated 1000 ms of monotonic time.
    FreeRunning,
    /// Re-query the network time source on every scheduler check and
    /// replace the wall clock wholesale.
    Ntp,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Time base ---
    /// Clock source selection (free-running counter vs. NTP).
    pub time_source: TimeSource,
    /// UTC offset in seconds, applied when converting synced epoch time.
    pub utc_offset_secs: i32,
    /// NTP pool hostname for the synced variant.
    pub ntp_server: heapless::String<48>,

    // --- Wi-Fi (synced variant only) ---
    pub wifi_ssid: heapless::String<32>,
    pub wifi_password: heapless::String<64>,

    // --- Alarms ---
    /// Snooze suppression window after an OK press on a ringing alarm.
    pub snooze_duration_ms: u32,
    /// How long each melody note sounds while ringing.
    pub note_duration_ms: u32,
    /// Silent gap between melody notes.
    pub note_gap_ms: u32,

    // --- Input ---
    /// Fixed delay after a button registers, doubling as crude debounce.
    pub button_debounce_ms: u32,
    /// Poll-sleep interval inside blocking wait-for-button loops.
    pub button_poll_interval_ms: u32,

    // --- Climate ---
    /// DHT22 sample interval (the sensor needs ~2 s between reads).
    pub climate_sample_interval_ms: u32,
    /// Healthy temperature band (Celsius).
    pub temperature_min_c: f32,
    pub temperature_max_c: f32,
    /// Healthy relative-humidity band (percent).
    pub humidity_min_pct: f32,
    pub humidity_max_pct: f32,

    // --- Timing ---
    /// Driver loop pacing delay.
    pub loop_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Time base
            time_source: TimeSource::Ntp,
            utc_offset_secs: 0,
            ntp_server: heapless::String::try_from("pool.ntp.org").unwrap(),

            // Wi-Fi
            wifi_ssid: heapless::String::try_from("Wokwi-GUEST").unwrap(),
            wifi_password: heapless::String::new(),

            // Alarms
            snooze_duration_ms: 300_000, // 5 min
            note_duration_ms: 500,
            note_gap_ms: 50,

            // Input
            button_debounce_ms: 100,
            button_poll_interval_ms: 50,

            // Climate
            climate_sample_interval_ms: 2_000,
            temperature_min_c: 24.0,
            temperature_max_c: 32.0,
            humidity_min_pct: 65.0,
            humidity_max_pct: 80.0,

            // Timing
            loop_interval_ms: 100,
        }
    }
}

impl SystemConfig {
    /// Bounds for the UTC offset editor (hours).  Matches the real-world
    /// UTC-12 .. UTC+14 range; the editor clamps rather than wraps here.
    pub const UTC_OFFSET_MIN_HOURS: i32 = -12;
    pub const UTC_OFFSET_MAX_HOURS: i32 = 14;
}
