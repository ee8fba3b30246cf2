//! Mock hardware adapter for integration tests.
//!
//! Records every display/annunciator call, serves button reads from a
//! scripted queue, and simulates the monotonic clock by advancing it on
//! every `delay_ms` — so the blocking poll-sleep loops in the domain run
//! deterministically with zero real delay.

use std::collections::VecDeque;

use medibox::app::events::AppEvent;
use medibox::app::ports::{
    AnnunciatorPort, ButtonId, ClimatePort, DisplayPort, EventSink, InputPort, SensorError,
    SyncError, TimeSyncPort, TimerPort,
};
use medibox::climate::ClimateReading;
use medibox::clock::ClockTime;

// ── Recorded side effects ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Render(String),
    Clear,
    Tone(u16),
    StopTone,
    Led(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    /// Scripted button reads, consumed front-to-back.  An exhausted
    /// script reads as "nothing pressed".
    pub buttons: VecDeque<Option<ButtonId>>,
    /// Simulated monotonic clock; `delay_ms` advances it.
    pub now_ms: u64,
    /// Response served by the TimeSyncPort.  `None` = sync failure.
    pub synced_time: Option<ClockTime>,
    /// Response served by the ClimatePort.
    pub climate: Result<ClimateReading, SensorError>,
    /// Last UTC offset pushed through the sync port.
    pub utc_offset_secs: i32,
    /// Backstop against runaway blocking loops in a broken test subject.
    reads_left: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            buttons: VecDeque::new(),
            now_ms: 0,
            synced_time: None,
            climate: Ok(ClimateReading {
                temperature_c: 28.0,
                humidity_pct: 70.0,
            }),
            utc_offset_secs: 0,
            reads_left: 100_000,
        }
    }

    /// Queue a button press.
    pub fn press(&mut self, button: ButtonId) {
        self.buttons.push_back(Some(button));
    }

    /// Queue `n` empty reads ("nothing pressed").
    pub fn idle(&mut self, n: usize) {
        for _ in 0..n {
            self.buttons.push_back(None);
        }
    }

    /// Queue a whole press sequence.
    pub fn script(&mut self, presses: &[ButtonId]) {
        for &b in presses {
            self.press(b);
        }
    }

    /// Jump the simulated monotonic clock forward.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Every tone frequency played, in order.
    pub fn tones_played(&self) -> Vec<u16> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Tone(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    /// State of the LED after the last `set_led` call.
    pub fn led_is_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::Led(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// True if any render so far contains `needle`.
    pub fn rendered(&self, needle: &str) -> bool {
        self.calls.iter().any(|c| match c {
            HwCall::Render(text) => text.contains(needle),
            _ => false,
        })
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn read_button(&mut self) -> Option<ButtonId> {
        self.reads_left = self
            .reads_left
            .checked_sub(1)
            .expect("button script exhausted: blocking loop never terminated");
        self.buttons.pop_front().flatten()
    }
}

impl TimerPort for MockHardware {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
    }
}

impl DisplayPort for MockHardware {
    fn render(&mut self, text: &str, _col: i32, _row: i32, _size: u8) {
        self.calls.push(HwCall::Render(text.to_string()));
    }

    fn clear(&mut self) {
        self.calls.push(HwCall::Clear);
    }
}

impl AnnunciatorPort for MockHardware {
    fn play_tone(&mut self, freq_hz: u16) {
        self.calls.push(HwCall::Tone(freq_hz));
    }

    fn stop_tone(&mut self) {
        self.calls.push(HwCall::StopTone);
    }

    fn set_led(&mut self, on: bool) {
        self.calls.push(HwCall::Led(on));
    }
}

impl ClimatePort for MockHardware {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate
    }
}

impl TimeSyncPort for MockHardware {
    fn sync_clock(&mut self) -> Result<ClockTime, SyncError> {
        self.synced_time.ok_or(SyncError::NotSynced)
    }

    fn set_utc_offset(&mut self, offset_secs: i32) {
        self.utc_offset_secs = offset_secs;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count_fired(&self, slot: usize) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::AlarmFired { slot: s } if *s == slot))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
