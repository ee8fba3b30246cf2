//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the clock, the alarm scheduler and the climate
//! supervisor.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌───────────────────────────┐ ──▶ AnnunciatorPort
//!  TimerPort  ──▶ │        AppService         │ ──▶ DisplayPort
//! TimeSyncPort ──▶│  Clock · Alarms · Climate │ ──▶ EventSink
//!  ClimatePort ──▶└───────────────────────────┘
//! ```
//!
//! The whole system is one cooperative loop: while an alarm rings,
//! [`tick`](AppService::tick) does not return.  The only exits from a
//! ring are the Cancel and OK buttons; there is no timeout.

use core::fmt::Write as _;

use heapless::String;
use log::{info, warn};

use crate::alarm::ring::{RingSession, RingStep, WARNING_TONE_HZ};
use crate::alarm::{AlarmScheduler, MatchEvent, RingOutcome};
use crate::climate::ClimateMonitor;
use crate::clock::{month_abbrev, Clock, ClockTime};
use crate::config::{SystemConfig, TimeSource};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{
    AnnunciatorPort, ClimatePort, DisplayPort, EventSink, InputPort, TimeSyncPort, TimerPort,
};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    clock: Clock,
    alarms: AlarmScheduler,
    climate: ClimateMonitor,
    config: SystemConfig,
    tick_count: u64,
    /// Monotonic timestamp of the previous tick (free-running elapsed base).
    last_tick_ms: u64,
    /// Earliest monotonic time for the next climate sample.
    next_climate_ms: u64,
    /// Latch so a sync outage logs once, not every loop iteration.
    sync_degraded: bool,
}

impl AppService {
    /// Construct the service from configuration.  All state is volatile;
    /// alarm slots start at their boot defaults.
    pub fn new(config: SystemConfig) -> Self {
        let climate = ClimateMonitor::new(&config);
        Self {
            clock: Clock::new(ClockTime::zero()),
            alarms: AlarmScheduler::new(),
            climate,
            config,
            tick_count: 0,
            last_tick_ms: 0,
            next_climate_ms: 0,
            sync_degraded: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Anchor the elapsed-time base and announce startup.  Call once
    /// before the first [`tick`](Self::tick).
    pub fn start(&mut self, hw: &impl TimerPort, sink: &mut impl EventSink) {
        self.last_tick_ms = hw.now_ms();
        sink.emit(&AppEvent::Started);
        info!("AppService started ({:?} clock)", self.config.time_source);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one driver cycle: advance the clock, render it, check every
    /// alarm slot, and service any fired alarm synchronously (the ring
    /// protocol blocks until a button ends it).
    pub fn tick(
        &mut self,
        hw: &mut (impl InputPort + AnnunciatorPort + DisplayPort + TimerPort + TimeSyncPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let now_ms = hw.now_ms();
        self.advance_clock(hw, now_ms, Some(&mut *sink));

        self.render_time(hw);

        let fired = self.alarms.check(self.clock.current(), now_ms);
        for (slot, MatchEvent::Fire) in fired {
            info!("alarm {slot}: fired");
            sink.emit(&AppEvent::AlarmFired { slot });
            self.ring(slot, hw, sink);
        }
    }

    /// Keep the clock moving without running the scheduler — used by
    /// blocking wait loops (menu) so time does not stall while the user
    /// thinks.  The original sketches call their `update_time()` from the
    /// same place.
    pub fn keep_time(&mut self, hw: &mut (impl TimerPort + TimeSyncPort)) {
        let now_ms = hw.now_ms();
        self.advance_clock(hw, now_ms, None::<&mut NullSink>);
    }

    // ── Climate supervision ───────────────────────────────────

    /// Sample the climate sensor if its interval has elapsed, render the
    /// reading, and raise the warning beep on any out-of-range value.
    ///
    /// Runs only between ticks, so a ringing alarm always owns the
    /// buzzer/LED first.
    pub fn check_climate(
        &mut self,
        hw: &mut (impl ClimatePort + AnnunciatorPort + DisplayPort + TimerPort),
        sink: &mut impl EventSink,
    ) {
        let now_ms = hw.now_ms();
        if now_ms < self.next_climate_ms {
            return;
        }
        self.next_climate_ms = now_ms + u64::from(self.config.climate_sample_interval_ms);

        match hw.read_climate() {
            Ok(reading) => {
                let flags = self.climate.evaluate(&reading);
                let mut text: String<48> = String::new();
                let _ = write!(
                    text,
                    "Temp: {:.1} C\nHum: {:.1} %",
                    reading.temperature_c, reading.humidity_pct
                );
                hw.render(&text, 0, 0, 1);

                if flags != 0 {
                    sink.emit(&AppEvent::ClimateWarning { flags, reading });
                    hw.play_tone(WARNING_TONE_HZ);
                    hw.set_led(true);
                    hw.delay_ms(500);
                    hw.stop_tone();
                    hw.set_led(false);
                    hw.render("Warning!\nTemp/Hum\nout of range", 10, 10, 2);
                    hw.delay_ms(1000);
                }
            }
            Err(e) => warn!("climate read failed: {e}"),
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from the menu flow).
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::SetTime(t) => {
                self.clock.set(t);
                info!(
                    "clock set to day {} {:02}:{:02}:{:02}",
                    t.days, t.hours, t.minutes, t.seconds
                );
                sink.emit(&AppEvent::ClockSet(t));
            }
            AppCommand::SetTimeZone { utc_offset_secs } => {
                self.config.utc_offset_secs = utc_offset_secs;
                info!("UTC offset set to {utc_offset_secs}s");
                sink.emit(&AppEvent::TimeZoneChanged { utc_offset_secs });
            }
            AppCommand::ConfigureAlarm { slot, target } => {
                self.alarms.arm(slot, target);
                sink.emit(&AppEvent::AlarmConfigured { slot, target });
            }
            AppCommand::DeleteAlarm { slot } => {
                self.alarms.disarm(slot);
                sink.emit(&AppEvent::AlarmDeleted { slot });
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current wall-clock reading.
    pub fn clock_time(&self) -> ClockTime {
        self.clock.current()
    }

    /// The alarm slots (read-only; mutation goes through commands).
    pub fn alarms(&self) -> &AlarmScheduler {
        &self.alarms
    }

    /// Live configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Total driver ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Advance or re-sync the wall clock, per the configured source.
    fn advance_clock(
        &mut self,
        hw: &mut impl TimeSyncPort,
        now_ms: u64,
        sink: Option<&mut impl EventSink>,
    ) {
        match self.config.time_source {
            TimeSource::FreeRunning => {
                let elapsed = now_ms.saturating_sub(self.last_tick_ms);
                self.last_tick_ms = now_ms;
                self.clock.tick(elapsed);
            }
            TimeSource::Ntp => {
                self.last_tick_ms = now_ms;
                match hw.sync_clock() {
                    Ok(t) => {
                        self.clock.set(t);
                        if self.sync_degraded {
                            info!("time sync recovered");
                            self.sync_degraded = false;
                        }
                    }
                    Err(e) => {
                        if !self.sync_degraded {
                            warn!("time sync failed ({e}); keeping last known time");
                            if let Some(sink) = sink {
                                sink.emit(&AppEvent::SyncFailed);
                            }
                            self.sync_degraded = true;
                        }
                    }
                }
            }
        }
    }

    /// Blocking ring protocol.  Polls buttons, cycles the melody, and
    /// only returns once the user cancels or snoozes.
    fn ring(
        &mut self,
        slot: usize,
        hw: &mut (impl InputPort + AnnunciatorPort + DisplayPort + TimerPort),
        sink: &mut impl EventSink,
    ) {
        let mut banner: String<32> = String::new();
        let _ = write!(banner, " Medicine\n   Time!\nAlarm {}", slot + 1);
        hw.clear();
        hw.render(&banner, 10, 10, 2);
        hw.set_led(true);

        let mut session = RingSession::new();
        let outcome = loop {
            let pressed = hw.read_button();
            if pressed.is_some() {
                hw.delay_ms(self.config.button_debounce_ms);
            }
            match session.step(pressed) {
                RingStep::Play(freq) => {
                    hw.play_tone(freq);
                    hw.delay_ms(self.config.note_duration_ms);
                    hw.stop_tone();
                    hw.delay_ms(self.config.note_gap_ms);
                }
                RingStep::Finished(outcome) => break outcome,
            }
        };

        hw.stop_tone();
        hw.set_led(false);

        let now_ms = hw.now_ms();
        self.alarms
            .ring_handled(slot, outcome, now_ms, self.config.snooze_duration_ms);

        match outcome {
            RingOutcome::Cancel => {
                info!("alarm {slot}: cancelled");
                sink.emit(&AppEvent::AlarmCancelled { slot });
            }
            RingOutcome::Snooze => {
                let until_ms = now_ms + u64::from(self.config.snooze_duration_ms);
                info!("alarm {slot}: snoozed until {until_ms}ms");
                sink.emit(&AppEvent::AlarmSnoozed { slot, until_ms });
                let mut note: String<24> = String::new();
                let _ = write!(note, "Snoozed {} min", self.config.snooze_duration_ms / 60_000);
                hw.render(&note, 10, 10, 2);
                hw.delay_ms(1000);
            }
        }
        hw.clear();
    }

    /// Draw the current time (and date when known) on the display.
    fn render_time(&self, hw: &mut impl DisplayPort) {
        let t = self.clock.current();
        hw.clear();

        let mut line: String<24> = String::new();
        let _ = write!(line, "Time: {:02}:{:02}:{:02}", t.hours, t.minutes, t.seconds);
        hw.render(&line, 10, 0, 2);

        let mut date: String<16> = String::new();
        match t.months {
            Some(m) => {
                let _ = write!(date, "{}:{}", month_abbrev(m), t.days);
            }
            None => {
                let _ = write!(date, "Day {}", t.days);
            }
        }
        hw.render(&date, 10, 40, 2);
    }
}

/// Sink that drops everything — for internal paths that advance the clock
/// without an event consumer.
struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}
