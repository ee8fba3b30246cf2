//! Integration tests for the full clock → scheduler → ring pipeline.
//!
//! These drive `AppService` through whole driver-loop scenarios against
//! the mock adapters: free-running seconds, alarm fire/cancel/snooze
//! lifecycles, degraded time sync, and the climate warning path.

use crate::mock_hw::{MockHardware, RecordingSink};

use medibox::alarm::ring::{MELODY, WARNING_TONE_HZ};
use medibox::alarm::AlarmTime;
use medibox::app::commands::AppCommand;
use medibox::app::events::AppEvent;
use medibox::app::ports::{ButtonId, SensorError};
use medibox::app::service::AppService;
use medibox::climate::ClimateReading;
use medibox::clock::ClockTime;
use medibox::config::{SystemConfig, TimeSource};

fn free_running_app() -> (AppService, MockHardware, RecordingSink) {
    let mut config = SystemConfig::default();
    config.time_source = TimeSource::FreeRunning;
    let app = AppService::new(config);
    (app, MockHardware::new(), RecordingSink::new())
}

/// One driver tick preceded by a just-over-one-second monotonic step.
fn tick_one_second(app: &mut AppService, hw: &mut MockHardware, sink: &mut RecordingSink) {
    hw.advance(1001);
    app.tick(hw, sink);
}

// ── Default alarm fires at 00:00:05 and Cancel disarms ───────

#[test]
fn boot_alarm_fires_once_and_cancel_disarms() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);

    for _ in 0..4 {
        tick_one_second(&mut app, &mut hw, &mut sink);
    }
    assert_eq!(app.clock_time().hms(), (0, 0, 4));
    assert_eq!(sink.count_fired(0), 0, "must not fire before 00:00:05");

    // The tick that lands on 00:00:05 rings; the user cancels at once.
    hw.press(ButtonId::Cancel);
    tick_one_second(&mut app, &mut hw, &mut sink);

    assert_eq!(app.clock_time().hms(), (0, 0, 5));
    assert_eq!(sink.count_fired(0), 1);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::AlarmCancelled { slot: 0 })));
    assert!(hw.rendered("Medicine"));
    assert!(!hw.led_is_on(), "LED must be off after the ring ends");

    // Cancel disarmed slot 0; slot 1 boots disarmed, so the global
    // enable flag must now be false.
    assert!(!app.alarms().slot(0).armed());
    assert!(!app.alarms().enabled());
}

// ── Ring loops the melody until a button arrives ─────────────

#[test]
fn ring_cycles_melody_until_cancel() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.handle_command(
        AppCommand::ConfigureAlarm {
            slot: 0,
            target: AlarmTime::new(0, 0, 1),
        },
        &mut sink,
    );
    app.start(&hw, &mut sink);

    // Ten empty polls before the user reacts: ten notes, wrapping past
    // the end of the 8-note melody.
    hw.idle(10);
    hw.press(ButtonId::Cancel);
    tick_one_second(&mut app, &mut hw, &mut sink);

    let expected: Vec<u16> = (0..10).map(|i| MELODY[i % MELODY.len()]).collect();
    assert_eq!(hw.tones_played(), expected);
}

// ── Snooze lifecycle ─────────────────────────────────────────

#[test]
fn snooze_suppresses_then_releases_at_deadline() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.handle_command(
        AppCommand::ConfigureAlarm {
            slot: 0,
            target: AlarmTime::new(0, 0, 3),
        },
        &mut sink,
    );
    app.start(&hw, &mut sink);

    // One note plays, then OK snoozes.
    hw.idle(1);
    hw.press(ButtonId::Ok);
    for _ in 0..3 {
        tick_one_second(&mut app, &mut hw, &mut sink);
    }

    assert_eq!(sink.count_fired(0), 1);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::AlarmSnoozed { slot: 0, .. })));
    assert!(hw.rendered("Snoozed 5 min"));

    let slot = app.alarms().slot(0);
    assert!(slot.armed() && slot.is_snoozed());
    let deadline = slot.snooze_deadline_ms().expect("snoozed slot has deadline");
    assert_eq!(
        deadline,
        hw.now_ms - 1000 + 300_000,
        "deadline = snooze instant + 5 min (the 1 s confirmation splash \
         ran after the snooze was recorded)"
    );

    // Just before the deadline: still suppressed.
    hw.now_ms = deadline - 1;
    app.tick(&mut hw, &mut sink);
    assert!(app.alarms().slot(0).is_snoozed());
    assert_eq!(sink.count_fired(0), 1);

    // At the deadline the clock has long moved past 00:00:03, so the
    // slot returns to normal armed polling without re-firing.
    hw.now_ms = deadline;
    app.tick(&mut hw, &mut sink);
    let slot = app.alarms().slot(0);
    assert!(!slot.is_snoozed());
    assert!(slot.armed());
    assert_eq!(sink.count_fired(0), 1);
}

// ── Two slots matching the same second ring back-to-back ─────

#[test]
fn simultaneous_slots_ring_sequentially() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.handle_command(
        AppCommand::ConfigureAlarm {
            slot: 0,
            target: AlarmTime::new(0, 0, 1),
        },
        &mut sink,
    );
    app.handle_command(
        AppCommand::ConfigureAlarm {
            slot: 1,
            target: AlarmTime::new(0, 0, 1),
        },
        &mut sink,
    );
    app.start(&hw, &mut sink);

    hw.press(ButtonId::Cancel); // ends ring of slot 0
    hw.press(ButtonId::Cancel); // ends ring of slot 1
    tick_one_second(&mut app, &mut hw, &mut sink);

    assert_eq!(sink.count_fired(0), 1);
    assert_eq!(sink.count_fired(1), 1);
    assert!(!app.alarms().enabled());
}

// ── Synced clock: wholesale replacement and degraded mode ────

#[test]
fn synced_mode_replaces_clock_and_tolerates_outage() {
    let app_config = SystemConfig::default(); // Ntp source
    let mut app = AppService::new(app_config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    let mut synced = ClockTime::new(14, 8, 30, 0);
    synced.months = Some(3);
    hw.synced_time = Some(synced);

    app.start(&hw, &mut sink);
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.clock_time(), synced);

    // Outage: the last-known time is retained, and the failure event is
    // raised once, not once per tick.
    hw.synced_time = None;
    for _ in 0..3 {
        hw.advance(1000);
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(app.clock_time(), synced);
    let failures = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::SyncFailed))
        .count();
    assert_eq!(failures, 1);

    // Recovery: next good reading replaces the clock wholesale.
    let mut later = ClockTime::new(14, 8, 35, 10);
    later.months = Some(3);
    hw.synced_time = Some(later);
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.clock_time(), later);
}

// ── Climate supervision ──────────────────────────────────────

#[test]
fn climate_in_range_renders_without_warning() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);

    app.check_climate(&mut hw, &mut sink);
    assert!(hw.rendered("Temp:"));
    assert!(hw.tones_played().is_empty());
    assert!(!sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ClimateWarning { .. })));
}

#[test]
fn climate_out_of_range_beeps_and_warns() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    hw.climate = Ok(ClimateReading {
        temperature_c: 35.0,
        humidity_pct: 70.0,
    });

    app.check_climate(&mut hw, &mut sink);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ClimateWarning { .. })));
    assert_eq!(hw.tones_played(), vec![WARNING_TONE_HZ]);
    assert!(hw.rendered("Warning!"));
}

#[test]
fn climate_respects_sample_interval() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);

    app.check_climate(&mut hw, &mut sink);
    let renders_after_first = hw.calls.len();

    // Immediately again: interval not elapsed, nothing happens.
    app.check_climate(&mut hw, &mut sink);
    assert_eq!(hw.calls.len(), renders_after_first);

    hw.advance(u64::from(app.config().climate_sample_interval_ms));
    app.check_climate(&mut hw, &mut sink);
    assert!(hw.calls.len() > renders_after_first);
}

#[test]
fn climate_sensor_failure_is_nonfatal() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    hw.climate = Err(SensorError::NoResponse);

    app.check_climate(&mut hw, &mut sink);
    assert!(hw.tones_played().is_empty());
    assert!(sink.events.iter().all(|e| matches!(e, AppEvent::Started)));
}
