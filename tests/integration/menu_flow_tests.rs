//! Integration tests for the blocking menu flows.
//!
//! Button sequences are scripted into the mock pad exactly as a user
//! would press them: Up/Down to navigate, OK to confirm, Cancel to back
//! out.  Every flow must end by leaving the menu, or the mock's read
//! guard trips.

use crate::mock_hw::{MockHardware, RecordingSink};

use medibox::alarm::AlarmTime;
use medibox::app::events::AppEvent;
use medibox::app::ports::ButtonId::{Cancel, Down, Ok as OkBtn, Up};
use medibox::app::service::AppService;
use medibox::config::{SystemConfig, TimeSource};
use medibox::menu::Menu;

fn free_running_app() -> (AppService, MockHardware, RecordingSink) {
    let mut config = SystemConfig::default();
    config.time_source = TimeSource::FreeRunning;
    let app = AppService::new(config);
    (app, MockHardware::new(), RecordingSink::new())
}

// ── Configure alarm 2 to 01:30:00 via Up/Down/OK ─────────────

#[test]
fn set_alarm_2_to_01_30_00() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    let mut menu = Menu::new();

    // Navigate: mode 0 → 3 ("Set Alarm 2"), run it.
    hw.script(&[Up, Up, Up, OkBtn]);
    // Hours: 0 → 1.
    hw.script(&[Up, OkBtn]);
    // Minutes: 0 → 30.
    for _ in 0..30 {
        hw.press(Up);
    }
    hw.press(OkBtn);
    // Seconds: accept 0, then leave the menu.
    hw.script(&[OkBtn, Cancel]);

    menu.run(&mut app, &mut hw, &mut sink);

    let slot = app.alarms().slot(1);
    assert_eq!(slot.target(), AlarmTime::new(1, 30, 0));
    assert!(slot.armed());
    assert!(app.alarms().enabled());
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::AlarmConfigured { slot: 1, .. })));
    assert!(hw.rendered("Alarm 2 Set"));
}

// ── Cancel mid-edit discards the whole edit ──────────────────

#[test]
fn cancel_mid_flow_leaves_slot_untouched() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    let mut menu = Menu::new();

    // Into "Set Alarm 1", accept hour 1, then cancel at minutes.
    hw.script(&[Up, Up, OkBtn, Up, OkBtn, Cancel, Cancel]);
    menu.run(&mut app, &mut hw, &mut sink);

    // Boot default survives: the half-finished edit was discarded.
    let slot = app.alarms().slot(0);
    assert_eq!(slot.target(), AlarmTime::new(0, 0, 5));
    assert!(slot.armed());
    assert!(!sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::AlarmConfigured { .. })));
}

// ── Delete alarm 1 (Down wraps backwards through the modes) ──

#[test]
fn delete_alarm_1_clears_global_enable() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    let mut menu = Menu::new();

    hw.script(&[Down, Down, OkBtn, Cancel]);
    menu.run(&mut app, &mut hw, &mut sink);

    assert!(!app.alarms().slot(0).armed());
    assert!(!app.alarms().enabled(), "no slot armed => global enable off");
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::AlarmDeleted { slot: 0 })));
    assert!(hw.rendered("Deleted"));
}

// ── Manual time set ──────────────────────────────────────────

#[test]
fn set_time_overrides_running_clock() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    let mut menu = Menu::new();

    // Mode 0 (Set Time): days → 1, hours → 2, minutes 0, seconds 0.
    hw.script(&[OkBtn, Up, OkBtn, Up, Up, OkBtn, OkBtn, OkBtn, Cancel]);
    menu.run(&mut app, &mut hw, &mut sink);

    let t = app.clock_time();
    assert_eq!((t.days, t.hours, t.minutes, t.seconds), (1, 2, 0, 0));
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::ClockSet(_))));
    assert!(hw.rendered("Time set to:"));
}

// ── Time zone editor clamps at the real-world extremes ───────

#[test]
fn time_zone_applies_offset_to_sync_port() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    let mut menu = Menu::new();

    hw.script(&[Up, OkBtn, Up, Up, Up, OkBtn, Cancel]);
    menu.run(&mut app, &mut hw, &mut sink);

    assert_eq!(app.config().utc_offset_secs, 3 * 3600);
    assert_eq!(hw.utc_offset_secs, 3 * 3600);
    assert!(hw.rendered("Time Zone Set"));
}

#[test]
fn time_zone_clamps_at_plus_14() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    let mut menu = Menu::new();

    hw.script(&[Up, OkBtn]);
    for _ in 0..20 {
        hw.press(Up);
    }
    hw.script(&[OkBtn, Cancel]);
    menu.run(&mut app, &mut hw, &mut sink);

    assert_eq!(app.config().utc_offset_secs, 14 * 3600);
}

// ── Editors wrap inside their valid ranges ───────────────────

#[test]
fn hour_editor_wraps_downwards() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    let mut menu = Menu::new();

    // Set Alarm 1: hour Down from 0 wraps to 23.
    hw.script(&[Up, Up, OkBtn, Down, OkBtn, OkBtn, OkBtn, Cancel]);
    menu.run(&mut app, &mut hw, &mut sink);

    assert_eq!(app.alarms().slot(0).target(), AlarmTime::new(23, 0, 5));
}

// ── View mode shows armed slots only ─────────────────────────

#[test]
fn view_alarms_lists_armed_slots() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    let mut menu = Menu::new();

    // Mode 4 is "View Alarms".
    hw.script(&[Up, Up, Up, Up, OkBtn, Cancel]);
    menu.run(&mut app, &mut hw, &mut sink);

    assert!(hw.rendered("A1: 00:00:05"));
    assert!(!hw.rendered("A2:"), "disarmed slot must not be listed");
}

// ── The clock keeps running while the menu waits for input ───

#[test]
fn menu_wait_keeps_clock_ticking() {
    let (mut app, mut hw, mut sink) = free_running_app();
    app.start(&hw, &mut sink);
    let mut menu = Menu::new();

    assert_eq!(app.clock_time().hms(), (0, 0, 0));
    // 25 empty polls at 50 ms each (plus the 1 s menu splash) pass well
    // over a second of simulated time before Cancel leaves the menu.
    hw.idle(25);
    hw.press(Cancel);
    menu.run(&mut app, &mut hw, &mut sink);

    assert!(app.clock_time().seconds >= 1, "menu dwell time was lost");
}
