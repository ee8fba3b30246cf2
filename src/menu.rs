//! Blocking configuration menu.
//!
//! Entered from the driver loop on an OK press.  Up/Down cycle through
//! the modes, OK runs one, Cancel backs out.  Every flow in here is a
//! tight poll-sleep loop over [`InputPort`] — nothing else runs while the
//! menu is open, except the wall clock, which [`wait_for_button`] keeps
//! ticking between polls.
//!
//! Field editors wrap (or clamp, for the UTC offset) inside their valid
//! ranges, so an out-of-range time can never be entered.  An edit is
//! applied as a single [`AppCommand`] only when its last field is
//! confirmed; Cancel anywhere discards the whole edit.

use core::fmt::Write as _;

use heapless::String;
use log::info;

use crate::alarm::AlarmTime;
use crate::app::commands::AppCommand;
use crate::app::ports::{ButtonId, DisplayPort, EventSink, InputPort, TimeSyncPort, TimerPort};
use crate::app::service::AppService;
use crate::clock::ClockTime;
use crate::config::SystemConfig;

const MODE_COUNT: usize = 7;
const MODE_NAMES: [&str; MODE_COUNT] = [
    "1 - Set Time",
    "2 - Set Time Zone",
    "3 - Set Alarm 1",
    "4 - Set Alarm 2",
    "5 - View Alarms",
    "6 - Delete Alarm 1",
    "7 - Delete Alarm 2",
];

/// Menu state: just the mode cursor, retained across visits.
pub struct Menu {
    current_mode: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self { current_mode: 0 }
    }

    /// Run the menu until the user cancels out of the mode list.
    pub fn run(
        &mut self,
        svc: &mut AppService,
        hw: &mut (impl InputPort + DisplayPort + TimerPort + TimeSyncPort),
        sink: &mut impl EventSink,
    ) {
        info!("menu: entered");
        hw.render("Menu", 10, 10, 2);
        hw.delay_ms(1000);

        loop {
            hw.clear();
            hw.render(MODE_NAMES[self.current_mode], 10, 10, 2);

            match wait_for_button(svc, hw) {
                ButtonId::Up => {
                    self.current_mode = (self.current_mode + 1) % MODE_COUNT;
                }
                ButtonId::Down => {
                    self.current_mode = (self.current_mode + MODE_COUNT - 1) % MODE_COUNT;
                }
                ButtonId::Ok => {
                    info!("menu: run mode {}", self.current_mode);
                    run_mode(self.current_mode, svc, hw, sink);
                }
                ButtonId::Cancel => break,
            }
        }
        info!("menu: left");
        hw.clear();
    }
}

fn run_mode(
    mode: usize,
    svc: &mut AppService,
    hw: &mut (impl InputPort + DisplayPort + TimerPort + TimeSyncPort),
    sink: &mut impl EventSink,
) {
    match mode {
        0 => set_time(svc, hw, sink),
        1 => set_time_zone(svc, hw, sink),
        2 | 3 => set_alarm(mode - 2, svc, hw, sink),
        4 => view_alarms(svc, hw),
        5 | 6 => delete_alarm(mode - 5, svc, hw, sink),
        _ => {}
    }
}

// ───────────────────────────────────────────────────────────────
// Blocking input primitives
// ───────────────────────────────────────────────────────────────

/// Poll until a button registers, then debounce and return it.  Keeps the
/// wall clock moving between polls so menu dwell time is not lost.
fn wait_for_button(
    svc: &mut AppService,
    hw: &mut (impl InputPort + TimerPort + TimeSyncPort),
) -> ButtonId {
    let debounce_ms = svc.config().button_debounce_ms;
    let poll_ms = svc.config().button_poll_interval_ms;
    loop {
        if let Some(button) = hw.read_button() {
            hw.delay_ms(debounce_ms);
            return button;
        }
        svc.keep_time(hw);
        hw.delay_ms(poll_ms);
    }
}

/// Edit a numeric field with wrap-around inside `0..modulus`.
/// Returns `None` if the user cancels.
fn edit_field(
    svc: &mut AppService,
    hw: &mut (impl InputPort + DisplayPort + TimerPort + TimeSyncPort),
    label: &str,
    initial: u8,
    modulus: u8,
) -> Option<u8> {
    let mut value = initial % modulus;
    loop {
        let mut text: String<48> = String::new();
        let _ = write!(text, "{label}: {value}");
        hw.clear();
        hw.render(&text, 10, 10, 2);

        match wait_for_button(svc, hw) {
            ButtonId::Up => value = (value + 1) % modulus,
            ButtonId::Down => value = (value + modulus - 1) % modulus,
            ButtonId::Ok => return Some(value),
            ButtonId::Cancel => return None,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Modes
// ───────────────────────────────────────────────────────────────

fn set_time(
    svc: &mut AppService,
    hw: &mut (impl InputPort + DisplayPort + TimerPort + TimeSyncPort),
    sink: &mut impl EventSink,
) {
    let t = svc.clock_time();
    let Some(days) = edit_field(svc, hw, "Enter days", (t.days % 31) as u8, 31) else {
        return;
    };
    let Some(hours) = edit_field(svc, hw, "Enter hour", t.hours, 24) else {
        return;
    };
    let Some(minutes) = edit_field(svc, hw, "Enter minutes", t.minutes, 60) else {
        return;
    };
    let Some(seconds) = edit_field(svc, hw, "Enter seconds", t.seconds, 60) else {
        return;
    };

    let new_time = ClockTime::new(u32::from(days), hours, minutes, seconds);
    svc.handle_command(AppCommand::SetTime(new_time), sink);

    let mut text: String<40> = String::new();
    let _ = write!(
        text,
        "Time set to:\n{}:{:02}:{:02}:{:02}",
        days, hours, minutes, seconds
    );
    hw.render(&text, 10, 10, 2);
    hw.delay_ms(1000);
}

fn set_time_zone(
    svc: &mut AppService,
    hw: &mut (impl InputPort + DisplayPort + TimerPort + TimeSyncPort),
    sink: &mut impl EventSink,
) {
    let mut offset_hours = svc.config().utc_offset_secs / 3600;
    loop {
        let mut text: String<32> = String::new();
        let _ = write!(text, "UTC Offset:\n{offset_hours}h");
        hw.clear();
        hw.render(&text, 0, 10, 2);

        match wait_for_button(svc, hw) {
            ButtonId::Up => {
                offset_hours = (offset_hours + 1).min(SystemConfig::UTC_OFFSET_MAX_HOURS);
            }
            ButtonId::Down => {
                offset_hours = (offset_hours - 1).max(SystemConfig::UTC_OFFSET_MIN_HOURS);
            }
            ButtonId::Ok => {
                let utc_offset_secs = offset_hours * 3600;
                hw.set_utc_offset(utc_offset_secs);
                svc.handle_command(AppCommand::SetTimeZone { utc_offset_secs }, sink);
                hw.render("Time Zone Set", 10, 10, 2);
                hw.delay_ms(1000);
                return;
            }
            ButtonId::Cancel => return,
        }
    }
}

fn set_alarm(
    slot: usize,
    svc: &mut AppService,
    hw: &mut (impl InputPort + DisplayPort + TimerPort + TimeSyncPort),
    sink: &mut impl EventSink,
) {
    let initial = svc.alarms().slot(slot).target();
    let Some(hours) = edit_field(svc, hw, "Enter hour", initial.hours, 24) else {
        return;
    };
    let Some(minutes) = edit_field(svc, hw, "Enter minutes", initial.minutes, 60) else {
        return;
    };
    let Some(seconds) = edit_field(svc, hw, "Enter seconds", initial.seconds, 60) else {
        return;
    };

    let target = AlarmTime::new(hours, minutes, seconds);
    svc.handle_command(AppCommand::ConfigureAlarm { slot, target }, sink);

    let mut text: String<24> = String::new();
    let _ = write!(text, "Alarm {} Set", slot + 1);
    hw.render(&text, 10, 10, 2);
    hw.delay_ms(1000);
}

fn view_alarms(svc: &AppService, hw: &mut (impl DisplayPort + TimerPort)) {
    hw.clear();
    for (i, slot) in svc.alarms().slots().iter().enumerate() {
        if !slot.armed() {
            continue;
        }
        let t = slot.target();
        let mut text: String<24> = String::new();
        let _ = write!(
            text,
            "A{}: {:02}:{:02}:{:02}",
            i + 1,
            t.hours,
            t.minutes,
            t.seconds
        );
        hw.render(&text, 0, (i as i32) * 30, 2);
    }
    hw.delay_ms(3000);
}

fn delete_alarm(
    slot: usize,
    svc: &mut AppService,
    hw: &mut (impl DisplayPort + TimerPort),
    sink: &mut impl EventSink,
) {
    svc.handle_command(AppCommand::DeleteAlarm { slot }, sink);
    let mut text: String<24> = String::new();
    let _ = write!(text, "Alarm {}\nDeleted", slot + 1);
    hw.render(&text, 10, 10, 2);
    hw.delay_ms(1000);
}
