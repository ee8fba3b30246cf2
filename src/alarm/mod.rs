//! Alarm scheduling engine.
//!
//! Owns a fixed array of alarm slots and matches them against the wall
//! clock on every scheduler check.  Matching is **edge-triggered**: each
//! slot records the last `(hours, minutes, seconds)` tuple it was checked
//! against and fires only when the match is newly true, so a slot fires
//! exactly once per distinct matching second no matter how often the
//! driver loop polls within that second.
//!
//! ```text
//!  armed ──[target == now, newly]──▶ ringing ──[Cancel]──▶ disarmed
//!    ▲                                  │
//!    │                               [Snooze]
//!    │                                  ▼
//!    └──[deadline passed, no match]── snoozed ──[deadline passed,
//!                                                 target == now]──▶ ringing
//! ```
//!
//! The blocking ring protocol itself lives in [`ring`]; this module only
//! decides *when* a slot fires and applies the outcome afterwards.

pub mod ring;

use heapless::Vec;
use log::info;

use crate::clock::ClockTime;

/// Number of configurable alarm slots.
pub const MAX_ALARMS: usize = 2;

// ---------------------------------------------------------------------------
// Alarm target & slot
// ---------------------------------------------------------------------------

/// A second-granularity time-of-day target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl AlarmTime {
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        debug_assert!(hours <= 23 && minutes <= 59 && seconds <= 59);
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    fn as_tuple(self) -> (u8, u8, u8) {
        (self.hours, self.minutes, self.seconds)
    }
}

/// One configurable alarm.
///
/// Invariant: `snoozed` implies `snooze_deadline_ms.is_some()` and `armed`.
/// Slots are never destroyed, only reset to disarmed.
#[derive(Debug, Clone, Copy)]
pub struct AlarmSlot {
    armed: bool,
    target: AlarmTime,
    snoozed: bool,
    snooze_deadline_ms: Option<u64>,
    /// Last `(h, m, s)` this slot was checked against — the edge guard.
    last_checked: Option<(u8, u8, u8)>,
}

impl AlarmSlot {
    const fn disarmed() -> Self {
        Self {
            armed: false,
            target: AlarmTime {
                hours: 0,
                minutes: 0,
                seconds: 0,
            },
            snoozed: false,
            snooze_deadline_ms: None,
            last_checked: None,
        }
    }

    pub fn armed(&self) -> bool {
        self.armed
    }

    pub fn target(&self) -> AlarmTime {
        self.target
    }

    pub fn is_snoozed(&self) -> bool {
        self.snoozed
    }

    pub fn snooze_deadline_ms(&self) -> Option<u64> {
        self.snooze_deadline_ms
    }
}

// ---------------------------------------------------------------------------
// Events & outcomes
// ---------------------------------------------------------------------------

/// What a scheduler check reported for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    /// The slot's target time-of-day matched the clock this check.
    Fire,
}

/// How the user ended a ring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingOutcome {
    /// Cancel button: disarm the slot.
    Cancel,
    /// OK button: suppress the slot for the snooze window, stay armed.
    Snooze,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Fixed-capacity alarm scheduler.
pub struct AlarmScheduler {
    slots: [AlarmSlot; MAX_ALARMS],
    /// Derived OR of all `armed` flags; gates `check` entirely.
    enabled: bool,
}

impl AlarmScheduler {
    /// Boot defaults: slot 0 armed at 00:00:05, slot 1 disarmed.
    pub fn new() -> Self {
        let mut slots = [AlarmSlot::disarmed(); MAX_ALARMS];
        slots[0].armed = true;
        slots[0].target = AlarmTime::new(0, 0, 5);
        let mut sched = Self {
            slots,
            enabled: false,
        };
        sched.recompute_enabled();
        sched
    }

    /// Whether any slot is armed (the global alarm enable flag).
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn slot(&self, index: usize) -> &AlarmSlot {
        &self.slots[index]
    }

    pub fn slots(&self) -> &[AlarmSlot; MAX_ALARMS] {
        &self.slots
    }

    /// Evaluate every slot against `now`.
    ///
    /// `monotonic_ms` is the monotonic timestamp of this check, used for
    /// snooze-deadline comparison only — wall-clock matching uses `now`.
    ///
    /// A fired slot stays armed; the caller runs the ring protocol and
    /// reports the outcome through [`ring_handled`](Self::ring_handled).
    pub fn check(&mut self, now: ClockTime, monotonic_ms: u64) -> Vec<(usize, MatchEvent), MAX_ALARMS> {
        let mut fired = Vec::new();
        if !self.enabled {
            return fired;
        }

        let hms = now.hms();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if !slot.armed {
                continue;
            }

            if slot.snoozed {
                // Invariant: a snoozed slot always carries a deadline.
                let deadline = slot.snooze_deadline_ms.unwrap_or(0);
                if monotonic_ms >= deadline {
                    slot.snoozed = false;
                    slot.snooze_deadline_ms = None;
                    info!("alarm {i}: snooze window elapsed");
                    if slot.target.as_tuple() == hms {
                        slot.last_checked = Some(hms);
                        // Capacity equals slot count; push cannot fail.
                        let _ = fired.push((i, MatchEvent::Fire));
                        continue;
                    }
                    // No match at expiry: back to normal armed polling.
                }
                slot.last_checked = Some(hms);
                continue;
            }

            let matches = slot.target.as_tuple() == hms;
            let newly = matches && slot.last_checked != Some(hms);
            slot.last_checked = Some(hms);
            if newly {
                let _ = fired.push((i, MatchEvent::Fire));
            }
        }
        fired
    }

    /// Set a slot's target and arm it.  Clears any snooze state and the
    /// edge guard, so a slot armed during its matching second fires on
    /// the next check.
    pub fn arm(&mut self, index: usize, target: AlarmTime) {
        let slot = &mut self.slots[index];
        slot.target = target;
        slot.armed = true;
        slot.snoozed = false;
        slot.snooze_deadline_ms = None;
        slot.last_checked = None;
        self.recompute_enabled();
        info!(
            "alarm {index}: armed for {:02}:{:02}:{:02}",
            target.hours, target.minutes, target.seconds
        );
    }

    /// Disarm a slot, clearing snooze state.  The target is retained for
    /// the next edit session.
    pub fn disarm(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.armed = false;
        slot.snoozed = false;
        slot.snooze_deadline_ms = None;
        self.recompute_enabled();
        info!("alarm {index}: disarmed");
    }

    /// Apply the outcome of a completed ring session.
    pub fn ring_handled(
        &mut self,
        index: usize,
        outcome: RingOutcome,
        monotonic_ms: u64,
        snooze_duration_ms: u32,
    ) {
        match outcome {
            RingOutcome::Cancel => self.disarm(index),
            RingOutcome::Snooze => {
                let slot = &mut self.slots[index];
                slot.snoozed = true;
                slot.snooze_deadline_ms = Some(monotonic_ms + u64::from(snooze_duration_ms));
                info!(
                    "alarm {index}: snoozed until t+{}ms",
                    snooze_duration_ms
                );
            }
        }
        self.recompute_enabled();
    }

    fn recompute_enabled(&mut self) {
        self.enabled = self.slots.iter().any(|s| s.armed);
    }
}
