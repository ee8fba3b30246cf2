//! Wall-clock time keeping.
//!
//! [`ClockTime`] is the normalized wall-clock value (no field ever leaves
//! its range; overflow carries seconds→minutes→hours→days).  [`Clock`]
//! owns exactly one `ClockTime` and advances it from one of two sources:
//!
//! - **Free-running**: [`Clock::tick`] accumulates elapsed monotonic
//!   milliseconds and advances by exactly one second each time the
//!   accumulator crosses 1000 ms.  The remainder is dropped, so ticks
//!   delayed past 2000 ms lose time.  That drift is the documented
//!   behavior of this clock, not a bug to fix.
//! - **Synced**: the owner replaces the whole value via [`Clock::set`]
//!   whenever the external time source produces a fresh reading.

// ---------------------------------------------------------------------------
// ClockTime
// ---------------------------------------------------------------------------

/// A normalized wall-clock reading.
///
/// `days` is a running day counter in free-running mode and the
/// day-of-month after a sync; `months` is only populated by a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub days: u32,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    /// Calendar month (1–12), known only after an external sync.
    pub months: Option<u8>,
}

impl ClockTime {
    /// Midnight, day zero — the free-running boot value.
    pub const fn zero() -> Self {
        Self {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            months: None,
        }
    }

    pub fn new(days: u32, hours: u8, minutes: u8, seconds: u8) -> Self {
        debug_assert!(hours <= 23 && minutes <= 59 && seconds <= 59);
        Self {
            days,
            hours,
            minutes,
            seconds,
            months: None,
        }
    }

    /// The `(hours, minutes, seconds)` tuple the alarm matcher compares.
    pub fn hms(&self) -> (u8, u8, u8) {
        (self.hours, self.minutes, self.seconds)
    }

    /// Advance by one second, carrying 60/60/24.  No month or year carry.
    pub fn advance_second(&mut self) {
        self.seconds += 1;
        if self.seconds > 59 {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes > 59 {
                self.minutes = 0;
                self.hours += 1;
                if self.hours > 23 {
                    self.hours = 0;
                    self.days += 1;
                }
            }
        }
    }
}

/// Three-letter month abbreviation for display, or `"---"` out of range.
pub fn month_abbrev(month: u8) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "---",
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Owner of the current wall-clock time.
pub struct Clock {
    time: ClockTime,
    /// Elapsed monotonic time accumulated since the last advance.
    acc_ms: u64,
}

impl Clock {
    pub fn new(initial: ClockTime) -> Self {
        Self {
            time: initial,
            acc_ms: 0,
        }
    }

    /// Current wall-clock reading (pure read).
    pub fn current(&self) -> ClockTime {
        self.time
    }

    /// Free-running advance.  Accumulates `elapsed_ms`; once the
    /// accumulator exceeds 1000 ms the clock moves forward one second and
    /// the accumulator resets to zero.  Returns `true` if it advanced.
    ///
    /// A no-op while less than a full tick period has accumulated, so the
    /// driver may call this as often as it likes.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        self.acc_ms += elapsed_ms;
        if self.acc_ms > 1000 {
            // Remainder deliberately dropped: one advance per crossing.
            self.acc_ms = 0;
            self.time.advance_second();
            true
        } else {
            false
        }
    }

    /// Wholesale replacement — external sync or the manual set-time flow.
    pub fn set(&mut self, time: ClockTime) {
        self.time = time;
        self.acc_ms = 0;
    }
}
