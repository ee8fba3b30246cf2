//! Ring-protocol state machine.
//!
//! A [`RingSession`] models one ringing alarm: it starts in `Ringing`,
//! consumes one button read per step, and either asks the caller to play
//! the next melody note or terminates with a [`RingOutcome`].  The only
//! way out is a button press — there is no timeout.
//!
//! The session is pure: the blocking poll-play-delay loop around it lives
//! in [`AppService::ring`](crate::app::service::AppService), which is what
//! actually touches the buzzer, LED and timer ports.

use crate::app::ports::ButtonId;

use super::RingOutcome;

/// The fixed 8-note alarm melody (Hz), looped until a button is pressed.
pub const MELODY: [u16; 8] = [262, 294, 330, 349, 392, 440, 494, 523];

/// Tone used for the climate warning beep — the melody's top note.
pub const WARNING_TONE_HZ: u16 = MELODY[7];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RingState {
    Ringing,
    Stopped(RingOutcome),
}

/// What the caller should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingStep {
    /// Sound this frequency for one note period, then step again.
    Play(u16),
    /// The session is over; apply the outcome and stop all indicators.
    Finished(RingOutcome),
}

/// One ringing alarm, from first note to button press.
pub struct RingSession {
    state: RingState,
    note_idx: usize,
}

impl RingSession {
    pub fn new() -> Self {
        Self {
            state: RingState::Ringing,
            note_idx: 0,
        }
    }

    /// Advance the session with the latest button read.
    ///
    /// Cancel stops the alarm, OK snoozes it, anything else (including no
    /// press) plays the next note of the cyclic melody.  Once stopped, the
    /// session stays stopped and keeps reporting the same outcome.
    pub fn step(&mut self, pressed: Option<ButtonId>) -> RingStep {
        if let RingState::Stopped(outcome) = self.state {
            return RingStep::Finished(outcome);
        }
        match pressed {
            Some(ButtonId::Cancel) => {
                self.state = RingState::Stopped(RingOutcome::Cancel);
                RingStep::Finished(RingOutcome::Cancel)
            }
            Some(ButtonId::Ok) => {
                self.state = RingState::Stopped(RingOutcome::Snooze);
                RingStep::Finished(RingOutcome::Snooze)
            }
            // Up/Down have no meaning while ringing.
            _ => {
                let freq = MELODY[self.note_idx];
                self.note_idx = (self.note_idx + 1) % MELODY.len();
                RingStep::Play(freq)
            }
        }
    }
}
