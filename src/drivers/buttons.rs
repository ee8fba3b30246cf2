//! Four-button pad (Cancel / OK / Up / Down).
//!
//! Momentary switches, active-low with pull-ups.  The pad is *polled* —
//! blocking wait loops in the domain call [`ButtonPad::poll`] at a fixed
//! interval and debounce by delaying after a hit, matching the
//! single-threaded execution model.  Priority on simultaneous presses is
//! Cancel, OK, Up, Down.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO levels configured by hw_init.
//! On host/test: reads a static atomic for injection.

use core::sync::atomic::AtomicU8;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use crate::app::ports::ButtonId;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

/// Simulated pressed button: 0 = none, 1..=4 = Cancel/Ok/Up/Down.
static SIM_PRESSED: AtomicU8 = AtomicU8::new(0);

/// Inject a simulated press (host builds only).  Stays "held" until
/// [`sim_release`] is called.
#[cfg(not(target_os = "espidf"))]
pub fn sim_press(button: ButtonId) {
    let raw = match button {
        ButtonId::Cancel => 1,
        ButtonId::Ok => 2,
        ButtonId::Up => 3,
        ButtonId::Down => 4,
    };
    SIM_PRESSED.store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_release() {
    SIM_PRESSED.store(0, Ordering::Relaxed);
}

pub struct ButtonPad;

impl ButtonPad {
    pub fn new() -> Self {
        Self
    }

    /// One poll of all four buttons.  `None` when nothing is pressed.
    #[cfg(target_os = "espidf")]
    pub fn poll(&self) -> Option<ButtonId> {
        // Active-low: a pressed button reads 0.
        if !hw_init::gpio_read(pins::PB_CANCEL_GPIO) {
            return Some(ButtonId::Cancel);
        }
        if !hw_init::gpio_read(pins::PB_OK_GPIO) {
            return Some(ButtonId::Ok);
        }
        if !hw_init::gpio_read(pins::PB_UP_GPIO) {
            return Some(ButtonId::Up);
        }
        if !hw_init::gpio_read(pins::PB_DOWN_GPIO) {
            return Some(ButtonId::Down);
        }
        None
    }

    /// One poll of all four buttons.  `None` when nothing is pressed.
    #[cfg(not(target_os = "espidf"))]
    pub fn poll(&self) -> Option<ButtonId> {
        match SIM_PRESSED.load(Ordering::Relaxed) {
            1 => Some(ButtonId::Cancel),
            2 => Some(ButtonId::Ok),
            3 => Some(ButtonId::Up),
            4 => Some(ButtonId::Down),
            _ => None,
        }
    }
}
