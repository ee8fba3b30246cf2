//! GPIO / peripheral pin assignments for the Medibox main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Annunciators
// ---------------------------------------------------------------------------

/// Piezo buzzer, driven by an LEDC PWM channel at the note frequency.
pub const BUZZER_GPIO: i32 = 18;
/// Alarm indicator LED (active HIGH).
pub const LED_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Push buttons (momentary, active-low, external pull-up)
// ---------------------------------------------------------------------------

/// Cancel — leaves menus, stops a ringing alarm.
pub const PB_CANCEL_GPIO: i32 = 23;
/// OK — confirms, enters the menu, snoozes a ringing alarm.
pub const PB_OK_GPIO: i32 = 2;
/// Up — increments the field under edit / next menu mode.
pub const PB_UP_GPIO: i32 = 4;
/// Down — decrements the field under edit / previous menu mode.
pub const PB_DOWN_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT22 temperature/humidity sensor — single-wire data pin.
pub const DHT22_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// I²C bus (SSD1306 OLED)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// 7-bit I²C address of the SSD1306 controller.
pub const OLED_I2C_ADDR: u8 = 0x3C;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the buzzer timer.  The tone driver retunes the
/// timer to the note frequency at play time; this is only the idle value.
pub const BUZZER_PWM_FREQ_HZ: u32 = 1_000;
