//! DHT22 temperature/humidity sensor (single-wire, bit-banged).
//!
//! The host pulls the data line low for >1 ms to request a reading; the
//! sensor answers with an 80 µs/80 µs preamble and then 40 data bits,
//! each a ~50 µs low followed by a high whose length encodes the bit
//! (~27 µs = 0, ~70 µs = 1).  Payload: humidity ×10 (16 bit), signed
//! temperature ×10 (16 bit), byte-sum checksum.
//!
//! The sensor needs ~2 s between reads; pacing is the caller's job (the
//! service samples on its climate interval).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the data GPIO via hw_init with µs busy-waits.
//! On host/test: reads a pair of static atomics for injection.

use core::sync::atomic::{AtomicI32, AtomicU32};
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use crate::app::ports::SensorError;
use crate::climate::ClimateReading;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Simulated climate for host builds, in milli-units to stay atomic.
static SIM_TEMP_MILLI_C: AtomicI32 = AtomicI32::new(25_000);
static SIM_HUMIDITY_MILLI_PCT: AtomicU32 = AtomicU32::new(70_000);

/// Inject a simulated reading (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_MILLI_C.store((temperature_c * 1000.0) as i32, Ordering::Relaxed);
    SIM_HUMIDITY_MILLI_PCT.store((humidity_pct * 1000.0) as u32, Ordering::Relaxed);
}

pub struct Dht22 {
    gpio: i32,
}

impl Dht22 {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Data GPIO this sensor is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let raw = self.read_raw()?;

        let checksum = raw[0]
            .wrapping_add(raw[1])
            .wrapping_add(raw[2])
            .wrapping_add(raw[3]);
        if checksum != raw[4] {
            return Err(SensorError::BadChecksum);
        }

        let humidity_x10 = u16::from_be_bytes([raw[0], raw[1]]);
        let temp_raw = u16::from_be_bytes([raw[2], raw[3]]);
        // Bit 15 is the sign flag, not two's complement.
        let temp_x10 = if temp_raw & 0x8000 != 0 {
            -i32::from(temp_raw & 0x7FFF)
        } else {
            i32::from(temp_raw)
        };

        let reading = ClimateReading {
            temperature_c: temp_x10 as f32 / 10.0,
            humidity_pct: f32::from(humidity_x10) / 10.0,
        };
        if !(-40.0..=80.0).contains(&reading.temperature_c)
            || !(0.0..=100.0).contains(&reading.humidity_pct)
        {
            return Err(SensorError::OutOfRange);
        }
        Ok(reading)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        Ok(ClimateReading {
            temperature_c: SIM_TEMP_MILLI_C.load(Ordering::Relaxed) as f32 / 1000.0,
            humidity_pct: SIM_HUMIDITY_MILLI_PCT.load(Ordering::Relaxed) as f32 / 1000.0,
        })
    }

    // ── Internal (target only) ────────────────────────────────

    /// Clock in the 5 raw payload bytes.
    #[cfg(target_os = "espidf")]
    fn read_raw(&self) -> Result<[u8; 5], SensorError> {
        // Start signal: drive low >1 ms, release, switch to input.
        hw_init::gpio_direction(self.gpio, true);
        hw_init::gpio_write(self.gpio, false);
        hw_init::delay_us(1_500);
        hw_init::gpio_write(self.gpio, true);
        hw_init::delay_us(30);
        hw_init::gpio_direction(self.gpio, false);

        // Preamble: sensor drives ~80 µs low then ~80 µs high.
        self.wait_level(false, 100)?;
        self.wait_level(true, 100)?;
        self.wait_level(false, 100)?;

        let mut bytes = [0u8; 5];
        for bit in 0..40 {
            // ~50 µs low separator, then the data-length high pulse.
            self.wait_level(true, 80)?;
            let high_us = self.wait_level(false, 100)?;
            if high_us > 40 {
                bytes[bit / 8] |= 1 << (7 - (bit % 8));
            }
        }
        Ok(bytes)
    }

    /// Busy-wait until the line reaches `level`; returns the µs spent
    /// waiting, or `NoResponse` after `timeout_us`.
    #[cfg(target_os = "espidf")]
    fn wait_level(&self, level: bool, timeout_us: u32) -> Result<u32, SensorError> {
        let mut waited = 0u32;
        while hw_init::gpio_read(self.gpio) != level {
            if waited >= timeout_us {
                return Err(SensorError::NoResponse);
            }
            hw_init::delay_us(1);
            waited += 1;
        }
        Ok(waited)
    }
}
