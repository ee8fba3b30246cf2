//! SNTP time sync adapter.
//!
//! Implements [`TimeSyncPort`].  On target, ESP-IDF's SNTP client keeps
//! the newlib system clock disciplined in the background; every
//! `sync_clock` call reads the system clock, applies the UTC offset and
//! converts the epoch to a calendar [`ClockTime`].  Until the first SNTP
//! round-trip completes the adapter reports [`SyncError::NotSynced`] and
//! the domain keeps its last-known time.
//!
//! On host builds the "network time" is a static atomic epoch that tests
//! inject with [`sim_set_epoch`].

use chrono::{Datelike, Timelike};

use crate::app::ports::{SyncError, TimeSyncPort};
use crate::clock::ClockTime;
use crate::config::SystemConfig;
#[cfg(target_os = "espidf")]
use crate::error::Error;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI64, Ordering};

/// Simulated epoch seconds for host builds.  0 = not synced.
#[cfg(not(target_os = "espidf"))]
static SIM_EPOCH_SECS: AtomicI64 = AtomicI64::new(0);

/// Inject the simulated network time (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_epoch(epoch_secs: i64) {
    SIM_EPOCH_SECS.store(epoch_secs, Ordering::Relaxed);
}

/// Convert local-adjusted epoch seconds to a wall-clock reading.
/// `days` carries the day-of-month and `months` is populated.
fn epoch_to_clock_time(local_epoch_secs: i64) -> Option<ClockTime> {
    let dt = chrono::DateTime::<chrono::Utc>::from_timestamp(local_epoch_secs, 0)?;
    let mut time = ClockTime::new(
        dt.day(),
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
    );
    time.months = Some(dt.month() as u8);
    Some(time)
}

/// SNTP-backed [`TimeSyncPort`].
pub struct SntpSync {
    utc_offset_secs: i32,
    #[cfg(target_os = "espidf")]
    sntp: esp_idf_svc::sntp::EspSntp<'static>,
}

impl SntpSync {
    #[cfg(target_os = "espidf")]
    pub fn new(config: &SystemConfig) -> Result<Self, Error> {
        let sntp = esp_idf_svc::sntp::EspSntp::new_default()
            .map_err(|_| Error::Init("SNTP client start failed"))?;
        Ok(Self {
            utc_offset_secs: config.utc_offset_secs,
            sntp,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(config: &SystemConfig) -> Result<Self, crate::error::Error> {
        Ok(Self {
            utc_offset_secs: config.utc_offset_secs,
        })
    }

    #[cfg(target_os = "espidf")]
    fn epoch_now(&self) -> Result<i64, SyncError> {
        use esp_idf_svc::sntp::SyncStatus;
        if self.sntp.get_sync_status() != SyncStatus::Completed {
            return Err(SyncError::NotSynced);
        }
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .map_err(|_| SyncError::NotSynced)
    }

    #[cfg(not(target_os = "espidf"))]
    fn epoch_now(&self) -> Result<i64, SyncError> {
        match SIM_EPOCH_SECS.load(Ordering::Relaxed) {
            0 => Err(SyncError::NotSynced),
            secs => Ok(secs),
        }
    }
}

impl TimeSyncPort for SntpSync {
    fn sync_clock(&mut self) -> Result<ClockTime, SyncError> {
        let epoch = self.epoch_now()?;
        let local = epoch + i64::from(self.utc_offset_secs);
        epoch_to_clock_time(local).ok_or(SyncError::NotSynced)
    }

    fn set_utc_offset(&mut self, offset_secs: i32) {
        self.utc_offset_secs = offset_secs;
    }
}
