//! Wi-Fi station bring-up (target only).
//!
//! The Medibox only needs the network long enough for SNTP to discipline
//! the system clock, so this adapter is deliberately thin: blocking
//! connect at boot, a connectivity query, nothing else.  Connection
//! management beyond that (roaming, backoff, re-provisioning) is out of
//! scope.  A failed connect is non-fatal — the device runs unsynced.

#![cfg(target_os = "espidf")]

use anyhow::{Context, Result};
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::info;

pub struct WifiAdapter {
    wifi: BlockingWifi<EspWifi<'static>>,
}

impl WifiAdapter {
    pub fn new(modem: Modem, sysloop: EspSystemEventLoop) -> Result<Self> {
        let wifi = EspWifi::new(modem, sysloop.clone(), None).context("WiFi driver init")?;
        let wifi = BlockingWifi::wrap(wifi, sysloop).context("WiFi blocking wrapper")?;
        Ok(Self { wifi })
    }

    /// Blocking station connect.  An empty password selects an open AP.
    pub fn connect(&mut self, ssid: &str, password: &str) -> Result<()> {
        let auth_method = if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: ssid.try_into().map_err(|_| anyhow::anyhow!("SSID too long"))?,
            password: password
                .try_into()
                .map_err(|_| anyhow::anyhow!("password too long"))?,
            auth_method,
            ..Default::default()
        });
        self.wifi.set_configuration(&config)?;
        self.wifi.start()?;
        info!("wifi: connecting to '{ssid}'");
        self.wifi.connect()?;
        self.wifi.wait_netif_up()?;
        info!("wifi: connected, netif up");
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }
}
