//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to                   |
//! |------------|------------------|-------------------------------|
//! | `hardware` | InputPort        | Button pad GPIOs              |
//! |            | AnnunciatorPort  | Buzzer LEDC + LED GPIO        |
//! |            | DisplayPort      | SSD1306 OLED (via `oled`)     |
//! |            | TimerPort        | Monotonic timer (via `time`)  |
//! |            | ClimatePort      | DHT22 (via `dht22` driver)    |
//! |            | TimeSyncPort     | SNTP (via `sntp`)             |
//! | `oled`     | DisplayPort      | SSD1306 over I²C              |
//! | `sntp`     | TimeSyncPort     | ESP-IDF SNTP / host sim       |
//! | `time`     | TimerPort        | esp_timer / `std::time`       |
//! | `log_sink` | EventSink        | Serial log output             |
//! | `wifi`     | —                | ESP-IDF WiFi STA (target only)|

pub mod hardware;
pub mod log_sink;
pub mod oled;
pub mod sntp;
pub mod time;
pub mod wifi;
