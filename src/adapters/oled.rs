//! SSD1306 OLED display adapter.
//!
//! Implements [`DisplayPort`] over the `ssd1306` driver in buffered
//! graphics mode.  `size` 1 maps to the 6×10 font, anything larger to
//! 10×20; multi-line text renders with embedded-graphics' newline
//! handling.  Display init failure is surfaced to the caller, where the
//! startup policy is to log and halt.
//!
//! On host builds the adapter just echoes renders to the debug log so the
//! full `HardwareAdapter` stays constructible in simulation.

use crate::app::ports::DisplayPort;
use crate::error::Error;

#[cfg(target_os = "espidf")]
mod imp {
    use embedded_graphics::{
        mono_font::{ascii::FONT_10X20, ascii::FONT_6X10, MonoTextStyle},
        pixelcolor::BinaryColor,
        prelude::*,
        text::{Baseline, Text},
    };
    use esp_idf_hal::i2c::I2cDriver;
    use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

    use super::{DisplayPort, Error};

    type Display = Ssd1306<
        I2CInterface<I2cDriver<'static>>,
        DisplaySize128x64,
        BufferedGraphicsMode<DisplaySize128x64>,
    >;

    pub struct OledDisplay {
        display: Display,
    }

    impl OledDisplay {
        /// Bring up the panel.  An error here is fatal to the caller.
        pub fn new(i2c: I2cDriver<'static>) -> Result<Self, Error> {
            let interface = I2CDisplayInterface::new(i2c);
            let mut display =
                Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
                    .into_buffered_graphics_mode();
            display
                .init()
                .map_err(|_| Error::Init("SSD1306 init failed"))?;
            Ok(Self { display })
        }
    }

    impl DisplayPort for OledDisplay {
        fn render(&mut self, text: &str, col: i32, row: i32, size: u8) {
            let style = if size <= 1 {
                MonoTextStyle::new(&FONT_6X10, BinaryColor::On)
            } else {
                MonoTextStyle::new(&FONT_10X20, BinaryColor::On)
            };
            let _ = Text::with_baseline(text, Point::new(col, row), style, Baseline::Top)
                .draw(&mut self.display);
            let _ = self.display.flush();
        }

        fn clear(&mut self) {
            let _ = self.display.clear(BinaryColor::Off);
            let _ = self.display.flush();
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod imp {
    use super::{DisplayPort, Error};

    /// Host stand-in: renders go to the debug log.
    pub struct OledDisplay;

    impl OledDisplay {
        pub fn new() -> Result<Self, Error> {
            Ok(Self)
        }
    }

    impl DisplayPort for OledDisplay {
        fn render(&mut self, text: &str, col: i32, row: i32, size: u8) {
            log::debug!("display[{col},{row} x{size}]: {}", text.replace('\n', " / "));
        }

        fn clear(&mut self) {
            log::debug!("display: clear");
        }
    }
}

pub use imp::OledDisplay;
