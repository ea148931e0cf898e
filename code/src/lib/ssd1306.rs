use badge_pure::sign;
use embedded_hal_async::i2c::I2c;

/// SSD1306 driver speaking prebuilt command and data transactions.
///
/// Every operation is one or more addressed writes; start/stop framing and
/// the transfer timeout are the I2C master's business.
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Submit one transaction payload to the module.
    async fn submit(&mut self, payload: &[u8]) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, payload).await
    }

    pub async fn init(&mut self) -> Result<(), I2C::Error> {
        self.submit(&sign::init_sequence()).await
    }

    /// Blank all eight pages.
    pub async fn clear(&mut self) -> Result<(), I2C::Error> {
        for page in 0..sign::PAGES {
            self.submit(&sign::page_cursor(page)).await?;
            self.submit(&sign::blank_page()).await?;
        }
        Ok(())
    }

    /// Write text from the top-left, one page per line.
    pub async fn print(&mut self, text: &str) -> Result<(), I2C::Error> {
        for (page, line) in (0u8..).zip(text.lines()) {
            self.submit(&sign::page_cursor(page)).await?;
            self.submit(&sign::line_payload(line)).await?;
        }
        Ok(())
    }

    /// Kick off the hardware scroll; the module keeps it running without
    /// further traffic.
    pub async fn start_marquee(&mut self) -> Result<(), I2C::Error> {
        self.submit(&sign::marquee_sequence()).await
    }

    pub async fn set_inverted(&mut self, inverted: bool) -> Result<(), I2C::Error> {
        self.submit(&sign::invert_sequence(inverted)).await
    }
}
