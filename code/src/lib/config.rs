use embassy_time::Duration;

/// I2C address of the SSD1306 OLED module.
pub const DISPLAY_ADDRESS: u8 = 0x3C;

/// Text shown when the marquee starts. Each line takes one display page.
pub const MARQUEE_TEXT: &str = "badge online\nhello!";

/// Invert the display every once in a while so the marquee does not burn
/// the same pixels in forever.
pub const INVERT_SCREEN_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// Name carried in the advertising packet.
pub const DEVICE_NAME: &str = "badge-c3";

/// 16-bit User Data service, little endian, tagging the badge info string
/// in the scan response.
pub const BADGE_INFO_UUID: [u8; 2] = [0x1C, 0x18];

/// Free-form badge info answered to active scanners.
pub const BADGE_INFO: &str = "badge 0.1 rev-a";

/// Advertising interval window handed to the controller.
pub const ADV_INTERVAL_MIN: Duration = Duration::from_millis(20);
pub const ADV_INTERVAL_MAX: Duration = Duration::from_millis(40);
