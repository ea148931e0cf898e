#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_time::Timer;
use esp_backtrace as _;
use esp_hal::{
    i2c::{self, master::I2c},
    interrupt::software::SoftwareInterruptControl,
    time::Rate,
    timer::timg::TimerGroup,
};
use esp_println as _;
use lib::{config, ssd1306::Ssd1306};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) {
    let _ = spawner;

    let p = esp_hal::init(Default::default());

    // Needed for esp_rtos
    let timg0 = TimerGroup::new(p.TIMG0);
    let software_interrupt = SoftwareInterruptControl::new(p.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, software_interrupt.software_interrupt0);

    info!("badge marquee starting");

    let i2c_scl_gpio = p.GPIO4;
    let i2c_sda_gpio = p.GPIO5;

    let i2c = I2c::new(
        p.I2C0,
        i2c::master::Config::default().with_frequency(Rate::from_khz(400)),
    )
    .unwrap()
    .with_scl(i2c_scl_gpio)
    .with_sda(i2c_sda_gpio)
    .into_async();

    let mut display = Ssd1306::new(i2c, config::DISPLAY_ADDRESS);
    match display.init().await {
        Ok(()) => info!("display configured"),
        Err(e) => warn!("display configuration failed: {}", e),
    }
    if let Err(e) = display.clear().await {
        warn!("display clear failed: {}", e);
    }
    if let Err(e) = display.print(config::MARQUEE_TEXT).await {
        warn!("writing text failed: {}", e);
    }
    if let Err(e) = display.start_marquee().await {
        warn!("starting the marquee failed: {}", e);
    }

    // The scroll runs in hardware from here on; all that is left is to
    // flip the polarity now and then to spread the burn-in.
    let mut inverted = false;
    loop {
        Timer::after(config::INVERT_SCREEN_INTERVAL).await;
        inverted = !inverted;
        if let Err(e) = display.set_inverted(inverted).await {
            warn!("inverting the display failed: {}", e);
        }
    }
}
