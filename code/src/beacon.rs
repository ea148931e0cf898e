#![no_std]
#![no_main]

use badge_pure::AdvPayload;
use defmt::info;
use embassy_executor::Spawner;
use esp_backtrace as _;
use esp_hal::{interrupt::software::SoftwareInterruptControl, timer::timg::TimerGroup};
use esp_println as _;
use lib::{ble::Advertiser, config};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) {
    let _ = spawner;

    let p = esp_hal::init(Default::default());
    esp_alloc::heap_allocator!(size: 72 * 1024);

    // Needed for esp_rtos
    let timg0 = TimerGroup::new(p.TIMG0);
    let software_interrupt = SoftwareInterruptControl::new(p.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, software_interrupt.software_interrupt0);

    info!("badge beacon starting");

    // Both payloads are built from compile-time constants; a failure here
    // is a misconfiguration, not a runtime condition.
    let adv_data = AdvPayload::device_name(config::DEVICE_NAME).unwrap();
    let scan_rsp = AdvPayload::badge_info(config::BADGE_INFO_UUID, config::BADGE_INFO).unwrap();

    let radio = esp_radio::init().unwrap();
    let advertiser = Advertiser::new(&radio, p.BT);
    advertiser.run(&adv_data, &scan_rsp).await;
}
