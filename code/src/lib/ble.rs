use badge_pure::{AdvPayload, AdvertiseGate, Completion};
use bt_hci::{
    cmd::{
        controller_baseband::Reset,
        le::{
            LeSetAdvData, LeSetAdvEnable, LeSetAdvParams, LeSetRandomAddr,
            LeSetScanResponseData,
        },
    },
    controller::{Controller as _, ControllerCmdSync, ExternalController},
    param::{AddrKind, AdvChannelMap, AdvFilterPolicy, AdvKind, BdAddr, Duration},
};
use defmt::{info, warn};
use embassy_futures::join::{join, join3};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use esp_hal::{efuse::Efuse, peripherals::BT};
use esp_radio::{
    Controller,
    ble::controller::{BleConnector, BleConnectorError},
};

use crate::{BLE_SLOTS, config};

type HciError = bt_hci::cmd::Error<BleConnectorError>;

type Completions = Channel<CriticalSectionRawMutex, Completion, 2>;

/// Broadcast-only front end to the BLE controller.
///
/// The two payload submissions complete asynchronously on the controller's
/// event stream, in no fixed order; [`AdvertiseGate`] turns the pair of
/// completions into the single broadcast start.
pub struct Advertiser<'a> {
    controller: ExternalController<BleConnector<'a>, BLE_SLOTS>,
    address: BdAddr,
}

impl<'a> Advertiser<'a> {
    pub fn new(radio: &'a Controller<'a>, bt: BT<'a>) -> Self {
        let connector = BleConnector::new(radio, bt, Default::default()).unwrap();
        Self {
            controller: ExternalController::new(connector),
            address: BdAddr::new(Efuse::mac_address()),
        }
    }

    /// Run the beacon: pump controller events, submit both payloads and
    /// start broadcasting once the gate opens. Never returns.
    pub async fn run(&self, adv_data: &AdvPayload, scan_rsp: &AdvPayload) {
        let completions = Completions::new();

        join3(
            self.pump(),
            async {
                if let Err(e) = self.configure().await {
                    warn!("advertiser configuration failed: {}", e);
                    return;
                }
                info!("advertiser configured, submitting payloads");
                join(
                    async {
                        let success = self.submit_adv_data(adv_data).await;
                        completions.send(Completion::AdvData { success }).await;
                    },
                    async {
                        let success = self.submit_scan_rsp_data(scan_rsp).await;
                        completions.send(Completion::ScanRspData { success }).await;
                    },
                )
                .await;
            },
            self.dispatch(&completions),
        )
        .await;
    }

    /// Reset, own address and advertising parameters. A failure here leaves
    /// the beacon idle; nothing downstream is attempted or retried.
    async fn configure(&self) -> Result<(), HciError> {
        self.controller.exec(&Reset::new()).await?;
        self.controller
            .exec(&LeSetRandomAddr::new(self.address))
            .await?;
        self.controller
            .exec(&LeSetAdvParams::new(
                Duration::from_micros(config::ADV_INTERVAL_MIN.as_micros()),
                Duration::from_micros(config::ADV_INTERVAL_MAX.as_micros()),
                AdvKind::AdvScanInd,
                AddrKind::RANDOM,
                AddrKind::PUBLIC,
                BdAddr::new([0; 6]),
                AdvChannelMap::ALL,
                AdvFilterPolicy::default(),
            ))
            .await?;
        Ok(())
    }

    async fn submit_adv_data(&self, payload: &AdvPayload) -> bool {
        match self
            .controller
            .exec(&LeSetAdvData::new(payload.len, payload.data))
            .await
        {
            Ok(()) => {
                info!("advertising data set");
                true
            }
            Err(e) => {
                warn!("setting advertising data failed: {}", e);
                false
            }
        }
    }

    async fn submit_scan_rsp_data(&self, payload: &AdvPayload) -> bool {
        match self
            .controller
            .exec(&LeSetScanResponseData::new(payload.len, payload.data))
            .await
        {
            Ok(()) => {
                info!("scan response data set");
                true
            }
            Err(e) => {
                warn!("setting scan response data failed: {}", e);
                false
            }
        }
    }

    /// Feed completions through the gate; the second successful one starts
    /// the broadcast, exactly once.
    async fn dispatch(&self, completions: &Completions) {
        let mut gate = AdvertiseGate::new();
        loop {
            let completion = completions.receive().await;
            if gate.on_completion(completion) {
                match self.controller.exec(&LeSetAdvEnable::new(true)).await {
                    Ok(()) => info!("advertising started"),
                    Err(e) => warn!("unable to start advertising: {}", e),
                }
            }
        }
    }

    /// Drain the controller's event stream; command completions are routed
    /// to their waiting submitters inside the controller wrapper.
    async fn pump(&self) {
        let mut buffer = [0u8; 259];
        loop {
            if let Err(e) = self.controller.read(&mut buffer).await {
                warn!("radio event read failed: {}", e);
            }
        }
    }
}
