#![cfg_attr(not(feature = "std"), no_std)]
//! Board-agnostic logic for the badge firmware: the advertising readiness
//! gate, advertising payload encoding and the SSD1306 command sequences in
//! [`sign`]. Everything here runs (and is tested) on the host.

pub mod font8x8;
pub mod sign;

use trouble_host::prelude::{AdStructure, BR_EDR_NOT_SUPPORTED, LE_GENERAL_DISCOVERABLE};

/// Legacy advertising payloads are capped at 31 bytes.
pub const ADV_DATA_MAX: usize = 31;

/// An encoded advertising (or scan response) payload, in the fixed-buffer
/// plus used-length form the HCI data commands take.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvPayload {
    pub data: [u8; ADV_DATA_MAX],
    pub len: u8,
}

/// The assembled AD structures did not fit in the 31 byte payload.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadOverflow;

impl AdvPayload {
    fn encode(structures: &[AdStructure<'_>]) -> Result<Self, PayloadOverflow> {
        let mut data = [0; ADV_DATA_MAX];
        let len =
            AdStructure::encode_slice(structures, &mut data).map_err(|_| PayloadOverflow)?;
        Ok(Self {
            data,
            len: len as u8,
        })
    }

    /// Advertising packet: flags plus the complete local name.
    pub fn device_name(name: &str) -> Result<Self, PayloadOverflow> {
        Self::encode(&[
            AdStructure::Flags(LE_GENERAL_DISCOVERABLE | BR_EDR_NOT_SUPPORTED),
            AdStructure::CompleteLocalName(name.as_bytes()),
        ])
    }

    /// Scan response packet: 16-bit service data carrying the badge info
    /// string, answered only when a scanner asks.
    pub fn badge_info(uuid: [u8; 2], info: &str) -> Result<Self, PayloadOverflow> {
        Self::encode(&[AdStructure::ServiceData16 {
            uuid,
            data: info.as_bytes(),
        }])
    }
}

/// A completion notification from the radio for one of the two payload
/// submissions that precede broadcasting.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    AdvData { success: bool },
    ScanRspData { success: bool },
}

/// Tracks the two payload confirmations that must both land before
/// broadcasting may be switched on.
///
/// The confirmations arrive in no particular order. Whichever lands second
/// trips the gate, and it trips exactly once: later duplicates are absorbed,
/// and a failed confirmation leaves its side unset for good, so the gate
/// never opens.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AdvertiseGate {
    adv_data_set: bool,
    scan_rsp_data_set: bool,
    started: bool,
}

impl AdvertiseGate {
    pub const fn new() -> Self {
        Self {
            adv_data_set: false,
            scan_rsp_data_set: false,
            started: false,
        }
    }

    /// Advertising data confirmation. Returns whether the caller must now
    /// perform the broadcast start.
    #[must_use]
    pub fn on_adv_data_set(&mut self, success: bool) -> bool {
        if success {
            self.adv_data_set = true;
        }
        self.check()
    }

    /// Scan response data confirmation, symmetric to
    /// [`Self::on_adv_data_set`].
    #[must_use]
    pub fn on_scan_rsp_data_set(&mut self, success: bool) -> bool {
        if success {
            self.scan_rsp_data_set = true;
        }
        self.check()
    }

    /// Dispatch one [`Completion`] to the matching flag.
    #[must_use]
    pub fn on_completion(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::AdvData { success } => self.on_adv_data_set(success),
            Completion::ScanRspData { success } => self.on_scan_rsp_data_set(success),
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    fn check(&mut self) -> bool {
        if self.adv_data_set && self.scan_rsp_data_set && !self.started {
            self.started = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_once_after_adv_data_then_scan_rsp() {
        let mut gate = AdvertiseGate::new();
        assert!(!gate.on_adv_data_set(true));
        assert!(!gate.started());
        assert!(gate.on_scan_rsp_data_set(true));
        assert!(gate.started());
    }

    #[test]
    fn starts_once_after_scan_rsp_then_adv_data() {
        let mut gate = AdvertiseGate::new();
        assert!(!gate.on_scan_rsp_data_set(true));
        assert!(gate.on_adv_data_set(true));
        assert!(gate.started());
    }

    #[test]
    fn a_failed_confirmation_keeps_the_gate_shut() {
        let mut gate = AdvertiseGate::new();
        assert!(!gate.on_adv_data_set(true));
        assert!(!gate.on_scan_rsp_data_set(false));
        assert!(!gate.started());
    }

    #[test]
    fn a_failure_does_not_clear_the_other_side() {
        let mut gate = AdvertiseGate::new();
        assert!(!gate.on_scan_rsp_data_set(true));
        assert!(!gate.on_adv_data_set(false));
        // the scan response side stays confirmed; only the failed side is
        // missing
        assert!(gate.on_adv_data_set(true));
    }

    #[test]
    fn duplicate_confirmations_do_not_restart() {
        let mut gate = AdvertiseGate::new();
        assert!(!gate.on_adv_data_set(true));
        assert!(!gate.on_adv_data_set(true));
        assert!(gate.on_scan_rsp_data_set(true));
        assert!(!gate.on_scan_rsp_data_set(true));
        assert!(!gate.on_adv_data_set(true));
        assert!(gate.started());
    }

    #[test]
    fn completions_dispatch_to_the_matching_flag() {
        let mut gate = AdvertiseGate::new();
        assert!(!gate.on_completion(Completion::ScanRspData { success: true }));
        assert!(gate.on_completion(Completion::AdvData { success: true }));
    }

    #[test]
    fn device_name_payload_lays_out_flags_then_name() {
        let payload = AdvPayload::device_name("badge").unwrap();
        assert_eq!(payload.len, 10);
        // flags structure: length, type 0x01, value
        assert_eq!(payload.data[0], 2);
        assert_eq!(payload.data[1], 0x01);
        // complete local name structure
        assert_eq!(payload.data[3], 6);
        assert_eq!(payload.data[4], 0x09);
        assert_eq!(&payload.data[5..10], b"badge");
    }

    #[test]
    fn oversized_name_is_rejected() {
        let name = "a name far too long for a legacy advertising payload";
        assert_eq!(AdvPayload::device_name(name), Err(PayloadOverflow));
    }

    #[test]
    fn badge_info_payload_carries_uuid_and_text() {
        let payload = AdvPayload::badge_info([0x1C, 0x18], "rev-a").unwrap();
        assert_eq!(payload.len, 9);
        assert_eq!(payload.data[0], 8);
        assert_eq!(payload.data[1], 0x16);
        assert_eq!(payload.data[2..4], [0x1C, 0x18]);
        assert_eq!(&payload.data[4..9], b"rev-a");
    }
}
