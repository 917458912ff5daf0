// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response-id to action name lookup for inbound hook indications.

/// Map a vendor response id to its action name, for logging.
pub fn response_action(response_id: i32) -> Option<&'static str> {
    match response_id {
        525_299 => Some("IncrNwScanInd"),
        525_300 => Some("EngineerMode"),
        525_302 => Some("DeviceConfig"),
        525_303 => Some("AudioStateChanged"),
        525_305 => Some("ClearConfigs"),
        525_311 => Some("ValidateConfigs"),
        525_312 => Some("ValidateDumped"),
        525_320 => Some("PdcConfigsList"),
        525_322 => Some("AdnInitDone"),
        525_323 => Some("AdnRecordsInd"),
        525_340 => Some("CsgChangedInd"),
        525_341 => Some("RacChange"),
        _ => None,
    }
}
