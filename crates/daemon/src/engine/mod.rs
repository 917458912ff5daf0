// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestration engine.
//!
//! One [`Runtime`] owns all state and consumes events serially. After every
//! handled event it re-derives the readiness gate (connected, registered,
//! SIM unlocked) and announces "telephony UI ready" on each rising edge.

pub mod connector;
pub mod monitor;
pub mod registrar;

pub use connector::Connector;
pub use monitor::{MonitorError, SimMonitor};
pub use registrar::Registrar;

use oemtunnel_core::{ready_to_signal, Event, TxSerial};
use oemtunnel_wire::{
    decode_indication, decode_response, encode_ready_frame, hex_dump, response_action,
    EVT_HOOK_SET_ATEL_UI_STATUS, HOOK_INDICATION_RAW, HOOK_RESPONSE_RAW, OEM_TAG,
    TRANSACTION_OEM_HOOK_RAW_REQUEST,
};
use tracing::{debug, info, warn};

use crate::adapters::{BusAdapter, HookAdapter, HookError};

const HEX_DUMP_LIMIT: usize = 256;

/// Static daemon configuration.
pub struct RuntimeConfig {
    /// Response callback interface name.
    pub resp_iface: String,
    /// Indication callback interface name.
    pub ind_iface: String,
    /// SIM slot to monitor, zero-based.
    pub slot: u32,
}

pub struct Runtime<H, B> {
    connector: Connector<H>,
    registrar: Registrar,
    monitor: SimMonitor<B>,
    serial: TxSerial,
    signaled: bool,
    slot: u32,
}

impl<H: HookAdapter, B: BusAdapter> Runtime<H, B> {
    pub fn new(hook: H, bus: B, config: RuntimeConfig) -> Self {
        Self {
            connector: Connector::new(hook),
            registrar: Registrar::new(config.resp_iface, config.ind_iface),
            monitor: SimMonitor::new(bus),
            serial: TxSerial::new(),
            signaled: false,
            slot: config.slot,
        }
    }

    /// Record the monitored slot. Actual monitoring begins once the bus
    /// service is seen.
    pub async fn start(&mut self) {
        if let Err(e) = self.monitor.start(self.slot).await {
            warn!(slot = self.slot, error = %e, "SIM monitoring not started");
        }
    }

    /// Dispatch one event, then re-evaluate the readiness gate.
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            Event::ServiceAppeared => {
                if !self.connector.is_connected() {
                    match self.connector.connect().await {
                        Ok(()) => {}
                        Err(HookError::NotFound) => {
                            debug!("hook service not up yet, waiting for appearance");
                        }
                        Err(e) => warn!(error = %e, "hook service connect failed"),
                    }
                }
            }
            Event::ServiceDied => {
                self.connector.mark_dead().await;
                self.registrar.reset();
            }
            Event::BusAppeared => {
                info!("modem bus service appeared");
                self.monitor.handle_bus_appeared().await;
            }
            Event::BusVanished => {
                info!("modem bus service vanished");
                self.monitor.handle_bus_vanished();
            }
            Event::SimPropertyChanged { modem_path, property } => {
                if self.monitor.handle_property_changed(&modem_path, &property).await {
                    info!(modem = %modem_path, "SIM became unlocked");
                }
            }
            Event::HookResponse { code, payload } => self.handle_response(code, &payload),
            Event::HookIndication { code, payload } => self.handle_indication(code, &payload),
        }
        self.maybe_signal_ready().await;
    }

    /// Release external resources before exit.
    pub async fn shutdown(&mut self) {
        self.monitor.stop();
        self.connector.disconnect().await;
        self.registrar.reset();
    }

    /// Re-derive the gate. Registration is attempted lazily here so a failed
    /// attempt is retried on the next state-changing event.
    async fn maybe_signal_ready(&mut self) {
        if self.connector.is_connected() && !self.registrar.is_registered() {
            if let Err(e) = self.registrar.register(self.connector.hook()).await {
                warn!(error = %e, "callback registration failed");
            }
        }

        let ready = ready_to_signal(
            self.connector.state(),
            self.registrar.state(),
            self.monitor.unlock_state(),
        );
        if !ready {
            // falling edge re-arms the announcement
            self.signaled = false;
            return;
        }
        if self.signaled {
            return;
        }
        match self.send_ready().await {
            Ok(serial) => {
                self.signaled = true;
                info!(serial, "announced telephony UI ready");
            }
            Err(e) => warn!(error = %e, "ready announcement failed, will retry"),
        }
    }

    async fn send_ready(&mut self) -> Result<i32, HookError> {
        let serial = self.serial.next();
        let record = encode_ready_frame(OEM_TAG, EVT_HOOK_SET_ATEL_UI_STATUS, true);
        let mut message = Vec::with_capacity(4 + record.len());
        message.extend_from_slice(&serial.to_le_bytes());
        message.extend_from_slice(&record);
        self.connector.hook().transact(TRANSACTION_OEM_HOOK_RAW_REQUEST, &message).await?;
        Ok(serial)
    }

    fn handle_indication(&self, code: u32, payload: &[u8]) {
        if code != HOOK_INDICATION_RAW {
            debug!(code, "unhandled indication code");
            return;
        }
        match decode_indication(payload) {
            Ok(frame) => {
                let action = response_action(frame.response_id).unwrap_or("unknown");
                info!(
                    hook_id = frame.hook_id,
                    response_id = frame.response_id,
                    action,
                    payload = %hex_dump(frame.payload, HEX_DUMP_LIMIT),
                    "hook indication"
                );
            }
            Err(e) => warn!(error = %e, len = payload.len(), "dropping malformed indication"),
        }
    }

    fn handle_response(&self, code: u32, payload: &[u8]) {
        if code != HOOK_RESPONSE_RAW {
            debug!(code, "unhandled response code");
            return;
        }
        match decode_response(payload) {
            Ok(resp) => debug!(
                serial = resp.serial,
                error = resp.error,
                data = %hex_dump(resp.data, HEX_DUMP_LIMIT),
                "hook response"
            ),
            Err(e) => warn!(error = %e, len = payload.len(), "dropping malformed response"),
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
