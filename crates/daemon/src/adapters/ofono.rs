// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ofono over the system D-Bus.
//!
//! Queries go through [`OfonoBus`]; name ownership changes and SimManager
//! `PropertyChanged` signals are turned into events by [`watch_bus`].

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt;
use oemtunnel_core::{Event, SimProperties};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use zbus::names::BusName;
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};
use zbus::{fdo, Connection, MatchRule, MessageStream, Proxy};

use super::bus::{BusAdapter, BusError};
use crate::env;

pub const OFONO_SERVICE: &str = "org.ofono";
pub const SIM_MANAGER_IFACE: &str = "org.ofono.SimManager";

const MANAGER_PATH: &str = "/";
const MANAGER_IFACE: &str = "org.nemomobile.ofono.ModemManager";

/// Handle to the system bus with a per-call reply budget.
pub struct OfonoBus {
    conn: Connection,
    timeout: Duration,
}

impl OfonoBus {
    /// Connect to the system bus. Failure here is fatal for the daemon.
    pub async fn system() -> zbus::Result<Self> {
        let conn = Connection::system().await?;
        Ok(Self { conn, timeout: env::bus_timeout() })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Whether the ofono well-known name currently has an owner.
    pub async fn service_present(&self) -> Result<bool, BusError> {
        let dbus = fdo::DBusProxy::new(&self.conn)
            .await
            .map_err(|e| BusError::Bus(e.to_string()))?;
        let name = BusName::try_from(OFONO_SERVICE).map_err(|e| BusError::Bus(e.to_string()))?;
        self.bounded(dbus.name_has_owner(name)).await
    }

    async fn bounded<T, E>(
        &self,
        call: impl Future<Output = Result<T, E>>,
    ) -> Result<T, BusError>
    where
        E: std::fmt::Display,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|e| BusError::Bus(e.to_string())),
            Err(_) => Err(BusError::Timeout(self.timeout)),
        }
    }

    async fn proxy(&self, path: &str, interface: &str) -> Result<Proxy<'_>, BusError> {
        Proxy::new(&self.conn, OFONO_SERVICE, path.to_owned(), interface.to_owned())
            .await
            .map_err(|e| BusError::Bus(e.to_string()))
    }
}

#[async_trait::async_trait]
impl BusAdapter for OfonoBus {
    async fn modem_paths(&self) -> Result<Vec<String>, BusError> {
        let manager = self.proxy(MANAGER_PATH, MANAGER_IFACE).await?;
        let paths: Vec<OwnedObjectPath> =
            self.bounded(manager.call("GetAvailableModems", &())).await?;
        Ok(paths.into_iter().map(|p| p.to_string()).collect())
    }

    async fn sim_properties(&self, modem_path: &str) -> Result<SimProperties, BusError> {
        let sim = self.proxy(modem_path, SIM_MANAGER_IFACE).await?;
        let props: HashMap<String, OwnedValue> =
            self.bounded(sim.call("GetProperties", &())).await?;
        Ok(props.iter().map(|(name, value)| (name.clone(), value_to_string(value))).collect())
    }
}

fn value_to_string(value: &Value<'_>) -> String {
    match value {
        Value::Str(s) => s.as_str().to_owned(),
        other => format!("{other:?}"),
    }
}

/// Forward ofono name ownership changes and SimManager property signals as
/// events. Runs until the bus connection or the event channel closes.
pub async fn watch_bus(conn: Connection, events: mpsc::Sender<Event>) {
    if let Err(e) = run_watch(&conn, &events).await {
        warn!(error = %e, "bus watch ended");
    }
}

async fn run_watch(conn: &Connection, events: &mpsc::Sender<Event>) -> zbus::Result<()> {
    let dbus = fdo::DBusProxy::new(conn).await?;
    let mut owner_changes = dbus.receive_name_owner_changed().await?;

    let rule = MatchRule::builder()
        .msg_type(zbus::message::Type::Signal)
        .interface(SIM_MANAGER_IFACE)?
        .member("PropertyChanged")?
        .build();
    let mut sim_signals = MessageStream::for_match_rule(rule, conn, None).await?;

    loop {
        tokio::select! {
            change = owner_changes.next() => {
                let Some(change) = change else { break };
                let args = match change.args() {
                    Ok(args) => args,
                    Err(e) => {
                        warn!(error = %e, "undecodable NameOwnerChanged signal");
                        continue;
                    }
                };
                if args.name().as_str() != OFONO_SERVICE {
                    continue;
                }
                let event = if args.new_owner().is_some() {
                    Event::BusAppeared
                } else {
                    Event::BusVanished
                };
                if events.send(event).await.is_err() {
                    break;
                }
            }
            msg = sim_signals.next() => {
                let Some(msg) = msg else { break };
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        warn!(error = %e, "bus stream error");
                        continue;
                    }
                };
                let header = msg.header();
                let Some(path) = header.path() else { continue };
                let modem_path = path.to_string();
                let body = msg.body();
                let (property, _value): (String, Value<'_>) = match body.deserialize() {
                    Ok(decoded) => decoded,
                    Err(e) => {
                        debug!(error = %e, "undecodable PropertyChanged body");
                        continue;
                    }
                };
                if events.send(Event::SimPropertyChanged { modem_path, property }).await.is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}
