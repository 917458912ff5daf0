// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fakes for engine tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use oemtunnel_core::SimProperties;
use parking_lot::Mutex;

use super::bus::{BusAdapter, BusError};
use super::hook::{HookAdapter, HookError};

/// Scripted hook service: records transactions, can simulate absence and
/// one-shot transaction failures.
#[derive(Clone, Default)]
pub struct FakeHookAdapter {
    inner: Arc<HookInner>,
}

#[derive(Default)]
struct HookInner {
    connected: Mutex<bool>,
    absent: Mutex<bool>,
    fail_once: Mutex<Vec<u32>>,
    transactions: Mutex<Vec<(u32, Vec<u8>)>>,
}

impl FakeHookAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `connect` calls fail with `NotFound`.
    pub fn set_absent(&self, absent: bool) {
        *self.inner.absent.lock() = absent;
    }

    /// The next transaction with this code fails once.
    pub fn fail_next_transact(&self, code: u32) {
        self.inner.fail_once.lock().push(code);
    }

    pub fn transactions(&self) -> Vec<(u32, Vec<u8>)> {
        self.inner.transactions.lock().clone()
    }

    /// Number of successful transactions with the given code.
    pub fn sent(&self, code: u32) -> usize {
        self.inner.transactions.lock().iter().filter(|(c, _)| *c == code).count()
    }

    pub fn is_connected(&self) -> bool {
        *self.inner.connected.lock()
    }
}

#[async_trait]
impl HookAdapter for FakeHookAdapter {
    async fn connect(&self) -> Result<(), HookError> {
        if *self.inner.absent.lock() {
            return Err(HookError::NotFound);
        }
        *self.inner.connected.lock() = true;
        Ok(())
    }

    async fn disconnect(&self) {
        *self.inner.connected.lock() = false;
    }

    async fn transact(&self, code: u32, payload: &[u8]) -> Result<(), HookError> {
        if !*self.inner.connected.lock() {
            return Err(HookError::NotConnected);
        }
        let mut fail_once = self.inner.fail_once.lock();
        if let Some(pos) = fail_once.iter().position(|c| *c == code) {
            fail_once.remove(pos);
            return Err(HookError::Io(std::io::Error::other("injected failure")));
        }
        drop(fail_once);
        self.inner.transactions.lock().push((code, payload.to_vec()));
        Ok(())
    }
}

/// Scripted modem bus: fixed modem list and per-modem SIM properties.
#[derive(Clone, Default)]
pub struct FakeBusAdapter {
    inner: Arc<BusInner>,
}

#[derive(Default)]
struct BusInner {
    modems: Mutex<Vec<String>>,
    properties: Mutex<HashMap<String, SimProperties>>,
    fail_queries: Mutex<bool>,
    fail_properties: Mutex<bool>,
}

impl FakeBusAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_modems(&self, paths: &[&str]) {
        *self.inner.modems.lock() = paths.iter().map(|p| (*p).to_owned()).collect();
    }

    pub fn set_properties(&self, modem_path: &str, props: &[(&str, &str)]) {
        let props: SimProperties =
            props.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        self.inner.properties.lock().insert(modem_path.to_owned(), props);
    }

    /// Make all bus calls fail.
    pub fn set_fail_queries(&self, fail: bool) {
        *self.inner.fail_queries.lock() = fail;
    }

    /// Make only `sim_properties` fail.
    pub fn set_fail_properties(&self, fail: bool) {
        *self.inner.fail_properties.lock() = fail;
    }
}

#[async_trait]
impl BusAdapter for FakeBusAdapter {
    async fn modem_paths(&self) -> Result<Vec<String>, BusError> {
        if *self.inner.fail_queries.lock() {
            return Err(BusError::Timeout(Duration::from_millis(1)));
        }
        Ok(self.inner.modems.lock().clone())
    }

    async fn sim_properties(&self, modem_path: &str) -> Result<SimProperties, BusError> {
        if *self.inner.fail_queries.lock() || *self.inner.fail_properties.lock() {
            return Err(BusError::Timeout(Duration::from_millis(1)));
        }
        self.inner
            .properties
            .lock()
            .get(modem_path)
            .cloned()
            .ok_or_else(|| BusError::Bus(format!("no SIM manager at {modem_path}")))
    }
}
