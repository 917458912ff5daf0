// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use oemtunnel_core::Event;
use oemtunnel_wire::{
    EVT_HOOK_SET_ATEL_UI_STATUS, HOOK_INDICATION_RAW, HOOK_RESPONSE_RAW, OEM_TAG,
    TRANSACTION_OEM_HOOK_RAW_REQUEST, TRANSACTION_SET_CALLBACK,
};

use super::*;
use crate::adapters::{FakeBusAdapter, FakeHookAdapter};

const MODEM: &str = "/ril_0";
const ICCID: &str = "8944500000000000000";

fn test_runtime() -> (Runtime<FakeHookAdapter, FakeBusAdapter>, FakeHookAdapter, FakeBusAdapter) {
    let hook = FakeHookAdapter::new();
    let bus = FakeBusAdapter::new();
    bus.set_modems(&[MODEM]);
    bus.set_properties(MODEM, &[("CardIdentifier", ICCID), ("PinRequired", "pin")]);
    let config = RuntimeConfig {
        resp_iface: "IOemHookResponse".into(),
        ind_iface: "IOemHookIndication".into(),
        slot: 0,
    };
    let runtime = Runtime::new(hook.clone(), bus.clone(), config);
    (runtime, hook, bus)
}

fn unlock(bus: &FakeBusAdapter) {
    bus.set_properties(MODEM, &[("CardIdentifier", ICCID), ("PinRequired", "none")]);
}

fn pin_changed() -> Event {
    Event::SimPropertyChanged { modem_path: MODEM.into(), property: "PinRequired".into() }
}

async fn bring_up(
) -> (Runtime<FakeHookAdapter, FakeBusAdapter>, FakeHookAdapter, FakeBusAdapter) {
    let (mut runtime, hook, bus) = test_runtime();
    runtime.start().await;
    runtime.handle_event(Event::BusAppeared).await;
    runtime.handle_event(Event::ServiceAppeared).await;
    (runtime, hook, bus)
}

#[tokio::test]
async fn full_bring_up_announces_ready_once() {
    let (mut runtime, hook, bus) = bring_up().await;
    assert_eq!(hook.sent(TRANSACTION_SET_CALLBACK), 1);
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 0);

    unlock(&bus);
    runtime.handle_event(pin_changed()).await;
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 1);

    // a repeated notification is not another edge
    runtime.handle_event(pin_changed()).await;
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 1);
}

#[tokio::test]
async fn ready_message_layout_is_exact() {
    let (mut runtime, hook, bus) = bring_up().await;
    unlock(&bus);
    runtime.handle_event(pin_changed()).await;

    let transactions = hook.transactions();
    let (code, message) = transactions.last().unwrap();
    assert_eq!(*code, TRANSACTION_OEM_HOOK_RAW_REQUEST);
    assert_eq!(message.len(), 21);
    assert_eq!(&message[..4], &1i32.to_le_bytes());
    assert_eq!(&message[4..12], OEM_TAG);
    assert_eq!(&message[12..16], &EVT_HOOK_SET_ATEL_UI_STATUS.to_le_bytes());
    assert_eq!(&message[16..20], &1i32.to_le_bytes());
    assert_eq!(message[20], 1);
}

#[tokio::test]
async fn locked_sim_blocks_the_announcement() {
    let (mut runtime, hook, _bus) = bring_up().await;
    runtime.handle_event(pin_changed()).await;
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 0);
}

#[tokio::test]
async fn service_restart_registers_and_announces_again() {
    let (mut runtime, hook, bus) = bring_up().await;
    unlock(&bus);
    runtime.handle_event(pin_changed()).await;
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 1);

    runtime.handle_event(Event::ServiceDied).await;
    // gate is down while disconnected, unlock signals change nothing
    runtime.handle_event(pin_changed()).await;
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 1);

    runtime.handle_event(Event::ServiceAppeared).await;
    assert_eq!(hook.sent(TRANSACTION_SET_CALLBACK), 2);
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 2);
}

#[tokio::test]
async fn failed_registration_is_retried_on_the_next_event() {
    let (mut runtime, hook, bus) = test_runtime();
    runtime.start().await;
    runtime.handle_event(Event::BusAppeared).await;
    hook.fail_next_transact(TRANSACTION_SET_CALLBACK);
    runtime.handle_event(Event::ServiceAppeared).await;
    assert_eq!(hook.sent(TRANSACTION_SET_CALLBACK), 0);

    unlock(&bus);
    runtime.handle_event(pin_changed()).await;
    assert_eq!(hook.sent(TRANSACTION_SET_CALLBACK), 1);
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 1);
}

#[tokio::test]
async fn failed_announcement_is_retried_on_the_next_event() {
    let (mut runtime, hook, bus) = bring_up().await;
    hook.fail_next_transact(TRANSACTION_OEM_HOOK_RAW_REQUEST);
    unlock(&bus);
    runtime.handle_event(pin_changed()).await;
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 0);

    runtime.handle_event(pin_changed()).await;
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 1);
}

#[tokio::test]
async fn bus_restart_refires_the_announcement() {
    let (mut runtime, hook, bus) = bring_up().await;
    unlock(&bus);
    runtime.handle_event(pin_changed()).await;
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 1);

    runtime.handle_event(Event::BusVanished).await;
    runtime.handle_event(Event::BusAppeared).await;
    // re-registration is not needed, the connection epoch survived
    assert_eq!(hook.sent(TRANSACTION_SET_CALLBACK), 1);
    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 2);
}

#[tokio::test]
async fn malformed_inbound_frames_are_dropped() {
    let (mut runtime, hook, _bus) = bring_up().await;

    runtime
        .handle_event(Event::HookIndication { code: HOOK_INDICATION_RAW, payload: b"junk".to_vec() })
        .await;
    runtime.handle_event(Event::HookResponse { code: HOOK_RESPONSE_RAW, payload: vec![0; 3] }).await;
    runtime.handle_event(Event::HookIndication { code: 99, payload: vec![] }).await;

    assert_eq!(hook.sent(TRANSACTION_OEM_HOOK_RAW_REQUEST), 0);
}

#[tokio::test]
async fn shutdown_releases_the_connection() {
    let (mut runtime, hook, _bus) = bring_up().await;
    runtime.shutdown().await;
    assert!(!hook.is_connected());
}
