// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn starts_at_one_and_increments() {
    let mut serial = TxSerial::new();
    assert_eq!(serial.next(), 1);
    assert_eq!(serial.next(), 2);
    assert_eq!(serial.next(), 3);
}

#[test]
fn wraps_on_overflow() {
    let mut serial = TxSerial { next: i32::MAX };
    assert_eq!(serial.next(), i32::MAX);
    assert_eq!(serial.next(), i32::MIN);
    assert_eq!(serial.next(), i32::MIN + 1);
}
