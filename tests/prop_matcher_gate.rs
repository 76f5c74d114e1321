// Copyright (c) 2026 Faultbait
// Licensed under the Apache License, Version 2.0

#![forbid(unsafe_code)]

use std::cell::RefCell;

use proptest::prelude::*;

use faultbait::core::faults::FaultSink;
use faultbait::core::types::{Decision, FaultClass};
use faultbait::fixtures::builtin::{abc_exact, fuzz_canary, xyz_counted, xyz_heap, xyz_native};

/// Records fired classes instead of faulting.
#[derive(Default)]
struct Recorder {
    fired: RefCell<Vec<FaultClass>>,
}

impl FaultSink for Recorder {
    fn fire(&self, class: &FaultClass, _data: &[u8]) -> bool {
        self.fired.borrow_mut().push(class.clone());
        false
    }
}

proptest! {
    #[test]
    fn short_buffers_never_match(data in prop::collection::vec(any::<u8>(), 0..=4)) {
        let rec = Recorder::default();
        let m = xyz_counted();
        prop_assert_eq!(m.classify(&data), Decision::NoMatch);
        prop_assert!(!m.evaluate_with(&data, &rec));
        prop_assert!(rec.fired.borrow().is_empty());
    }

    #[test]
    fn abc_short_buffers_never_match(data in prop::collection::vec(any::<u8>(), 0..4)) {
        let m = abc_exact();
        prop_assert_eq!(m.classify(&data), Decision::NoMatch);
    }

    #[test]
    fn wrong_prefix_never_faults(
        head in any::<[u8; 3]>().prop_filter("not xyz", |h| h != b"xyz"),
        tail in prop::collection::vec(any::<u8>(), 2..64),
    ) {
        let mut data = head.to_vec();
        data.extend_from_slice(&tail);
        let rec = Recorder::default();
        for m in [xyz_counted(), xyz_native(), xyz_heap()] {
            prop_assert_eq!(m.classify(&data), Decision::NoMatch);
            prop_assert!(!m.evaluate_with(&data, &rec));
        }
        prop_assert!(rec.fired.borrow().is_empty());
    }

    #[test]
    fn unknown_selector_is_inert(
        sel in any::<u8>().prop_filter("unmapped", |s| !(b'0'..=b'4').contains(s)),
        pad in prop::collection::vec(any::<u8>(), 1..32),
    ) {
        let mut data = b"xyz".to_vec();
        data.push(sel);
        data.extend_from_slice(&pad);
        let rec = Recorder::default();
        let m = xyz_counted();
        prop_assert_eq!(m.classify(&data), Decision::UnknownSelector(sel));
        prop_assert!(!m.evaluate_with(&data, &rec));
        prop_assert!(!m.evaluate(&data));
        prop_assert!(rec.fired.borrow().is_empty());
    }

    #[test]
    fn benign_inputs_are_pure(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let m = xyz_counted();
        let first = m.classify(&data);
        if !matches!(first, Decision::Fault(_)) {
            prop_assert_eq!(m.classify(&data), first);
            prop_assert_eq!(m.evaluate(&data), m.evaluate(&data));
        }
    }
}

#[test]
fn selector_zero_reads_fifty_thousand_out() {
    let m = xyz_counted();
    assert_eq!(
        m.classify(b"xyz0pad"),
        Decision::Fault(&FaultClass::OobRead {
            offset: 50_000,
            sentinel: b'g',
        })
    );
}

// The matcher only sees a short head of `big`, so the fault offsets land in
// memory the test owns and can inspect.
#[test]
fn live_oob_read_reaches_past_the_slice() {
    let mut big = vec![0u8; 100_001];
    big[..7].copy_from_slice(b"xyz0pad");
    assert!(!xyz_counted().evaluate(&big[..7]));
    big[50_000] = b'g';
    assert!(xyz_counted().evaluate(&big[..7]));

    let mut b2 = vec![0u8; 100_001];
    b2[..4].copy_from_slice(&[0x41, 0x42, 0x43, 0x04]);
    assert!(!abc_exact().evaluate(&b2[..4]));
    b2[100_000] = 0xFF;
    assert!(abc_exact().evaluate(&b2[..4]));
}

#[test]
fn live_oob_write_lands_past_the_slice() {
    let mut big = vec![0u8; 5_001];
    big[..7].copy_from_slice(b"xyz1pad");
    assert!(!xyz_counted().evaluate(&big[..7]));
    assert_eq!(std::hint::black_box(&big)[5_000], b'g');
}

#[test]
fn selector_one_writes_five_thousand_out() {
    let rec = Recorder::default();
    xyz_counted().evaluate_with(b"xyz1pad", &rec);
    assert_eq!(
        *rec.fired.borrow(),
        vec![FaultClass::OobWrite {
            offset: 5_000,
            value: b'g',
        }]
    );
}

#[test]
fn xyz_counted_covers_all_five_classes() {
    let m = xyz_counted();
    let names: Vec<&str> = (b'0'..=b'4')
        .map(|s| match m.classify(&[b'x', b'y', b'z', s, 0]) {
            Decision::Fault(c) => c.name(),
            other => panic!("selector {s} gave {other:?}"),
        })
        .collect();
    assert_eq!(
        names,
        ["oob_read", "oob_write", "signal", "stack_slot_write", "panic"]
    );
}

#[test]
fn xyz_counted_requires_more_than_four_bytes() {
    assert_eq!(xyz_counted().classify(b"xyz0"), Decision::NoMatch);
}

#[test]
fn abc_exact_four_bytes_reads_hundred_thousand_out() {
    assert_eq!(
        abc_exact().classify(&[0x41, 0x42, 0x43, 0x04]),
        Decision::Fault(&FaultClass::OobRead {
            offset: 100_000,
            sentinel: 0xFF,
        })
    );
    assert_eq!(
        abc_exact().classify(&[0x41, 0x42, 0x43, 0x05]),
        Decision::UnknownSelector(0x05)
    );
    assert_eq!(abc_exact().classify(&[0x41, 0x42, 0x44, 0x04]), Decision::NoMatch);
}

#[test]
fn supplementary_fixtures_route_selectors() {
    let native = xyz_native();
    assert_eq!(
        native.classify(b"xyz0"),
        Decision::Fault(&FaultClass::NullWrite { value: 123 })
    );
    assert_eq!(
        native.classify(b"xyz1"),
        Decision::Fault(&FaultClass::StackUnderflow { words: 32 })
    );

    let heap = xyz_heap();
    assert_eq!(heap.classify(b"xyz4"), Decision::Fault(&FaultClass::DoubleFree));
    assert_eq!(heap.classify(b"xyz5"), Decision::Fault(&FaultClass::UseAfterFree));
    assert_eq!(heap.classify(b"xyz7"), Decision::Fault(&FaultClass::DivideByZero));
    assert_eq!(heap.classify(b"xyz0"), Decision::UnknownSelector(b'0'));
}

#[test]
fn canary_reports_match_without_faulting() {
    let m = fuzz_canary();
    assert!(m.evaluate(b"FUZZ"));
    assert!(m.evaluate(b"FUZZER"));
    assert!(!m.evaluate(b"FUZ"));
    assert!(!m.evaluate(b"FUZz"));
}

#[test]
fn harness_entry_returns_ok() {
    use faultbait::harness::{entry, ENTRY_OK};
    assert_eq!(entry(&xyz_counted(), b"nothing here", 7), ENTRY_OK);
    assert!(faultbait::harness::fuzz_canary(b"FUZZ"));
    assert!(!faultbait::harness::abc_exact(b"ABC"));
}
