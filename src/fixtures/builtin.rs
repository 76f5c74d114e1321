// Copyright (c) 2026 Faultbait
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Built-in fixtures.

use crate::core::matcher::{Matcher, MatcherBuilder};
use crate::core::types::{CompareMode, FaultClass, LengthRule, DEFAULT_SIGNAL};

/// Name of [`xyz_counted`].
pub const XYZ_COUNTED: &str = "xyz-counted";
/// Name of [`abc_exact`].
pub const ABC_EXACT: &str = "abc-exact";
/// Name of [`xyz_native`].
pub const XYZ_NATIVE: &str = "xyz-native";
/// Name of [`xyz_heap`].
pub const XYZ_HEAP: &str = "xyz-heap";
/// Name of [`fuzz_canary`].
pub const FUZZ_CANARY: &str = "fuzz-canary";

fn xyz(name: &str, length: LengthRule) -> MatcherBuilder {
    Matcher::builder(name)
        .length(length)
        .prefix(b"xyz")
        .mode(CompareMode::Counted { threshold: 3 })
        .selector_offset(3)
}

/// `len > 4`, counted `xyz`, selectors `'0'..='4'` cover the five classic
/// fault classes.
pub fn xyz_counted() -> Matcher {
    xyz(XYZ_COUNTED, LengthRule::GreaterThan(4))
        .fault(
            b'0',
            FaultClass::OobRead {
                offset: 50_000,
                sentinel: b'g',
            },
        )
        .fault(
            b'1',
            FaultClass::OobWrite {
                offset: 5_000,
                value: b'g',
            },
        )
        .fault(
            b'2',
            FaultClass::Signal {
                signal: DEFAULT_SIGNAL,
            },
        )
        .fault(b'3', FaultClass::StackSlotWrite { sentinel: 0xe })
        .fault(
            b'4',
            FaultClass::Panic {
                message: "panic".to_string(),
            },
        )
        .build()
}

/// `len >= 4`, exact `ABC`, selector `0x04` reads 100 000 bytes out.
pub fn abc_exact() -> Matcher {
    Matcher::builder(ABC_EXACT)
        .length(LengthRule::AtLeast(4))
        .prefix([0x41u8, 0x42, 0x43])
        .mode(CompareMode::Exact)
        .selector_offset(3)
        .fault(
            0x04,
            FaultClass::OobRead {
                offset: 100_000,
                sentinel: 0xFF,
            },
        )
        .build()
}

/// Null store and stack underflow behind counted `xyz`.
pub fn xyz_native() -> Matcher {
    xyz(XYZ_NATIVE, LengthRule::AtLeast(4))
        .fault(b'0', FaultClass::NullWrite { value: 123 })
        .fault(b'1', FaultClass::StackUnderflow { words: 32 })
        .build()
}

/// Allocator misuse and division by zero behind counted `xyz`.
pub fn xyz_heap() -> Matcher {
    xyz(XYZ_HEAP, LengthRule::AtLeast(4))
        .fault(b'4', FaultClass::DoubleFree)
        .fault(b'5', FaultClass::UseAfterFree)
        .fault(
            b'6',
            FaultClass::HeapOverflow {
                alloc_words: 8,
                write_words: 32,
            },
        )
        .fault(b'7', FaultClass::DivideByZero)
        .build()
}

/// No faults: reports whether the input starts with `FUZZ`.
pub fn fuzz_canary() -> Matcher {
    Matcher::builder(FUZZ_CANARY)
        .length(LengthRule::AtLeast(4))
        .prefix(b"FUZZ")
        .mode(CompareMode::Exact)
        .build()
}

/// Every built-in, in listing order.
pub fn all() -> Vec<Matcher> {
    vec![
        xyz_counted(),
        abc_exact(),
        xyz_native(),
        xyz_heap(),
        fuzz_canary(),
    ]
}
