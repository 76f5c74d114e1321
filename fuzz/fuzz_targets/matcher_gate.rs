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

#![no_main]
#![forbid(unsafe_code)]

use arbitrary::Arbitrary;
use faultbait::core::matcher::Matcher;
use faultbait::core::types::{CompareMode, Decision, FaultClass, LengthRule};
use libfuzzer_sys::fuzz_target;

// Arbitrary gate, prefix and selector placement with a table of no-ops:
// whatever the shape, reaching the selector must never index out of range.
#[derive(Clone, Debug, Arbitrary)]
struct Input {
    at_least: bool,
    min_len: u8,
    prefix: Vec<u8>,
    counted: bool,
    threshold: u8,
    selector_offset: Option<u8>,
    selectors: Vec<u8>,
    data: Vec<u8>,
}

fuzz_target!(|inp: Input| {
    let length = if inp.at_least {
        LengthRule::AtLeast(inp.min_len as usize)
    } else {
        LengthRule::GreaterThan(inp.min_len as usize)
    };
    let mode = if inp.counted {
        CompareMode::Counted { threshold: inp.threshold as usize }
    } else {
        CompareMode::Exact
    };

    let mut b = Matcher::builder("gate").length(length).prefix(&inp.prefix).mode(mode);
    if let Some(off) = inp.selector_offset {
        b = b.selector_offset(off as usize);
    }
    for s in inp.selectors {
        b = b.fault(s, FaultClass::NoOp);
    }
    let m = b.build();

    let decision = m.classify(&inp.data);
    if !length.admits(inp.data.len()) {
        assert_eq!(decision, Decision::NoMatch);
    }
    let _ = m.evaluate(&inp.data);
});
