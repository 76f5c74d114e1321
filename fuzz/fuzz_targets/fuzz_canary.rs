// Copyright (c) 2026 Faultbait
// Licensed under the Apache-2.0 License.

#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    faultbait::harness::fuzz_canary(data);
});
