// Copyright (c) 2026 Faultbait
// Licensed under the Apache-2.0 License.

#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Loader must reject bad documents with an error, never a panic.
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = faultbait::fixtures::config::parse_fixtures_toml(s);
    }
});
