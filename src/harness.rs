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

//! Harness-facing entry points.
//!
//! The per-fixture functions build their matcher once and evaluate against
//! it; the fuzz targets call these directly.

use std::sync::OnceLock;

use crate::core::matcher::Matcher;
use crate::fixtures::builtin;

/// Value returned by [`entry`] whenever it returns at all.
pub const ENTRY_OK: i32 = 0;

/// Harness wrapper: evaluate `data`, ignore `id`, return [`ENTRY_OK`].
pub fn entry(matcher: &Matcher, data: &[u8], _id: u64) -> i32 {
    matcher.evaluate(data);
    ENTRY_OK
}

macro_rules! cached_entry {
    ($(#[$doc:meta])* $fn_name:ident => $ctor:path) => {
        $(#[$doc])*
        pub fn $fn_name(data: &[u8]) -> bool {
            static M: OnceLock<Matcher> = OnceLock::new();
            M.get_or_init($ctor).evaluate(data)
        }
    };
}

cached_entry!(
    /// Evaluate against [`builtin::xyz_counted`].
    xyz_counted => builtin::xyz_counted
);
cached_entry!(
    /// Evaluate against [`builtin::abc_exact`].
    abc_exact => builtin::abc_exact
);
cached_entry!(
    /// Evaluate against [`builtin::xyz_native`].
    xyz_native => builtin::xyz_native
);
cached_entry!(
    /// Evaluate against [`builtin::xyz_heap`].
    xyz_heap => builtin::xyz_heap
);
cached_entry!(
    /// Evaluate against [`builtin::fuzz_canary`].
    fuzz_canary => builtin::fuzz_canary
);
