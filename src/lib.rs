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

#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Faultbait - deliberately crashing targets for fuzz harnesses.
//!
//! This crate provides:
//! - A byte-pattern matcher that gates on length and a short prefix, then
//!   picks a fault class from a selector byte
//! - Fault primitives (out-of-bounds access, forged pointers, signals,
//!   allocator misuse, panics); `core::faults` is the only module allowed
//!   to use `unsafe`
//! - Built-in fixtures and a TOML loader for custom ones
//! - Harness entry points used by the libFuzzer targets in `fuzz/`

/// Matcher, fault primitives and shared types.
pub mod core;
/// Built-in and TOML-defined fixtures.
pub mod fixtures;
/// Harness entry points.
pub mod harness;
