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
#![deny(missing_docs)]

//! User-defined fixtures loaded from TOML.
//!
//! ## Format
//!
//! ```text
//! [[fixture]]
//! name = "custom"
//! length = { at_least = 4 }        # or { greater_than = 4 }
//! prefix = "xyz"                    # or prefix_hex = "414243"
//! compare = "counted"               # or "exact"
//! threshold = 3                     # counted only, defaults to the prefix length
//! selector_offset = 3               # omit for a fixture that only reports a match
//!
//! [[fixture.fault]]
//! selector = "0"                    # one ASCII char, or an integer 0..=255
//! kind = "oob_read"
//! offset = 50000
//! sentinel = 103
//! ```
//!
//! `kind` is one of the [`FaultClass`] names; the remaining keys are that
//! class's fields.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::matcher::Matcher;
use crate::core::types::{CompareMode, FaultClass, LengthRule};

/// Fixture file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Cannot read the fixture file.
    #[error("read fixture file")]
    Read,
    /// Not valid TOML, or does not fit the schema.
    #[error("parse fixture file: {0}")]
    Parse(String),
    /// Neither or both of `prefix` and `prefix_hex` were given.
    #[error("fixture {0:?}: exactly one of prefix or prefix_hex is required")]
    PrefixSource(String),
    /// `prefix_hex` is not valid hex.
    #[error("fixture {0:?}: bad prefix_hex")]
    BadHex(String),
    /// The prefix is empty.
    #[error("fixture {0:?}: empty prefix")]
    EmptyPrefix(String),
    /// Counted threshold is 0 or longer than the prefix.
    #[error("fixture {0:?}: threshold out of range")]
    BadThreshold(String),
    /// Selector string is not a single ASCII character.
    #[error("fixture {0:?}: selector must be one ASCII character or a byte")]
    BadSelector(String),
    /// Two faults share a selector.
    #[error("fixture {name:?}: duplicate selector {selector:#04x}")]
    DuplicateSelector {
        /// Fixture name.
        name: String,
        /// Repeated selector byte.
        selector: u8,
    },
    /// Faults were given without `selector_offset`.
    #[error("fixture {0:?}: faults need a selector_offset")]
    MissingSelectorOffset(String),
    /// Two fixtures share a name.
    #[error("duplicate fixture name {0:?}")]
    DuplicateName(String),
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    fixture: Vec<RawFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawCompare {
    Counted,
    Exact,
}

#[derive(Debug, Deserialize)]
struct RawFixture {
    name: String,
    length: LengthRule,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    prefix_hex: Option<String>,
    compare: RawCompare,
    #[serde(default)]
    threshold: Option<usize>,
    #[serde(default)]
    selector_offset: Option<usize>,
    #[serde(default)]
    fault: Vec<RawFault>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSelector {
    Byte(u8),
    Char(String),
}

#[derive(Debug, Deserialize)]
struct RawFault {
    selector: RawSelector,
    #[serde(flatten)]
    class: FaultClass,
}

fn selector_byte(name: &str, raw: &RawSelector) -> Result<u8, ConfigError> {
    match raw {
        RawSelector::Byte(b) => Ok(*b),
        RawSelector::Char(s) => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(ConfigError::BadSelector(name.to_string())),
        },
    }
}

fn prefix_bytes(raw: &RawFixture) -> Result<Vec<u8>, ConfigError> {
    let bytes = match (&raw.prefix, &raw.prefix_hex) {
        (Some(s), None) => s.as_bytes().to_vec(),
        (None, Some(h)) => hex::decode(h.trim()).map_err(|_| ConfigError::BadHex(raw.name.clone()))?,
        _ => return Err(ConfigError::PrefixSource(raw.name.clone())),
    };
    if bytes.is_empty() {
        return Err(ConfigError::EmptyPrefix(raw.name.clone()));
    }
    Ok(bytes)
}

fn build_fixture(raw: RawFixture) -> Result<Matcher, ConfigError> {
    let prefix = prefix_bytes(&raw)?;

    let mode = match raw.compare {
        RawCompare::Exact => CompareMode::Exact,
        RawCompare::Counted => {
            let threshold = raw.threshold.unwrap_or(prefix.len());
            if threshold == 0 || threshold > prefix.len() {
                return Err(ConfigError::BadThreshold(raw.name));
            }
            CompareMode::Counted { threshold }
        }
    };

    if raw.selector_offset.is_none() && !raw.fault.is_empty() {
        return Err(ConfigError::MissingSelectorOffset(raw.name));
    }

    let mut builder = Matcher::builder(raw.name.clone())
        .length(raw.length)
        .prefix(prefix)
        .mode(mode);
    if let Some(offset) = raw.selector_offset {
        builder = builder.selector_offset(offset);
    }

    let mut seen = BTreeSet::new();
    for f in raw.fault {
        let selector = selector_byte(&raw.name, &f.selector)?;
        if !seen.insert(selector) {
            return Err(ConfigError::DuplicateSelector {
                name: raw.name,
                selector,
            });
        }
        builder = builder.fault(selector, f.class);
    }

    Ok(builder.build())
}

/// Parse and validate a fixture document. Names must be unique within the
/// document; clashes with other sources are checked by the caller.
pub fn parse_fixtures_toml(raw: &str) -> Result<Vec<Matcher>, ConfigError> {
    let file: FixtureFile = toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let mut names = BTreeSet::new();
    let mut out = Vec::with_capacity(file.fixture.len());
    for f in file.fixture {
        if !names.insert(f.name.clone()) {
            return Err(ConfigError::DuplicateName(f.name));
        }
        out.push(build_fixture(f)?);
    }
    Ok(out)
}

/// Read and parse a fixture file.
pub fn load_fixtures_file(path: impl AsRef<Path>) -> Result<Vec<Matcher>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|_| ConfigError::Read)?;
    parse_fixtures_toml(&raw)
}
