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

//! Fault-trigger matcher.
//!
//! A [`Matcher`] gates on buffer length, compares a short prefix literal and,
//! if the prefix holds, reads one selector byte and looks it up in a table of
//! [`FaultClass`]es. All indexing on the way to the selector is checked, so a
//! buffer can only reach a fault through the table, never by accident.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::faults::{FaultSink, LiveFaults};
use crate::core::types::{CompareMode, Decision, FaultClass, LengthRule};

/// One configured fixture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matcher {
    name: String,
    length: LengthRule,
    prefix: Vec<u8>,
    mode: CompareMode,
    selector_offset: Option<usize>,
    table: BTreeMap<u8, FaultClass>,
}

impl Matcher {
    /// Start building a matcher named `name`.
    pub fn builder(name: impl Into<String>) -> MatcherBuilder {
        MatcherBuilder {
            name: name.into(),
            length: LengthRule::AtLeast(0),
            prefix: Vec::new(),
            mode: CompareMode::Exact,
            selector_offset: None,
            table: BTreeMap::new(),
        }
    }

    /// Fixture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length gate.
    pub fn length(&self) -> LengthRule {
        self.length
    }

    /// Prefix literal.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Compare mode.
    pub fn mode(&self) -> CompareMode {
        self.mode
    }

    /// Selector offset, if the fixture has one.
    pub fn selector_offset(&self) -> Option<usize> {
        self.selector_offset
    }

    /// Selector table.
    pub fn table(&self) -> &BTreeMap<u8, FaultClass> {
        &self.table
    }

    fn prefix_matches(&self, data: &[u8]) -> bool {
        match self.mode {
            CompareMode::Counted { threshold } => {
                let mut cnt = 0usize;
                for (i, want) in self.prefix.iter().enumerate() {
                    if data.get(i) == Some(want) {
                        cnt += 1;
                    }
                }
                cnt >= threshold
            }
            CompareMode::Exact => data.get(..self.prefix.len()) == Some(self.prefix.as_slice()),
        }
    }

    /// Decide what `data` would do, without doing it.
    pub fn classify<'a>(&'a self, data: &[u8]) -> Decision<'a> {
        if !self.length.admits(data.len()) || !self.prefix_matches(data) {
            return Decision::NoMatch;
        }
        let Some(offset) = self.selector_offset else {
            return Decision::Matched;
        };
        let Some(&selector) = data.get(offset) else {
            return Decision::NoMatch;
        };
        match self.table.get(&selector) {
            Some(class) => Decision::Fault(class),
            None => Decision::UnknownSelector(selector),
        }
    }

    /// Evaluate `data` and fire the selected fault for real.
    pub fn evaluate(&self, data: &[u8]) -> bool {
        self.evaluate_with(data, &LiveFaults)
    }

    /// Evaluate `data`, handing a selected fault to `sink`.
    pub fn evaluate_with<S: FaultSink + ?Sized>(&self, data: &[u8], sink: &S) -> bool {
        match self.classify(data) {
            Decision::NoMatch | Decision::UnknownSelector(_) => false,
            Decision::Matched => {
                debug!(fixture = %self.name, "prefix matched");
                true
            }
            Decision::Fault(class) => sink.fire(class, data),
        }
    }
}

/// Builder for [`Matcher`].
#[derive(Clone, Debug)]
pub struct MatcherBuilder {
    name: String,
    length: LengthRule,
    prefix: Vec<u8>,
    mode: CompareMode,
    selector_offset: Option<usize>,
    table: BTreeMap<u8, FaultClass>,
}

impl MatcherBuilder {
    /// Set the length gate.
    pub fn length(mut self, rule: LengthRule) -> Self {
        self.length = rule;
        self
    }

    /// Set the prefix literal.
    pub fn prefix(mut self, prefix: impl AsRef<[u8]>) -> Self {
        self.prefix = prefix.as_ref().to_vec();
        self
    }

    /// Set the compare mode.
    pub fn mode(mut self, mode: CompareMode) -> Self {
        self.mode = mode;
        self
    }

    /// Read the selector at `offset`.
    pub fn selector_offset(mut self, offset: usize) -> Self {
        self.selector_offset = Some(offset);
        self
    }

    /// Map `selector` to `class`. A later call for the same selector wins.
    pub fn fault(mut self, selector: u8, class: FaultClass) -> Self {
        self.table.insert(selector, class);
        self
    }

    /// Finish.
    pub fn build(self) -> Matcher {
        Matcher {
            name: self.name,
            length: self.length,
            prefix: self.prefix,
            mode: self.mode,
            selector_offset: self.selector_offset,
            table: self.table,
        }
    }
}
