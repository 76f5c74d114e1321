#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Fixture catalogue: built-ins plus fixtures loaded from TOML.

pub mod builtin;
pub mod config;

use std::collections::BTreeMap;
use std::path::Path;

use crate::core::matcher::Matcher;
use config::{load_fixtures_file, parse_fixtures_toml, ConfigError};

/// Named matchers.
#[derive(Clone, Debug, Default)]
pub struct FixtureSet {
    fixtures: BTreeMap<String, Matcher>,
}

impl FixtureSet {
    /// The built-in fixtures.
    pub fn builtin() -> Self {
        let mut fixtures = BTreeMap::new();
        for m in builtin::all() {
            fixtures.insert(m.name().to_string(), m);
        }
        Self { fixtures }
    }

    /// Add one matcher; its name must be new.
    pub fn insert(&mut self, matcher: Matcher) -> Result<(), ConfigError> {
        if self.fixtures.contains_key(matcher.name()) {
            return Err(ConfigError::DuplicateName(matcher.name().to_string()));
        }
        self.fixtures.insert(matcher.name().to_string(), matcher);
        Ok(())
    }

    /// Add every fixture in a TOML document. Nothing is added on error.
    pub fn extend_from_toml(&mut self, raw: &str) -> Result<usize, ConfigError> {
        let parsed = parse_fixtures_toml(raw)?;
        self.extend_checked(parsed)
    }

    /// Add every fixture in a TOML file. Nothing is added on error.
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, ConfigError> {
        let parsed = load_fixtures_file(path)?;
        self.extend_checked(parsed)
    }

    fn extend_checked(&mut self, parsed: Vec<Matcher>) -> Result<usize, ConfigError> {
        if let Some(clash) = parsed.iter().find(|m| self.fixtures.contains_key(m.name())) {
            return Err(ConfigError::DuplicateName(clash.name().to_string()));
        }
        let n = parsed.len();
        for m in parsed {
            self.fixtures.insert(m.name().to_string(), m);
        }
        Ok(n)
    }

    /// Look up a fixture.
    pub fn get(&self, name: &str) -> Option<&Matcher> {
        self.fixtures.get(name)
    }

    /// Fixtures in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Matcher> {
        self.fixtures.values()
    }

    /// Number of fixtures.
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    /// True when there are no fixtures.
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}
