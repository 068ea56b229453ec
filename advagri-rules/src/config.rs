//! Initial rule values loaded from a JSON document.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::DEFAULT_ALLOW_SEASONS_CHANGE;
use crate::notify::NotificationSink;
use crate::registry::RuleRegistry;
use crate::rules::AdvAgriGameRules;
use crate::solar_term::SolarTerm;
use crate::validation::Validation;

/// Errors raised while reading a rules document.
#[derive(Debug, Error)]
pub enum RulesConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rules document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameRulesConfig {
    #[serde(default = "GameRulesConfig::default_allow_seasons_change")]
    pub allow_seasons_change: bool,
    #[serde(default = "GameRulesConfig::default_length_of_year")]
    pub length_of_year: i32,
}

impl GameRulesConfig {
    const fn default_allow_seasons_change() -> bool {
        DEFAULT_ALLOW_SEASONS_CHANGE
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    const fn default_length_of_year() -> i32 {
        SolarTerm::COUNT as i32
    }

    /// # Errors
    ///
    /// Returns an error if the document is not a valid rules object.
    pub fn from_json_str(raw: &str) -> Result<Self, RulesConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RulesConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Seed the registry with these values.
    ///
    /// The year length goes through the same change hook as any other
    /// proposal, so a bad configured value is corrected and reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot store either rule.
    pub fn apply<R, S>(
        &self,
        rules: &AdvAgriGameRules,
        registry: &mut R,
        sink: &mut S,
    ) -> Result<Validation, R::Error>
    where
        R: RuleRegistry,
        S: NotificationSink + ?Sized,
    {
        rules.set_allow_seasons_change(registry, self.allow_seasons_change)?;
        rules.set_length_of_year(registry, sink, self.length_of_year)
    }
}

impl Default for GameRulesConfig {
    fn default() -> Self {
        Self {
            allow_seasons_change: Self::default_allow_seasons_change(),
            length_of_year: Self::default_length_of_year(),
        }
    }
}
