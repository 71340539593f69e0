//! Analysis configuration.
//!
//! Chunk sizing and the optional chunking seed, set with builder methods or
//! read from `PLOTIQ_*` environment variables.

use crate::analysis::chunker::{DEFAULT_MAX_WORDS, DEFAULT_MIN_WORDS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable for the minimum chunk size.
pub const MIN_WORDS_VAR: &str = "PLOTIQ_MIN_WORDS";

/// Environment variable for the maximum chunk size.
pub const MAX_WORDS_VAR: &str = "PLOTIQ_MAX_WORDS";

/// Environment variable for the chunking seed.
pub const SEED_VAR: &str = "PLOTIQ_SEED";

/// Errors from building or validating a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("max_words must be at least 1")]
    ZeroMaxWords,

    #[error("min_words ({min}) cannot exceed max_words ({max})")]
    MinAboveMax { min: usize, max: usize },
}

/// Configuration for an analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Words a chunk needs before it may be flushed early.
    pub min_words: usize,

    /// Hard cap on words per chunk.
    pub max_words: usize,

    /// Seed for the chunk boundary draws. `None` draws from OS entropy, so
    /// the same text can chunk differently between runs.
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            max_words: DEFAULT_MAX_WORDS,
            seed: None,
        }
    }
}

impl AnalysisConfig {
    /// Create a config with the default chunk sizes and no seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum chunk size.
    pub fn with_min_words(mut self, words: usize) -> Self {
        self.min_words = words;
        self
    }

    /// Set the maximum chunk size.
    pub fn with_max_words(mut self, words: usize) -> Self {
        self.max_words = words;
        self
    }

    /// Pin chunk boundaries to a seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the chunk sizes are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_words == 0 {
            return Err(ConfigError::ZeroMaxWords);
        }
        if self.min_words > self.max_words {
            return Err(ConfigError::MinAboveMax {
                min: self.min_words,
                max: self.max_words,
            });
        }
        Ok(())
    }

    /// Load from `PLOTIQ_MIN_WORDS`, `PLOTIQ_MAX_WORDS` and `PLOTIQ_SEED`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            min_words: parse_var(&lookup, MIN_WORDS_VAR)?.unwrap_or(defaults.min_words),
            max_words: parse_var(&lookup, MAX_WORDS_VAR)?.unwrap_or(defaults.max_words),
            seed: parse_var(&lookup, SEED_VAR)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// The generator used for chunk boundary draws.
    pub fn chunk_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_builder() {
        let config = AnalysisConfig::new()
            .with_min_words(10)
            .with_max_words(20)
            .with_seed(3);
        assert_eq!(config.min_words, 10);
        assert_eq!(config.max_words, 20);
        assert_eq!(config.seed, Some(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_from_empty_env() {
        let config = AnalysisConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.min_words, 500);
        assert_eq!(config.max_words, 1000);
    }

    #[test]
    fn test_values_from_env() {
        let config = AnalysisConfig::from_lookup(lookup(&[
            (MIN_WORDS_VAR, "50"),
            (MAX_WORDS_VAR, " 120 "),
            (SEED_VAR, "7"),
        ]))
        .unwrap();
        assert_eq!(config, AnalysisConfig::new().with_min_words(50).with_max_words(120).with_seed(7));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            AnalysisConfig::from_lookup(lookup(&[(SEED_VAR, "abc")])),
            Err(ConfigError::InvalidValue {
                var: SEED_VAR,
                value: "abc".to_string()
            })
        );
        assert_eq!(
            AnalysisConfig::from_lookup(lookup(&[(MIN_WORDS_VAR, "2000")])),
            Err(ConfigError::MinAboveMax { min: 2000, max: 1000 })
        );
        assert_eq!(
            AnalysisConfig::new().with_min_words(0).with_max_words(0).validate(),
            Err(ConfigError::ZeroMaxWords)
        );
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let config = AnalysisConfig::new().with_seed(11);
        let mut a = config.chunk_rng();
        let mut b = config.chunk_rng();
        for _ in 0..5 {
            assert_eq!(a.gen::<f64>(), b.gen::<f64>());
        }
    }
}
