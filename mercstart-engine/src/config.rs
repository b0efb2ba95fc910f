//! Campaign start settings: pools, quotas, and behavior toggles.
//!
//! Settings are loaded once and read-only afterwards; every engine entry
//! point takes the configuration as an explicit value, never through a
//! process-wide holder.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::constants::{
    DEFAULT_LIGHT_UNITS, DEFAULT_MEDIUM_UNITS, DEFAULT_PILOT_DIFFICULTY, DEFAULT_RANDOM_RONIN,
};

/// Campaign start settings.
///
/// JSON keys are camelCase (`lightPool`, `numberRandomRonin`, ...); every
/// field is optional and falls back to the shipped default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartConfig {
    /// Source pools per weight class. Duplicate ids act as sampling weight.
    #[serde(default)]
    pub light_pool: Vec<String>,
    #[serde(default)]
    pub medium_pool: Vec<String>,
    #[serde(default)]
    pub heavy_pool: Vec<String>,
    #[serde(default)]
    pub assault_pool: Vec<String>,

    /// Quota drawn from the corresponding pool.
    #[serde(default = "StartConfig::default_number_light")]
    pub number_light: usize,
    #[serde(default = "StartConfig::default_number_medium")]
    pub number_medium: usize,
    #[serde(default)]
    pub number_heavy: usize,
    #[serde(default)]
    pub number_assault: usize,

    /// Free slot 0 and start allocation there instead of slot 1.
    #[serde(default)]
    pub remove_ancestral_unit: bool,

    /// Guaranteed pilots, inserted in this order ahead of random draws.
    #[serde(default)]
    pub starting_ronin: Vec<String>,
    /// Ids vetoed by the ronin guard and excluded from random draws.
    #[serde(default)]
    pub blacklisted_ronin: Vec<String>,
    /// Transplant freshly generated stats onto every guaranteed and random
    /// ronin.
    #[serde(default)]
    pub reroll_stats: bool,
    /// Difficulty handed to the host's procedural generator.
    #[serde(default = "StartConfig::default_pilot_difficulty")]
    pub pilot_difficulty: i32,
    #[serde(default = "StartConfig::default_number_random_ronin")]
    pub number_random_ronin: usize,
    #[serde(default)]
    pub number_procedural_pilots: usize,
}

impl StartConfig {
    const fn default_number_light() -> usize {
        DEFAULT_LIGHT_UNITS
    }

    const fn default_number_medium() -> usize {
        DEFAULT_MEDIUM_UNITS
    }

    const fn default_number_random_ronin() -> usize {
        DEFAULT_RANDOM_RONIN
    }

    const fn default_pilot_difficulty() -> i32 {
        DEFAULT_PILOT_DIFFICULTY
    }

    /// Parse settings from JSON and sanitize them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` when the JSON cannot be deserialized.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut cfg: Self = serde_json::from_str(json)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Parse settings, falling back to an all-default configuration on
    /// failure. The parse error is kept so the caller can log it; it never
    /// propagates past the initialization boundary.
    #[must_use]
    pub fn load_or_default(json: &str) -> ConfigLoad {
        match Self::from_json(json) {
            Ok(cfg) => ConfigLoad::Loaded(cfg),
            Err(err) => ConfigLoad::Defaulted(Self::default(), err),
        }
    }

    /// Total pilot quota: guarantees + random ronin + procedural pilots.
    #[must_use]
    pub fn total_pilot_quota(&self) -> usize {
        self.starting_ronin.len() + self.number_random_ronin + self.number_procedural_pilots
    }

    /// Total unit quota across all weight classes.
    #[must_use]
    pub const fn total_unit_quota(&self) -> usize {
        self.number_light + self.number_medium + self.number_heavy + self.number_assault
    }

    /// Normalize operator input: each guarantee appears exactly once (first
    /// occurrence wins), the blacklist is deduplicated, and the generator
    /// difficulty is clamped to be non-negative. Pools are left untouched
    /// because duplicate pool entries are legal weighting.
    pub fn sanitize(&mut self) {
        dedup_preserving_order(&mut self.starting_ronin);
        dedup_preserving_order(&mut self.blacklisted_ronin);
        self.pilot_difficulty = self.pilot_difficulty.max(0);
    }
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            light_pool: Vec::new(),
            medium_pool: Vec::new(),
            heavy_pool: Vec::new(),
            assault_pool: Vec::new(),
            number_light: Self::default_number_light(),
            number_medium: Self::default_number_medium(),
            number_heavy: 0,
            number_assault: 0,
            remove_ancestral_unit: false,
            starting_ronin: Vec::new(),
            blacklisted_ronin: Vec::new(),
            reroll_stats: false,
            pilot_difficulty: Self::default_pilot_difficulty(),
            number_random_ronin: Self::default_number_random_ronin(),
            number_procedural_pilots: 0,
        }
    }
}

fn dedup_preserving_order(ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed start settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Outcome of a settings load.
///
/// A parse failure falls back to defaults but keeps the error, so the
/// adapter can log what happened instead of swallowing it silently.
#[derive(Debug)]
pub enum ConfigLoad {
    Loaded(StartConfig),
    Defaulted(StartConfig, ConfigError),
}

impl ConfigLoad {
    #[must_use]
    pub const fn config(&self) -> &StartConfig {
        match self {
            Self::Loaded(cfg) | Self::Defaulted(cfg, _) => cfg,
        }
    }

    #[must_use]
    pub fn into_config(self) -> StartConfig {
        match self {
            Self::Loaded(cfg) | Self::Defaulted(cfg, _) => cfg,
        }
    }

    /// Whether the load fell back to the all-default configuration.
    #[must_use]
    pub const fn fell_back(&self) -> bool {
        matches!(self, Self::Defaulted(..))
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ConfigError> {
        match self {
            Self::Loaded(_) => None,
            Self::Defaulted(_, err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: StartConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(cfg, StartConfig::default());
        assert_eq!(cfg.number_light, 3);
        assert_eq!(cfg.number_medium, 1);
        assert_eq!(cfg.number_random_ronin, 4);
        assert_eq!(cfg.pilot_difficulty, 1);
        assert!(!cfg.remove_ancestral_unit);
    }

    #[test]
    fn camel_case_keys_parse() {
        let json = r#"{
            "lightPool": ["ld-firefly", "ld-wasp"],
            "numberLight": 2,
            "numberRandomRonin": 1,
            "removeAncestralUnit": true,
            "startingRonin": ["ronin-medusa"],
            "blacklistedRonin": ["ronin-grim"],
            "rerollStats": true,
            "pilotDifficulty": 3
        }"#;
        let cfg = StartConfig::from_json(json).expect("valid settings");
        assert_eq!(cfg.light_pool, vec!["ld-firefly", "ld-wasp"]);
        assert_eq!(cfg.number_light, 2);
        assert_eq!(cfg.number_random_ronin, 1);
        assert!(cfg.remove_ancestral_unit);
        assert_eq!(cfg.starting_ronin, vec!["ronin-medusa"]);
        assert_eq!(cfg.blacklisted_ronin, vec!["ronin-grim"]);
        assert!(cfg.reroll_stats);
        assert_eq!(cfg.pilot_difficulty, 3);
    }

    #[test]
    fn load_or_default_keeps_parse_error() {
        let load = StartConfig::load_or_default("not json at all");
        assert!(load.fell_back());
        assert!(load.error().is_some());
        assert_eq!(load.config(), &StartConfig::default());
    }

    #[test]
    fn load_or_default_passes_valid_settings_through() {
        let load = StartConfig::load_or_default(r#"{"numberLight": 0}"#);
        assert!(!load.fell_back());
        assert!(load.error().is_none());
        assert_eq!(load.into_config().number_light, 0);
    }

    #[test]
    fn sanitize_dedups_guarantees_keeping_first_occurrence() {
        let mut cfg = StartConfig {
            starting_ronin: vec![
                "ronin-medusa".to_string(),
                "ronin-glitch".to_string(),
                "ronin-medusa".to_string(),
            ],
            pilot_difficulty: -2,
            ..StartConfig::default()
        };
        cfg.sanitize();
        assert_eq!(cfg.starting_ronin, vec!["ronin-medusa", "ronin-glitch"]);
        assert_eq!(cfg.pilot_difficulty, 0);
    }

    #[test]
    fn pools_keep_duplicate_weighting_entries() {
        let mut cfg = StartConfig {
            light_pool: vec!["ld-wasp".to_string(), "ld-wasp".to_string()],
            ..StartConfig::default()
        };
        cfg.sanitize();
        assert_eq!(cfg.light_pool.len(), 2);
    }

    #[test]
    fn quota_totals_sum_all_categories() {
        let cfg = StartConfig {
            number_light: 1,
            number_medium: 2,
            number_heavy: 3,
            number_assault: 4,
            starting_ronin: vec!["a".to_string()],
            number_random_ronin: 2,
            number_procedural_pilots: 3,
            ..StartConfig::default()
        };
        assert_eq!(cfg.total_unit_quota(), 10);
        assert_eq!(cfg.total_pilot_quota(), 6);
    }
}
