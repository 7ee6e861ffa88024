//! Engine configuration
//!
//! Defaults reproduce the stock rules. A JSON file named by `BLOCKFALL_CONFIG`
//! may override any subset of fields, and `BLOCKFALL_SEED` pins the piece
//! sequence.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{
    EngineError, COUNTDOWN_TICKS, DROP_DELAY_STEP_MS, INITIAL_DROP_DELAY_MS, LINES_PER_LEVEL,
    MIN_DROP_DELAY_MS, PREVIEW_SIZE,
};

pub const CONFIG_ENV: &str = "BLOCKFALL_CONFIG";
pub const SEED_ENV: &str = "BLOCKFALL_SEED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed randomizer seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub countdown_ticks: u8,
    pub lines_per_level: u32,
    pub initial_drop_delay_ms: u32,
    pub drop_delay_step_ms: u32,
    pub min_drop_delay_ms: u32,
    pub preview_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            countdown_ticks: COUNTDOWN_TICKS,
            lines_per_level: LINES_PER_LEVEL,
            initial_drop_delay_ms: INITIAL_DROP_DELAY_MS,
            drop_delay_step_ms: DROP_DELAY_STEP_MS,
            min_drop_delay_ms: MIN_DROP_DELAY_MS,
            preview_size: PREVIEW_SIZE,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.lines_per_level == 0 {
            return Err(EngineError::Config("lines_per_level must be positive".into()));
        }
        if self.preview_size == 0 || self.preview_size > PREVIEW_SIZE {
            return Err(EngineError::Config(format!(
                "preview_size must be in 1..={PREVIEW_SIZE}, got {}",
                self.preview_size
            )));
        }
        if self.countdown_ticks == 0 {
            return Err(EngineError::Config("countdown_ticks must be positive".into()));
        }
        if self.min_drop_delay_ms > self.initial_drop_delay_ms {
            return Err(EngineError::Config(format!(
                "min_drop_delay_ms ({}) exceeds initial_drop_delay_ms ({})",
                self.min_drop_delay_ms, self.initial_drop_delay_ms
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let json = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Load from `BLOCKFALL_CONFIG` (optional) then apply `BLOCKFALL_SEED`.
    pub fn from_env() -> Result<Self, EngineError> {
        let path = env::var(CONFIG_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let seed = env::var(SEED_ENV).ok();
        Self::from_sources(path.as_deref().map(Path::new), seed.as_deref())
    }

    fn from_sources(path: Option<&Path>, seed: Option<&str>) -> Result<Self, EngineError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(seed) = seed {
            let seed = seed
                .trim()
                .parse()
                .map_err(|_| EngineError::Config(format!("{SEED_ENV} is not a u64: {seed:?}")))?;
            config.seed = Some(seed);
        }
        Ok(config)
    }
}
