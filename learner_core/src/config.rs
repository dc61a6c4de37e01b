//! Engine configuration.
//!
//! Every section and field has a default, so a TOML file only needs to name
//! what it overrides:
//!
//! ```toml
//! [propagation]
//! min_source_mastery = 0.5
//!
//! [decision]
//! review_after_days = 7
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use curriculum::AlignmentConfig;

use crate::decay::DecayConfig;
use crate::decision::DecisionPolicy;
use crate::propagation::PropagationConfig;
use crate::signals::SignalDeltas;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read engine config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid engine config: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for every engine in the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub alignment: AlignmentConfig,
    pub signals: SignalDeltas,
    pub propagation: PropagationConfig,
    pub decision: DecisionPolicy,
    pub decay: DecayConfig,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
