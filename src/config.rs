//! Presentation defaults: which tips are offered, how many people can be
//! picked, and which currency totals are shown in.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! `WESPLIT_`-prefixed environment variables (e.g. `WESPLIT_CURRENCY_CODE=EUR`).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::types::*;

pub const ENV_PREFIX: &str = "WESPLIT_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// ISO-4217 code totals are shown in; wins over the locale's own currency
    pub currency_code: String,
    pub locale: String,
    /// Tip choices in display order
    pub tip_options: Vec<TipPercentage>,
    pub default_tip_percentage: TipPercentage,
    pub default_party_size: PartySize,
    pub min_party_size: PartySize,
    pub max_party_size: PartySize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
            locale: "en_US".to_string(),
            tip_options: DEFAULT_TIP_OPTIONS.to_vec(),
            default_tip_percentage: DEFAULT_TIP_PERCENTAGE,
            default_party_size: DEFAULT_PARTY_SIZE,
            min_party_size: MIN_PARTY_SIZE,
            max_party_size: MAX_PARTY_SIZE,
        }
    }
}

impl SplitConfig {
    /// Load defaults, merge `path` (if given) and the environment, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(SplitConfig::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::Invalid(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: SplitConfig = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        config.validate()?;
        debug!(?config, "loaded split configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tip_options.is_empty() {
            return Err(ConfigError::Invalid("tip_options must not be empty".into()));
        }
        if !self.tip_options.contains(&self.default_tip_percentage) {
            return Err(ConfigError::Invalid(format!(
                "default_tip_percentage {} is not one of tip_options {:?}",
                self.default_tip_percentage, self.tip_options
            )));
        }
        if self.min_party_size == 0 {
            return Err(ConfigError::Invalid("min_party_size must be at least 1".into()));
        }
        if self.min_party_size > self.max_party_size {
            return Err(ConfigError::Invalid(format!(
                "min_party_size {} exceeds max_party_size {}",
                self.min_party_size, self.max_party_size
            )));
        }
        if !(self.min_party_size..=self.max_party_size).contains(&self.default_party_size) {
            return Err(ConfigError::Invalid(format!(
                "default_party_size {} is outside {}..={}",
                self.default_party_size, self.min_party_size, self.max_party_size
            )));
        }
        Ok(())
    }

    /// Input shown before the user edits anything.
    pub fn initial_input(&self) -> BillInput {
        BillInput::new(0.0, self.default_party_size, self.default_tip_percentage)
    }
}
