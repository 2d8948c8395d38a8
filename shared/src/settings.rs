//! Engine configuration
//!
//! Every formula constant the calculator uses lives here so that the
//! engine never re-declares them per call site.
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. An optional TOML file
//! 3. Environment variables (prefix: GEL__)

use crate::errors::{EngineError, EngineResult};
use crate::validation::validate_positive;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Formula constants injected into [`crate::engine::RecipeEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sodium in one gram of table salt (mg)
    pub sodium_mg_per_g_salt: f64,
    /// Sodium target per 30 g of carbohydrate (mg)
    pub sodium_mg_per_30g_carbs: f64,
    /// Dilution target: carbs per 100 ml of finished gel (g)
    pub carbs_g_per_100ml: f64,
    /// Citric acid as a fraction of total carbs
    pub citric_acid_fraction: f64,
    /// Volume displaced per gram of dissolved carbs (ml)
    pub volume_ml_per_g_carbs: f64,
    /// Volume displaced per gram of dissolved salt (ml)
    pub volume_ml_per_g_salt: f64,
    /// Volume displaced per gram of dissolved citric acid (ml)
    pub volume_ml_per_g_citric: f64,
    /// Rough finished volume of one gel, used to turn a volume into a gel count (ml)
    pub ml_per_gel_estimate: f64,
    /// Activity fueling rate (g carbs per kg body mass per hour)
    pub fueling_rate_g_per_kg_h: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sodium_mg_per_g_salt: 390.0,
            sodium_mg_per_30g_carbs: 300.0,
            carbs_g_per_100ml: 65.0,
            citric_acid_fraction: 0.004,
            volume_ml_per_g_carbs: 0.62,
            volume_ml_per_g_salt: 0.35,
            volume_ml_per_g_citric: 0.8,
            ml_per_gel_estimate: 100.0,
            fueling_rate_g_per_kg_h: 1.0,
        }
    }
}

impl EngineConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. `path`, if given and present (TOML)
    /// 3. Environment variables with GEL__ prefix, e.g.
    ///    `GEL__FUELING_RATE_G_PER_KG_H=1.2`
    pub fn load(path: Option<&Path>) -> EngineResult<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&EngineConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("GEL").separator("__"))
            .build()?;

        let loaded: EngineConfig = config.try_deserialize()?;
        loaded.validate()?;
        tracing::debug!(config = ?loaded, "Loaded engine configuration");
        Ok(loaded)
    }

    /// Parse configuration from a TOML string layered over the defaults
    pub fn from_toml_str(toml: &str) -> EngineResult<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&EngineConfig::default())?)
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let loaded: EngineConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject constants that would make the formulas meaningless
    ///
    /// All constants must be strictly positive; the citric acid fraction
    /// must also be below 1.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("sodium_mg_per_g_salt", self.sodium_mg_per_g_salt),
            ("sodium_mg_per_30g_carbs", self.sodium_mg_per_30g_carbs),
            ("carbs_g_per_100ml", self.carbs_g_per_100ml),
            ("citric_acid_fraction", self.citric_acid_fraction),
            ("volume_ml_per_g_carbs", self.volume_ml_per_g_carbs),
            ("volume_ml_per_g_salt", self.volume_ml_per_g_salt),
            ("volume_ml_per_g_citric", self.volume_ml_per_g_citric),
            ("ml_per_gel_estimate", self.ml_per_gel_estimate),
            ("fueling_rate_g_per_kg_h", self.fueling_rate_g_per_kg_h),
        ];

        for (name, value) in fields {
            validate_positive(value).map_err(|msg| EngineError::Config(format!("{}: {}", name, msg)))?;
        }

        if self.citric_acid_fraction >= 1.0 {
            return Err(EngineError::Config(
                "citric_acid_fraction: must be below 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Water needed per gram of carbs to hit the dilution target (ml)
    pub fn water_ml_per_g_carbs(&self) -> f64 {
        100.0 / self.carbs_g_per_100ml
    }
}
