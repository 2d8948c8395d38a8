//! Gel recipe computation engine
//!
//! Turns a recipe plus a requested quantity (gel count, finished volume,
//! or an activity) into ingredient weights and summary metrics.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No state beyond the injected [`EngineConfig`]
//! 2. **Fail Fast**: Non-positive quantities are errors, never zero results
//! 3. **One Formula Set**: Every entry mode funnels into the same breakdown
//!
//! The finished-volume figure is an empirical estimate: water plus a
//! per-gram displacement for each dissolved solute. Ingredient weights
//! are never solved against it.

use crate::errors::{EngineError, EngineResult};
use crate::products::{compare_product_costs, Product, ProductCost};
use crate::recipes::{GelRecipe, RatioDeviation, RecipeId, PRECISION};
use crate::settings::EngineConfig;
use crate::units::{Pace, WeightUnit};
use crate::validation::{check, check_whole, validate_positive};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

// ============================================================================
// Inputs
// ============================================================================

/// Quantity requested on the recipe page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum CalculationRequest {
    /// Number of gels to make
    GelCount(f64),
    /// Finished volume to make (ml)
    Volume(f64),
}

/// Activity-based entry mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityInput {
    /// Body weight in `weight_unit`
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    pub distance_miles: f64,
    #[serde(default)]
    pub pace: Pace,
}

impl ActivityInput {
    pub fn new(weight: f64, weight_unit: WeightUnit, distance_miles: f64, pace: Pace) -> Self {
        Self {
            weight,
            weight_unit,
            distance_miles,
            pace,
        }
    }

    pub fn body_mass_kg(&self) -> f64 {
        self.weight_unit.to_kg(self.weight)
    }

    /// Distance times pace, in hours
    pub fn duration_hours(&self) -> f64 {
        self.distance_miles * self.pace.minutes_per_mile() / 60.0
    }
}

// ============================================================================
// Result
// ============================================================================

/// Ingredient quantities and summary metrics for one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientBreakdown {
    /// Recipe the batch follows; `None` in activity mode
    pub recipe: Option<RecipeId>,
    /// Gel count the batch was computed from; `None` in activity mode
    pub num_gels: Option<f64>,
    pub total_carbs_g: f64,
    pub maltodextrin_g: f64,
    pub fructose_g: f64,
    pub citric_acid_g: f64,
    pub table_salt_g: f64,
    pub water_ml: u64,
    pub total_volume_ml: u64,
    pub sodium_mg_total: f64,
    /// Only set in activity mode
    pub carbs_per_hour: Option<f64>,
}

impl IngredientBreakdown {
    /// Ingredient name for the glucose source
    pub fn glucose_source_label(&self) -> &'static str {
        self.recipe
            .map(|id| id.recipe().glucose_source_label)
            .unwrap_or(PRECISION.glucose_source_label)
    }

    /// Sum of the dry ingredient weights (g)
    pub fn dry_weight_g(&self) -> f64 {
        self.maltodextrin_g + self.fructose_g + self.citric_acid_g + self.table_salt_g
    }
}

/// Round half away from zero to `decimals` places, the way the page did
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

impl fmt::Display for IngredientBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24}{:>10}", "Ingredient", "Amount")?;
        writeln!(f, "{:<24}{:>8.0} g", self.glucose_source_label(), round_to(self.maltodextrin_g, 0))?;
        writeln!(f, "{:<24}{:>8.0} g", "Fructose", round_to(self.fructose_g, 0))?;
        writeln!(f, "{:<24}{:>8.2} g", "Citric Acid", round_to(self.citric_acid_g, 2))?;
        writeln!(f, "{:<24}{:>8.2} g", "Table Salt", round_to(self.table_salt_g, 2))?;
        writeln!(f, "{:<24}{:>7} ml", "Water", self.water_ml)?;
        writeln!(f)?;
        writeln!(f, "Total carbs: {:.0} g", round_to(self.total_carbs_g, 0))?;
        if let Some(per_hour) = self.carbs_per_hour {
            writeln!(f, "Carbs/hour: {:.0} g/h", round_to(per_hour, 0))?;
        }
        writeln!(f, "Sodium total: {:.0} mg", round_to(self.sodium_mg_total, 0))?;
        write!(f, "Final gel volume: {} ml", self.total_volume_ml)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Recipe computation engine
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeEngine {
    config: EngineConfig,
}

impl RecipeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ingredients for `num_gels` gels of `recipe`
    pub fn compute_from_gel_count(
        &self,
        recipe: &GelRecipe,
        num_gels: f64,
    ) -> EngineResult<IngredientBreakdown> {
        require_positive("num_gels", num_gels)?;

        let total_carbs = recipe.carbs_per_gel * num_gels;
        let mut breakdown = self.breakdown(total_carbs, recipe.malt_ratio, recipe.fruc_ratio)?;
        breakdown.recipe = Some(recipe.id);
        breakdown.num_gels = Some(num_gels);

        debug!(
            recipe = %recipe.id,
            num_gels,
            total_carbs_g = breakdown.total_carbs_g,
            total_volume_ml = breakdown.total_volume_ml,
            "Computed gel recipe"
        );
        Ok(breakdown)
    }

    /// Ingredients for roughly `total_volume_ml` of finished gel
    ///
    /// The volume is first turned into a whole gel count (rounding up at
    /// `ml_per_gel_estimate` per gel), and the batch is then computed
    /// forward from that count. The returned `total_volume_ml` is the
    /// forward estimate and will usually differ from the request.
    pub fn compute_from_volume(
        &self,
        recipe: &GelRecipe,
        total_volume_ml: f64,
    ) -> EngineResult<IngredientBreakdown> {
        require_positive("total_volume_ml", total_volume_ml)?;

        let num_gels = self.gels_for_volume(total_volume_ml);
        debug!(recipe = %recipe.id, total_volume_ml, num_gels, "Estimated gel count from volume");
        self.compute_from_gel_count(recipe, num_gels)
    }

    /// Dispatch a recipe-page request to the matching entry mode
    pub fn compute(
        &self,
        recipe: &GelRecipe,
        request: CalculationRequest,
    ) -> EngineResult<IngredientBreakdown> {
        match request {
            CalculationRequest::GelCount(num_gels) => self.compute_from_gel_count(recipe, num_gels),
            CalculationRequest::Volume(volume_ml) => self.compute_from_volume(recipe, volume_ml),
        }
    }

    /// Ingredients to fuel an activity
    ///
    /// Carbs are `body mass * fueling rate * duration`, always split 2:1
    /// maltodextrin:fructose whatever recipe the caller has selected.
    pub fn compute_from_activity(&self, activity: &ActivityInput) -> EngineResult<IngredientBreakdown> {
        require_positive("weight", activity.weight)?;
        require_positive("distance_miles", activity.distance_miles)?;
        require_positive("pace_min_per_mile", activity.pace.minutes_per_mile())?;

        let body_mass_kg = activity.body_mass_kg();
        let duration_hours = activity.duration_hours();
        let total_carbs = body_mass_kg * self.config.fueling_rate_g_per_kg_h * duration_hours;
        let carbs_per_hour = if duration_hours > 0.0 {
            total_carbs / duration_hours
        } else {
            0.0
        };

        let mut breakdown = self.breakdown(total_carbs, PRECISION.malt_ratio, PRECISION.fruc_ratio)?;
        breakdown.carbs_per_hour = Some(carbs_per_hour);

        debug!(
            body_mass_kg,
            duration_hours,
            total_carbs_g = breakdown.total_carbs_g,
            carbs_per_hour,
            "Computed activity fueling"
        );
        Ok(breakdown)
    }

    /// Ratio label and deviation from the 2:1 baseline
    pub fn ratio_deviation(&self, recipe: &GelRecipe) -> RatioDeviation {
        recipe.ratio_deviation()
    }

    /// Cost of covering `total_carbs_g` with each product
    pub fn compare_product_costs(
        &self,
        total_carbs_g: f64,
        products: &[Product],
    ) -> EngineResult<Vec<ProductCost>> {
        compare_product_costs(total_carbs_g, products).map_err(|err| {
            warn!(error = %err, "Rejected cost comparison input");
            err
        })
    }

    /// Whole gel count used for a volume request (rounded up)
    pub fn gels_for_volume(&self, total_volume_ml: f64) -> f64 {
        (total_volume_ml / self.config.ml_per_gel_estimate).ceil()
    }

    /// Volume shown when the page switches from gel-count to volume entry
    pub fn estimate_volume_for_gels(&self, num_gels: f64) -> f64 {
        num_gels * self.config.ml_per_gel_estimate
    }

    /// Gel count shown when the page switches from volume to gel-count entry
    ///
    /// Rounds to nearest, unlike [`Self::gels_for_volume`].
    pub fn estimate_gels_for_volume(&self, total_volume_ml: f64) -> f64 {
        (total_volume_ml / self.config.ml_per_gel_estimate).round()
    }

    /// Human-readable description of a request, e.g. `500ml volume (5 gels)`
    pub fn describe_request(&self, request: CalculationRequest) -> String {
        match request {
            CalculationRequest::GelCount(num_gels) => format!("{} gels", num_gels),
            CalculationRequest::Volume(volume_ml) => format!(
                "{}ml volume ({} gels)",
                volume_ml,
                self.gels_for_volume(volume_ml)
            ),
        }
    }

    fn breakdown(
        &self,
        total_carbs: f64,
        malt_ratio: f64,
        fruc_ratio: f64,
    ) -> EngineResult<IngredientBreakdown> {
        let cfg = &self.config;

        let citric = total_carbs * cfg.citric_acid_fraction;
        let sodium = (total_carbs / 30.0) * cfg.sodium_mg_per_30g_carbs;
        let salt = sodium / cfg.sodium_mg_per_g_salt;

        // Water is sized for the dilution target before solutes are added
        let water = (total_carbs * cfg.water_ml_per_g_carbs()).round();
        let volume = (water
            + total_carbs * cfg.volume_ml_per_g_carbs
            + salt * cfg.volume_ml_per_g_salt
            + citric * cfg.volume_ml_per_g_citric)
            .round();

        Ok(IngredientBreakdown {
            recipe: None,
            num_gels: None,
            total_carbs_g: total_carbs,
            maltodextrin_g: total_carbs * malt_ratio,
            fructose_g: total_carbs * fruc_ratio,
            citric_acid_g: citric,
            table_salt_g: salt,
            water_ml: require_whole("water_ml", water)?,
            total_volume_ml: require_whole("total_volume_ml", volume)?,
            sodium_mg_total: sodium,
            carbs_per_hour: None,
        })
    }
}

fn require_whole(field: &str, value: f64) -> EngineResult<u64> {
    check_whole(field, value).map_err(|err| {
        warn!(field, value, reason = %err.message, "Rejected calculation result");
        EngineError::from(err)
    })
}

fn require_positive(field: &str, value: f64) -> EngineResult<()> {
    check(field, value, validate_positive).map_err(|err| {
        warn!(field, value, reason = %err.message, "Rejected calculation input");
        EngineError::from(err)
    })
}
