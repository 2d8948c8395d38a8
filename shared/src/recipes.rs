//! Gel recipe catalog
//!
//! Each recipe emulates a commercial gel: carbs per serving and the
//! split of those carbs between the glucose source (maltodextrin or
//! glucose syrup) and fructose. The set is fixed and versioned with the
//! crate; callers select a recipe by [`RecipeId`].

use crate::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Glucose:fructose ratio of the baseline recipe
pub const BASELINE_RATIO: f64 = 2.0;

/// Identifier of a predefined recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecipeId {
    /// Precision Fuel PF30, the 2:1 baseline
    #[default]
    Precision,
    /// Maurten GEL 100
    Maurten,
    /// SIS Beta Fuel
    Sis,
}

impl RecipeId {
    /// All known recipe identifiers, baseline first
    pub const ALL: [RecipeId; 3] = [RecipeId::Precision, RecipeId::Maurten, RecipeId::Sis];

    /// Selector string used by the presentation layer
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeId::Precision => "precision",
            RecipeId::Maurten => "maurten",
            RecipeId::Sis => "sis",
        }
    }

    /// Resolve the recipe definition for this identifier
    pub fn recipe(&self) -> &'static GelRecipe {
        match self {
            RecipeId::Precision => &PRECISION,
            RecipeId::Maurten => &MAURTEN,
            RecipeId::Sis => &SIS,
        }
    }

    pub fn is_baseline(&self) -> bool {
        *self == RecipeId::Precision
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RecipeId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "precision" => Ok(RecipeId::Precision),
            "maurten" => Ok(RecipeId::Maurten),
            "sis" => Ok(RecipeId::Sis),
            _ => Err(EngineError::UnknownRecipe(s.to_string())),
        }
    }
}

/// Predefined gel recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GelRecipe {
    pub id: RecipeId,
    /// Display name of the emulated product
    pub name: &'static str,
    /// Grams of carbohydrate per gel
    pub carbs_per_gel: f64,
    /// Fraction of carbs from the glucose source
    pub malt_ratio: f64,
    /// Fraction of carbs from fructose
    pub fruc_ratio: f64,
    /// How the product itself states its carb ratio
    pub ratio_label: &'static str,
    /// Ingredient name for the glucose source
    pub glucose_source_label: &'static str,
}

pub const PRECISION: GelRecipe = GelRecipe {
    id: RecipeId::Precision,
    name: "Precision Fuel PF30",
    carbs_per_gel: 30.0,
    malt_ratio: 2.0 / 3.0,
    fruc_ratio: 1.0 / 3.0,
    ratio_label: "2:1 glucose:fructose",
    glucose_source_label: "Maltodextrin",
};

/// Glucose:fructose 1:0.8, i.e. 5:4
pub const MAURTEN: GelRecipe = GelRecipe {
    id: RecipeId::Maurten,
    name: "Maurten GEL 100",
    carbs_per_gel: 25.0,
    malt_ratio: 5.0 / 9.0,
    fruc_ratio: 4.0 / 9.0,
    ratio_label: "0.8:1 fructose:glucose",
    glucose_source_label: "Maltodextrin (Glucose)",
};

pub const SIS: GelRecipe = GelRecipe {
    id: RecipeId::Sis,
    name: "SIS Beta Fuel",
    carbs_per_gel: 40.0,
    malt_ratio: 1.0 / 1.8,
    fruc_ratio: 0.8 / 1.8,
    ratio_label: "1:0.8 maltodextrin:fructose",
    glucose_source_label: "Maltodextrin",
};

impl GelRecipe {
    /// Look up a recipe by selector string
    pub fn by_selector(selector: &str) -> Result<&'static GelRecipe, EngineError> {
        selector.parse::<RecipeId>().map(|id| id.recipe())
    }

    /// Glucose-source to fructose ratio (2.0 for the baseline)
    pub fn glucose_fructose_ratio(&self) -> f64 {
        self.malt_ratio / self.fruc_ratio
    }

    /// Compare this recipe's carb balance against the 2:1 baseline
    pub fn ratio_deviation(&self) -> RatioDeviation {
        let deviation = if self.id.is_baseline() {
            Deviation::Baseline
        } else {
            let percent = (self.glucose_fructose_ratio() - BASELINE_RATIO) / BASELINE_RATIO * 100.0;
            Deviation::Percent((percent * 10.0).round() / 10.0)
        };

        RatioDeviation {
            ratio_label: self.ratio_label,
            deviation,
        }
    }
}

// ============================================================================
// Ratio Deviation
// ============================================================================

/// How far a recipe departs from the baseline ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "percent")]
pub enum Deviation {
    Baseline,
    /// Signed percentage, rounded to one decimal
    Percent(f64),
}

/// Ratio label plus deviation from the baseline, for display only
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioDeviation {
    pub ratio_label: &'static str,
    pub deviation: Deviation,
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deviation::Baseline => write!(f, "Baseline recipe"),
            Deviation::Percent(pct) => write!(f, "{:.1}% deviation from Precision Fuel", pct),
        }
    }
}

impl fmt::Display for RatioDeviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Carb ratio: {} ({})", self.ratio_label, self.deviation)
    }
}
