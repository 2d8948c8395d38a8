//! DIY Gel Calculator WASM Module
//!
//! Browser bindings for the recipe engine. Each export takes the raw
//! values the page collected, runs the engine, and hands back JSON for
//! the page to render. Errors come back as the engine's message string.

use gel_calculator_shared::{
    default_products, ActivityInput, CalculationRequest, EngineError, GelRecipe, IngredientBreakdown,
    Pace, ProductCost, RatioDeviation, RecipeEngine, WeightUnit,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Recipe page result
#[derive(Debug, Clone, Serialize)]
pub struct GelRecipeResponse {
    pub recipe: &'static GelRecipe,
    /// e.g. `500ml volume (5 gels)`
    pub description: String,
    pub ratio: RatioDeviation,
    pub ratio_text: String,
    pub breakdown: IngredientBreakdown,
}

/// Activity page result
#[derive(Debug, Clone, Serialize)]
pub struct ActivityFuelResponse {
    pub duration_hours: f64,
    pub breakdown: IngredientBreakdown,
    pub costs: Vec<ProductCost>,
}

/// Build the recipe page result for a selector and request
pub fn gel_recipe(selector: &str, request: CalculationRequest) -> Result<GelRecipeResponse, EngineError> {
    let recipe = GelRecipe::by_selector(selector)?;
    let engine = RecipeEngine::default();
    let breakdown = engine.compute(recipe, request)?;
    let ratio = engine.ratio_deviation(recipe);

    Ok(GelRecipeResponse {
        recipe,
        description: engine.describe_request(request),
        ratio_text: ratio.to_string(),
        ratio,
        breakdown,
    })
}

/// Build the activity page result, including the cost comparison
pub fn activity_fuel(
    weight: f64,
    unit: &str,
    distance_miles: f64,
    pace_min_per_mile: f64,
) -> Result<ActivityFuelResponse, EngineError> {
    // The page sends exactly "kg" or "lbs"; anything else is pounds
    let weight_unit = if unit == "kg" { WeightUnit::Kg } else { WeightUnit::Lbs };
    let activity = ActivityInput::new(
        weight,
        weight_unit,
        distance_miles,
        Pace::from_minutes(pace_min_per_mile),
    );

    let engine = RecipeEngine::default();
    let breakdown = engine.compute_from_activity(&activity)?;
    let costs = engine.compare_product_costs(breakdown.total_carbs_g, &default_products())?;

    Ok(ActivityFuelResponse {
        duration_hours: activity.duration_hours(),
        breakdown,
        costs,
    })
}

fn to_json<T: Serialize>(result: Result<T, EngineError>) -> Result<String, JsValue> {
    let value = result.map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Recipe for a number of gels, as JSON
#[wasm_bindgen]
pub fn gel_recipe_json(selector: &str, num_gels: f64) -> Result<String, JsValue> {
    to_json(gel_recipe(selector, CalculationRequest::GelCount(num_gels)))
}

/// Recipe for a finished volume in ml, as JSON
#[wasm_bindgen]
pub fn gel_recipe_from_volume_json(selector: &str, volume_ml: f64) -> Result<String, JsValue> {
    to_json(gel_recipe(selector, CalculationRequest::Volume(volume_ml)))
}

/// Activity fueling plus product cost comparison, as JSON
#[wasm_bindgen]
pub fn activity_fuel_json(
    weight: f64,
    unit: &str,
    distance_miles: f64,
    pace_min_per_mile: f64,
) -> Result<String, JsValue> {
    to_json(activity_fuel(weight, unit, distance_miles, pace_min_per_mile))
}

/// Ratio line for the page header
#[wasm_bindgen]
pub fn ratio_deviation_text(selector: &str) -> Result<String, JsValue> {
    GelRecipe::by_selector(selector)
        .map(|recipe| recipe.ratio_deviation().to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Volume to prefill when switching to volume entry
#[wasm_bindgen]
pub fn estimate_volume_for_gels(num_gels: f64) -> f64 {
    RecipeEngine::default().estimate_volume_for_gels(num_gels)
}

/// Gel count to prefill when switching to gel-count entry
#[wasm_bindgen]
pub fn estimate_gels_for_volume(volume_ml: f64) -> f64 {
    RecipeEngine::default().estimate_gels_for_volume(volume_ml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gel_calculator_shared::RecipeId;

    #[test]
    fn test_gel_recipe_by_count() {
        let resp = gel_recipe("precision", CalculationRequest::GelCount(10.0)).unwrap();
        assert_eq!(resp.recipe.id, RecipeId::Precision);
        assert_eq!(resp.description, "10 gels");
        assert_eq!(resp.ratio_text, "Carb ratio: 2:1 glucose:fructose (Baseline recipe)");
        assert_eq!(resp.breakdown.total_volume_ml, 652);
    }

    #[test]
    fn test_gel_recipe_by_volume() {
        let resp = gel_recipe("sis", CalculationRequest::Volume(500.0)).unwrap();
        assert_eq!(resp.description, "500ml volume (5 gels)");
        assert_eq!(resp.breakdown.total_carbs_g, 200.0);
    }

    #[test]
    fn test_unknown_recipe() {
        let err = gel_recipe("gu", CalculationRequest::GelCount(10.0)).unwrap_err();
        assert_eq!(err, EngineError::UnknownRecipe("gu".to_string()));
    }

    #[test]
    fn test_invalid_count() {
        let err = gel_recipe("maurten", CalculationRequest::GelCount(0.0)).unwrap_err();
        assert_eq!(err.field(), Some("num_gels"));
    }

    #[test]
    fn test_activity_fuel() {
        let resp = activity_fuel(170.0, "lbs", 10.0, 8.0).unwrap();
        assert!((resp.duration_hours - 80.0 / 60.0).abs() < 1e-9);
        assert_eq!(resp.costs.len(), 3);
        // ~102.8 g carbs -> 4 DIY gels, 3 Maurten
        assert_eq!(resp.costs[0].gels_needed, 4);
        assert_eq!(resp.costs[2].gels_needed, 3);
    }

    #[test]
    fn test_only_exact_kg_selects_kilograms() {
        let kg = activity_fuel(70.0, "kg", 10.0, 8.0).unwrap();
        let lbs = activity_fuel(70.0, "lbs", 10.0, 8.0).unwrap();
        assert!(kg.breakdown.total_carbs_g > lbs.breakdown.total_carbs_g);

        for unit in ["KG", "kilogram", " kg", "stone"] {
            let resp = activity_fuel(70.0, unit, 10.0, 8.0).unwrap();
            assert_eq!(resp.breakdown.total_carbs_g, lbs.breakdown.total_carbs_g, "{}", unit);
        }
    }

    #[test]
    fn test_activity_fuel_json_shape() {
        let resp = activity_fuel(70.0, "kg", 10.0, 8.0).unwrap();
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert!(json["breakdown"]["carbs_per_hour"].is_number());
        assert_eq!(json["costs"][0]["name"], "DIY Gel");
    }

    #[test]
    fn test_estimates() {
        assert_eq!(estimate_volume_for_gels(10.0), 1000.0);
        assert_eq!(estimate_gels_for_volume(500.0), 5.0);
    }
}
