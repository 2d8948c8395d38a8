//! Integration tests for the recipe engine through the public API

use gel_calculator_shared::{
    compare_product_costs, default_products, ActivityInput, CalculationRequest, Deviation,
    EngineConfig, EngineError, GelRecipe, Pace, RecipeEngine, RecipeId, WeightUnit,
};
use rstest::rstest;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_precision_reference_batch() {
    init_tracing();
    let engine = RecipeEngine::default();
    let recipe = GelRecipe::by_selector("precision").unwrap();

    let b = engine.compute_from_gel_count(recipe, 10.0).unwrap();

    assert_eq!(b.total_carbs_g, 300.0);
    assert!((b.maltodextrin_g - 200.0).abs() < 1e-9);
    assert!((b.fructose_g - 100.0).abs() < 1e-9);
    assert!((b.citric_acid_g - 1.2).abs() < 1e-9);
    assert_eq!(b.sodium_mg_total, 3000.0);
    assert!((b.table_salt_g - 7.69).abs() < 0.01);
    assert_eq!(b.water_ml, 462);
    assert_eq!(b.total_volume_ml, 652);
}

#[test]
fn test_volume_request_matches_gel_request() {
    let engine = RecipeEngine::default();
    let recipe = RecipeId::Precision.recipe();

    assert_eq!(
        engine.compute(recipe, CalculationRequest::Volume(500.0)).unwrap(),
        engine.compute(recipe, CalculationRequest::GelCount(5.0)).unwrap()
    );
}

#[rstest]
#[case("precision")]
#[case("maurten")]
#[case("sis")]
fn test_zero_and_negative_requests_fail(#[case] selector: &str) {
    let engine = RecipeEngine::default();
    let recipe = GelRecipe::by_selector(selector).unwrap();

    for request in [
        CalculationRequest::GelCount(0.0),
        CalculationRequest::GelCount(-4.0),
        CalculationRequest::Volume(0.0),
        CalculationRequest::Volume(-100.0),
    ] {
        let err = engine.compute(recipe, request).unwrap_err();
        assert!(matches!(err, EngineError::InvalidQuantity(_)), "{:?}", request);
    }
}

#[test]
fn test_unknown_selector_is_distinct_error() {
    let err = GelRecipe::by_selector("precison").unwrap_err();
    assert!(matches!(err, EngineError::UnknownRecipe(_)));
}

#[test]
fn test_ratio_deviation_per_recipe() {
    let engine = RecipeEngine::default();
    assert_eq!(
        engine.ratio_deviation(RecipeId::Precision.recipe()).deviation,
        Deviation::Baseline
    );
    for id in [RecipeId::Maurten, RecipeId::Sis] {
        let recipe = id.recipe();
        let expected = ((recipe.malt_ratio / recipe.fruc_ratio - 2.0) / 2.0 * 100.0 * 10.0).round() / 10.0;
        match engine.ratio_deviation(recipe).deviation {
            Deviation::Percent(pct) => {
                assert_ne!(pct, 0.0);
                assert_eq!(pct, expected);
            }
            Deviation::Baseline => panic!("{} should not be the baseline", id),
        }
    }
}

#[test]
fn test_ingredient_weights_independent_of_volume_factors() {
    // Changing the displacement factors moves the volume estimate only
    let default_engine = RecipeEngine::default();
    let heavy_engine = RecipeEngine::new(EngineConfig {
        volume_ml_per_g_carbs: 1.0,
        volume_ml_per_g_salt: 1.0,
        volume_ml_per_g_citric: 1.0,
        ..EngineConfig::default()
    });
    let recipe = RecipeId::Sis.recipe();

    let a = default_engine.compute_from_gel_count(recipe, 6.0).unwrap();
    let b = heavy_engine.compute_from_gel_count(recipe, 6.0).unwrap();

    assert_eq!(a.dry_weight_g(), b.dry_weight_g());
    assert_eq!(a.water_ml, b.water_ml);
    assert!(b.total_volume_ml > a.total_volume_ml);
}

#[test]
fn test_activity_to_cost_comparison() {
    init_tracing();
    let engine = RecipeEngine::default();
    let activity = ActivityInput::new(
        170.0,
        WeightUnit::Lbs,
        26.2,
        "9:00".parse::<Pace>().unwrap(),
    );

    let b = engine.compute_from_activity(&activity).unwrap();
    // 77.11 kg over 3.93 h
    assert!((b.total_carbs_g - 77.11064 * 26.2 * 9.0 / 60.0).abs() < 1e-6);
    assert!((b.carbs_per_hour.unwrap() - 77.11064).abs() < 1e-6);

    let costs = compare_product_costs(b.total_carbs_g, &default_products()).unwrap();
    for (cost, product) in costs.iter().zip(default_products()) {
        let exact = b.total_carbs_g / product.carbs_per_unit;
        assert!(cost.gels_needed as f64 >= exact);
        assert!((cost.gels_needed as f64) < exact + 1.0);
    }
}

#[test]
fn test_activity_ignores_recipe_ratios() {
    let engine = RecipeEngine::default();
    let activity = ActivityInput::new(60.0, WeightUnit::Kg, 5.0, Pace::default());
    let b = engine.compute_from_activity(&activity).unwrap();
    assert!((b.maltodextrin_g / b.fructose_g - 2.0).abs() < 1e-9);
}

#[test]
fn test_config_from_toml_feeds_engine() {
    let config = EngineConfig::from_toml_str(
        r#"
        sodium_mg_per_30g_carbs = 450.0
        "#,
    )
    .unwrap();
    let engine = RecipeEngine::new(config);
    let b = engine
        .compute_from_gel_count(RecipeId::Precision.recipe(), 1.0)
        .unwrap();
    assert_eq!(b.sodium_mg_total, 450.0);
}

#[test]
fn test_breakdown_serializes_to_json() {
    let engine = RecipeEngine::default();
    let b = engine
        .compute_from_gel_count(RecipeId::Maurten.recipe(), 2.0)
        .unwrap();
    let json = serde_json::to_value(&b).unwrap();
    assert_eq!(json["recipe"], "maurten");
    assert_eq!(json["water_ml"], 77);
    assert!(json["carbs_per_hour"].is_null());
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    std::io::Write::write_all(&mut file, contents.as_bytes()).unwrap();
    file
}

// One test owns every `load` call: the environment is process-wide
#[test]
fn test_load_layers_file_then_environment() {
    init_tracing();
    let file = write_config(
        r#"
        fueling_rate_g_per_kg_h = 1.3
        sodium_mg_per_g_salt = 400.0
        "#,
    );

    let from_file = EngineConfig::load(Some(file.path())).unwrap();
    assert_eq!(from_file.fueling_rate_g_per_kg_h, 1.3);
    assert_eq!(from_file.sodium_mg_per_g_salt, 400.0);
    assert_eq!(from_file.carbs_g_per_100ml, EngineConfig::default().carbs_g_per_100ml);

    std::env::set_var("GEL__FUELING_RATE_G_PER_KG_H", "1.7");
    let with_env = EngineConfig::load(Some(file.path()));
    std::env::remove_var("GEL__FUELING_RATE_G_PER_KG_H");
    let with_env = with_env.unwrap();
    assert_eq!(with_env.fueling_rate_g_per_kg_h, 1.7);
    assert_eq!(with_env.sodium_mg_per_g_salt, 400.0);

    let missing = file.path().with_file_name("gel-calculator-missing.toml");
    assert_eq!(EngineConfig::load(Some(&missing)).unwrap(), EngineConfig::default());

    let invalid = write_config("carbs_g_per_100ml = 0.0\n");
    let err = EngineConfig::load(Some(invalid.path())).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}
