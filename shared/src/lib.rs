//! DIY Gel Calculator Shared Library
//!
//! This crate contains the recipe computation engine and the types it
//! works with. It performs no I/O; presentation adapters (such as the
//! WASM module) supply inputs and render the results.

pub mod engine;
pub mod errors;
pub mod products;
pub mod recipes;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use engine::{ActivityInput, CalculationRequest, IngredientBreakdown, RecipeEngine};
pub use errors::*;
pub use products::{compare_product_costs, default_products, Product, ProductCost};
pub use recipes::{Deviation, GelRecipe, RatioDeviation, RecipeId};
pub use settings::EngineConfig;
pub use units::{Pace, WeightUnit};
