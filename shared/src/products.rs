//! Product cost comparison
//!
//! Given the carbs an activity needs, work out how many units of each
//! product cover it and what that costs. The product list is supplied
//! by the caller; [`default_products`] is the list the calculator ships.

use crate::errors::{EngineError, EngineResult};
use crate::validation::{check, check_whole, validate_non_negative, validate_positive};
use serde::{Deserialize, Serialize};

/// A purchasable carb source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Grams of carbs in one unit
    pub carbs_per_unit: f64,
    /// Price of one unit (USD)
    pub cost_per_unit: f64,
    /// Home-made gel; presentation hides the unit count for it
    #[serde(default)]
    pub is_diy: bool,
}

impl Product {
    pub fn new(name: &str, carbs_per_unit: f64, cost_per_unit: f64) -> Self {
        Self {
            name: name.to_string(),
            carbs_per_unit,
            cost_per_unit,
            is_diy: false,
        }
    }

    pub fn diy(name: &str, carbs_per_unit: f64, cost_per_unit: f64) -> Self {
        Self {
            is_diy: true,
            ..Self::new(name, carbs_per_unit, cost_per_unit)
        }
    }
}

/// Cost of covering a carb total with one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCost {
    pub name: String,
    pub gels_needed: u64,
    pub total_cost: f64,
    pub is_diy: bool,
}

/// Products compared on the activity page
pub fn default_products() -> Vec<Product> {
    vec![
        Product::diy("DIY Gel", 30.0, 0.32),
        Product::new("Precision Gels", 30.0, 2.88),
        Product::new("Maurten GEL 100", 40.0, 4.50),
    ]
}

/// Cost each product needs to cover `total_carbs_g`
///
/// Unit counts are always rounded up. Results keep the order of
/// `products`.
pub fn compare_product_costs(total_carbs_g: f64, products: &[Product]) -> EngineResult<Vec<ProductCost>> {
    check("total_carbs_g", total_carbs_g, validate_positive)?;

    products
        .iter()
        .map(|product| {
            check("carbs_per_unit", product.carbs_per_unit, validate_positive)?;
            check("cost_per_unit", product.cost_per_unit, validate_non_negative)?;

            let gels_needed = check_whole("gels_needed", (total_carbs_g / product.carbs_per_unit).ceil())?;
            Ok(ProductCost {
                name: product.name.clone(),
                gels_needed,
                total_cost: gels_needed as f64 * product.cost_per_unit,
                is_diy: product.is_diy,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()
}
