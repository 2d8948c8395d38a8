//! Input validation functions
//!
//! Validators return `Result<(), String>` with a short message; callers
//! attach the field name through [`ValidationError`] before surfacing it.

/// Validate that a quantity is a finite number strictly greater than zero
pub fn validate_positive(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("must be a valid number".to_string());
    }
    if value <= 0.0 {
        return Err("must be greater than 0".to_string());
    }
    Ok(())
}

/// Validate that a quantity is a finite number and not negative
pub fn validate_non_negative(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("must be a valid number".to_string());
    }
    if value < 0.0 {
        return Err("cannot be negative".to_string());
    }
    Ok(())
}

/// 2^64, the first whole number a `u64` cannot hold
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Convert a rounded, non-negative result into a whole count
///
/// Values a `u64` cannot hold are rejected rather than saturated.
pub fn to_whole_units(value: f64) -> Result<u64, String> {
    validate_non_negative(value)?;
    if value >= U64_LIMIT {
        return Err("result is too large".to_string());
    }
    Ok(value as u64)
}

/// Convert a result to a whole count and attach the field name to the failure
pub fn check_whole(field: &str, value: f64) -> Result<u64, ValidationError> {
    to_whole_units(value).map_err(|message| ValidationError::new(field, &message))
}

/// Validate a field and attach its name to the failure
pub fn check(
    field: &str,
    value: f64,
    validator: fn(f64) -> Result<(), String>,
) -> Result<(), ValidationError> {
    validator(value).map_err(|message| ValidationError::new(field, &message))
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "num_gels" => "Number of Gels",
        "total_volume_ml" => "Total Volume",
        "water_ml" => "Water",
        "gels_needed" => "Gels Needed",
        "weight" => "Body Weight",
        "distance_miles" => "Distance",
        "pace_min_per_mile" => "Pace",
        "total_carbs_g" => "Total Carbs",
        "carbs_per_unit" => "Carbs per Unit",
        "cost_per_unit" => "Cost per Unit",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}
