//! Unit conversion and normalization module
//!
//! Activity inputs arrive in whatever unit the runner thinks in. The
//! engine works in kilograms, miles, and decimal minutes per mile, so
//! conversion happens here, on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Pounds to kilograms
pub const KG_PER_LB: f64 = 0.453592;

// ============================================================================
// Weight Units
// ============================================================================

/// Body weight unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg / KG_PER_LB,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

// ============================================================================
// Pace
// ============================================================================

/// Slowest and fastest whole minutes offered by the pace picker
pub const PACE_PICKER_MINUTES: std::ops::RangeInclusive<u32> = 6..=15;

/// Seconds step of the pace picker
pub const PACE_PICKER_STEP_SECS: u32 = 15;

/// `m:ss`, compiled once on first use
fn pace_pattern() -> &'static regex_lite::Regex {
    static PACE_PATTERN: OnceLock<regex_lite::Regex> = OnceLock::new();
    PACE_PATTERN.get_or_init(|| regex_lite::Regex::new(r"^(\d{1,3}):([0-5]\d)$").expect("pace pattern is valid"))
}

/// Running pace in decimal minutes per mile
///
/// `8:15` per mile is stored as `8.25`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pace(f64);

impl Pace {
    /// Pace from decimal minutes per mile
    pub fn from_minutes(minutes: f64) -> Self {
        Self(minutes)
    }

    /// Pace from whole minutes and seconds per mile
    pub fn from_min_sec(minutes: u32, seconds: u32) -> Self {
        Self(minutes as f64 + seconds as f64 / 60.0)
    }

    /// Decimal minutes per mile
    pub fn minutes_per_mile(&self) -> f64 {
        self.0
    }

    /// Every pace the picker offers, 6:00 through 15:45 in 15 second steps
    pub fn picker_options() -> Vec<Pace> {
        PACE_PICKER_MINUTES
            .flat_map(|min| {
                (0..60)
                    .step_by(PACE_PICKER_STEP_SECS as usize)
                    .map(move |sec| Pace::from_min_sec(min, sec))
            })
            .collect()
    }
}

impl Default for Pace {
    /// 8:00 per mile
    fn default() -> Self {
        Self(8.0)
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = (self.0 * 60.0).round().max(0.0) as u64;
        write!(f, "{}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl std::str::FromStr for Pace {
    type Err = String;

    /// Parse `m:ss` (e.g. `8:15`) or plain decimal minutes (e.g. `8.25`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(caps) = pace_pattern().captures(s) {
            let minutes: u32 = caps[1]
                .parse()
                .map_err(|_| format!("Invalid pace: {}", s))?;
            let seconds: u32 = caps[2]
                .parse()
                .map_err(|_| format!("Invalid pace: {}", s))?;
            return Ok(Pace::from_min_sec(minutes, seconds));
        }
        s.parse::<f64>()
            .map(Pace::from_minutes)
            .map_err(|_| format!("Invalid pace: {}", s))
    }
}

// ============================================================================
// Distance Picker
// ============================================================================

/// Whole miles offered by the distance picker
pub const DISTANCE_PICKER_MILES: std::ops::RangeInclusive<u32> = 1..=100;

/// Combine the whole-mile and tenths selections of the distance picker
///
/// Tenths above 9 are clamped.
pub fn distance_from_picker(whole_miles: u32, tenths: u32) -> f64 {
    whole_miles as f64 + tenths.min(9) as f64 / 10.0
}
