//! Wellness indicators derived from nutrition values.
//!
//! These are informational and never affect the risk report. Unlike the
//! scorer, a missing nutrient counts as zero here.

pub mod dashboard;
pub mod forecast;

use crate::model::NutritionFacts;
use rust_decimal::Decimal;

pub use dashboard::{health_metrics, HealthMetrics, MetricBand};
pub use forecast::{forecast, ForecastMetric, HealthForecast, RiskBand, Trend, TrendPoint};

pub const SUGAR_KEYS: &[&str] = crate::rules::builtin::SUGAR_KEYS;
pub const SODIUM_KEYS: &[&str] = crate::rules::builtin::SODIUM_KEYS;
pub const FIBER_KEYS: &[&str] = &["fiber_g"];
pub const PROTEIN_KEYS: &[&str] = &["protein_g"];
pub const CARBOHYDRATE_KEYS: &[&str] = &["carbohydrate_g"];
pub const ENERGY_KEYS: &[&str] = &["energy_kcal"];

/// First available value among `keys`, or zero.
fn amount(facts: &NutritionFacts, keys: &[&str]) -> Decimal {
    facts
        .first_available(keys)
        .map(|(_, value)| value)
        .unwrap_or(Decimal::ZERO)
}
