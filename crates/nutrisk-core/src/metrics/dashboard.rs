use super::{amount, FIBER_KEYS, PROTEIN_KEYS, SODIUM_KEYS, SUGAR_KEYS};
use crate::model::ScannedFood;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5
const ONE_AND_HALF: Decimal = Decimal::from_parts(15, 0, 0, false, 1); // 1.5

/// Per-scan wellness indicators, each on a 0-100 scale where higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub blood_sugar: Decimal,
    pub heart_health: Decimal,
    pub nutrient_balance: Decimal,
    pub inflammation: Decimal,
}

impl Default for HealthMetrics {
    /// Neutral values shown when a scan carries no nutrition data.
    fn default() -> Self {
        HealthMetrics {
            blood_sugar: Decimal::from(75),
            heart_health: Decimal::from(80),
            nutrient_balance: Decimal::from(70),
            inflammation: Decimal::from(65),
        }
    }
}

impl HealthMetrics {
    /// `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, Decimal); 4] {
        [
            ("Blood sugar", self.blood_sugar),
            ("Heart health", self.heart_health),
            ("Nutrient balance", self.nutrient_balance),
            ("Inflammation", self.inflammation),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricBand {
    Excellent,
    Good,
    NeedsAttention,
}

impl MetricBand {
    /// `>= 80` Excellent, `>= 60` Good, otherwise Needs Attention.
    pub fn from_value(value: Decimal) -> MetricBand {
        if value >= Decimal::from(80) {
            MetricBand::Excellent
        } else if value >= Decimal::from(60) {
            MetricBand::Good
        } else {
            MetricBand::NeedsAttention
        }
    }
}

impl fmt::Display for MetricBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricBand::Excellent => write!(f, "Excellent"),
            MetricBand::Good => write!(f, "Good"),
            MetricBand::NeedsAttention => write!(f, "Needs Attention"),
        }
    }
}

/// Wellness indicators for one scanned food.
///
/// Sugar, sodium, fiber and protein feed clamped linear formulas; a food
/// with no nutrition values at all gets [`HealthMetrics::default`].
pub fn health_metrics(food: &ScannedFood) -> HealthMetrics {
    let facts = &food.nutrition_per_100g;
    if facts.is_empty() {
        return HealthMetrics::default();
    }

    let sugar = amount(facts, SUGAR_KEYS);
    let sodium = amount(facts, SODIUM_KEYS);
    let fiber = amount(facts, FIBER_KEYS);
    let protein = amount(facts, PROTEIN_KEYS);

    HealthMetrics {
        blood_sugar: clamp(Decimal::from(90) - sugar * Decimal::TWO, 30, 95),
        heart_health: clamp(Decimal::from(85) - sodium / Decimal::from(50), 40, 95),
        nutrient_balance: clamp(
            Decimal::from(60) + fiber * Decimal::from(3) + protein * HALF,
            50,
            95,
        ),
        inflammation: clamp(
            Decimal::from(75) - sugar * ONE_AND_HALF + fiber * Decimal::TWO,
            30,
            90,
        ),
    }
}

fn clamp(value: Decimal, low: u32, high: u32) -> Decimal {
    value
        .clamp(Decimal::from(low), Decimal::from(high))
        .normalize()
}
