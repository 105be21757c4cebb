use super::{
    amount, CARBOHYDRATE_KEYS, ENERGY_KEYS, FIBER_KEYS, PROTEIN_KEYS, SODIUM_KEYS, SUGAR_KEYS,
};
use crate::model::ScannedFood;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of most recent meals listed in the nutrition trend.
pub const TREND_WINDOW: usize = 7;

const POINT_TWO: Decimal = Decimal::from_parts(2, 0, 0, false, 1);
const POINT_THREE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);
const POINT_FOUR: Decimal = Decimal::from_parts(4, 0, 0, false, 1);
const ONE_POINT_TWO: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::Low => write!(f, "low"),
            RiskBand::Medium => write!(f, "medium"),
            RiskBand::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastMetric {
    pub name: String,
    /// 0-100, rounded.
    pub score: u8,
    pub trend: Trend,
    pub risk: RiskBand,
    pub prediction: String,
    pub recommendation: String,
}

/// One meal's headline values in the recent-meals trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub product_name: String,
    pub sugar_g: Decimal,
    pub sodium_mg: Decimal,
    pub fiber_g: Decimal,
    pub energy_kcal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthForecast {
    pub meals_analyzed: usize,
    pub metrics: Vec<ForecastMetric>,
    /// Up to [`TREND_WINDOW`] most recent meals, oldest first.
    pub recent: Vec<TrendPoint>,
}

struct Averages {
    sugar: Decimal,
    sodium: Decimal,
    fiber: Decimal,
    protein: Decimal,
    carbs: Decimal,
}

impl Averages {
    fn of(meals: &[ScannedFood]) -> Averages {
        let count = Decimal::from(meals.len());
        let mean = |keys: &[&str]| -> Decimal {
            let total: Decimal = meals
                .iter()
                .map(|m| amount(&m.nutrition_per_100g, keys))
                .sum();
            total / count
        };
        Averages {
            sugar: mean(SUGAR_KEYS),
            sodium: mean(SODIUM_KEYS),
            fiber: mean(FIBER_KEYS),
            protein: mean(PROTEIN_KEYS),
            carbs: mean(CARBOHYDRATE_KEYS),
        }
    }
}

/// Forecast wellness trends from the logged meal history.
///
/// Averages every logged meal; a missing nutrient counts as zero. An empty
/// history yields a single neutral "no data" metric.
pub fn forecast(meals: &[ScannedFood]) -> HealthForecast {
    let recent = meals[meals.len().saturating_sub(TREND_WINDOW)..]
        .iter()
        .map(trend_point)
        .collect();

    let metrics = if meals.is_empty() {
        vec![no_data_metric()]
    } else {
        let avg = Averages::of(meals);
        vec![
            blood_sugar_metric(&avg),
            heart_metric(&avg),
            nutrient_balance_metric(&avg),
            inflammation_metric(&avg),
        ]
    };

    HealthForecast {
        meals_analyzed: meals.len(),
        metrics,
        recent,
    }
}

fn no_data_metric() -> ForecastMetric {
    ForecastMetric {
        name: "Blood Sugar Risk".into(),
        score: 50,
        trend: Trend::Stable,
        risk: RiskBand::Low,
        prediction: "No data available - start logging meals for analysis".into(),
        recommendation: "Log your daily meals to get personalized insights".into(),
    }
}

fn blood_sugar_metric(avg: &Averages) -> ForecastMetric {
    let risk = if avg.sugar > Decimal::from(40) {
        RiskBand::High
    } else if avg.sugar > Decimal::from(25) {
        RiskBand::Medium
    } else {
        RiskBand::Low
    };
    let score = Decimal::from(90) - avg.sugar * ONE_POINT_TWO - avg.carbs * POINT_THREE;

    ForecastMetric {
        name: "Blood Sugar Impact".into(),
        score: clamped_score(score, 20, 95),
        trend: if avg.sugar > Decimal::from(30) {
            Trend::Up
        } else {
            Trend::Stable
        },
        risk,
        prediction: format!(
            "Average sugar: {}g, carbs: {}g. {}",
            whole(avg.sugar),
            whole(avg.carbs),
            if risk == RiskBand::High {
                "High diabetes risk"
            } else {
                "Manageable levels"
            }
        ),
        recommendation: if avg.sugar > Decimal::from(25) {
            "Reduce sugary foods, choose complex carbs"
        } else {
            "Good blood sugar control"
        }
        .into(),
    }
}

fn heart_metric(avg: &Averages) -> ForecastMetric {
    let risk = if avg.sodium > Decimal::from(2000) {
        RiskBand::High
    } else if avg.sodium > Decimal::from(1500) {
        RiskBand::Medium
    } else {
        RiskBand::Low
    };
    let score = Decimal::from(85) - avg.sodium / Decimal::from(50) + avg.fiber * Decimal::TWO;

    ForecastMetric {
        name: "Heart Health Score".into(),
        score: clamped_score(score, 30, 95),
        trend: if avg.sodium > Decimal::from(1800) {
            Trend::Down
        } else {
            Trend::Up
        },
        risk,
        prediction: format!(
            "Average sodium: {}mg, fiber: {}g. {}",
            whole(avg.sodium),
            whole(avg.fiber),
            if risk == RiskBand::High {
                "Cardiovascular risk"
            } else {
                "Heart-healthy pattern"
            }
        ),
        recommendation: if avg.sodium > Decimal::from(1500) {
            "Lower sodium, increase vegetables"
        } else {
            "Excellent heart health habits"
        }
        .into(),
    }
}

fn nutrient_balance_metric(avg: &Averages) -> ForecastMetric {
    // no carbohydrate data divides by one
    let divisor = if avg.carbs.is_zero() {
        Decimal::ONE
    } else {
        avg.carbs
    };
    let ratio = avg.protein / divisor;
    let risk = if ratio < POINT_TWO {
        RiskBand::High
    } else if ratio < POINT_FOUR {
        RiskBand::Medium
    } else {
        RiskBand::Low
    };
    let score = Decimal::from(50) + ratio * Decimal::ONE_HUNDRED;

    ForecastMetric {
        name: "Nutrient Balance".into(),
        score: clamped_score(score, 40, 95),
        trend: if ratio > POINT_THREE {
            Trend::Up
        } else {
            Trend::Down
        },
        risk,
        prediction: format!(
            "Protein-carb ratio: {:.2}. {}",
            ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            if risk == RiskBand::Low {
                "Well balanced"
            } else {
                "Needs protein boost"
            }
        ),
        recommendation: if ratio < POINT_THREE {
            "Add more protein sources"
        } else {
            "Great macro balance"
        }
        .into(),
    }
}

fn inflammation_metric(avg: &Averages) -> ForecastMetric {
    let risk = if avg.fiber < Decimal::from(20) {
        RiskBand::High
    } else if avg.fiber < Decimal::from(25) {
        RiskBand::Medium
    } else {
        RiskBand::Low
    };
    let score = Decimal::from(40) + avg.fiber * Decimal::TWO - avg.sodium / Decimal::ONE_HUNDRED;

    ForecastMetric {
        name: "Inflammation Risk".into(),
        score: clamped_score(score, 35, 95),
        trend: if avg.fiber > Decimal::from(25) {
            Trend::Down
        } else {
            Trend::Up
        },
        risk,
        prediction: format!(
            "Average fiber: {}g. {}",
            whole(avg.fiber),
            if risk == RiskBand::Low {
                "Anti-inflammatory diet"
            } else {
                "Pro-inflammatory pattern"
            }
        ),
        recommendation: if avg.fiber < Decimal::from(25) {
            "Eat more fruits, vegetables, whole grains"
        } else {
            "Excellent anti-inflammatory choices"
        }
        .into(),
    }
}

fn trend_point(meal: &ScannedFood) -> TrendPoint {
    let facts = &meal.nutrition_per_100g;
    TrendPoint {
        product_name: meal.product_name.clone(),
        sugar_g: amount(facts, SUGAR_KEYS),
        sodium_mg: amount(facts, SODIUM_KEYS),
        fiber_g: amount(facts, FIBER_KEYS),
        energy_kcal: amount(facts, ENERGY_KEYS),
    }
}

fn whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn clamped_score(value: Decimal, low: u8, high: u8) -> u8 {
    whole(value.clamp(Decimal::from(low), Decimal::from(high)))
        .to_u8()
        .unwrap_or(low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn meal(name: &str, nutrition: &[(&str, Decimal)]) -> ScannedFood {
        ScannedFood {
            product_name: name.into(),
            nutrition_per_100g: nutrition.iter().map(|(k, v)| (*k, *v)).collect(),
            ..Default::default()
        }
    }

    fn metric<'a>(forecast: &'a HealthForecast, name: &str) -> &'a ForecastMetric {
        forecast
            .metrics
            .iter()
            .find(|m| m.name == name)
            .unwrap()
    }

    #[test]
    fn test_empty_history_has_single_no_data_metric() {
        let f = forecast(&[]);
        assert_eq!(f.meals_analyzed, 0);
        assert_eq!(f.metrics.len(), 1);
        assert_eq!(f.metrics[0].score, 50);
        assert_eq!(f.metrics[0].risk, RiskBand::Low);
        assert_eq!(f.metrics[0].trend, Trend::Stable);
        assert!(f.metrics[0].prediction.starts_with("No data available"));
        assert!(f.recent.is_empty());
    }

    #[test]
    fn test_balanced_history() {
        let history = [
            meal("Lentil salad", &[
                ("sugar_g", dec!(4)),
                ("sodium_mg", dec!(300)),
                ("fiber_g", dec!(26)),
                ("protein_g", dec!(12)),
                ("carbohydrate_g", dec!(20)),
            ]),
            meal("Bean bowl", &[
                ("sugar_g", dec!(6)),
                ("sodium_mg", dec!(500)),
                ("fiber_g", dec!(30)),
                ("protein_g", dec!(14)),
                ("carbohydrate_g", dec!(30)),
            ]),
        ];
        let f = forecast(&history);
        assert_eq!(f.meals_analyzed, 2);
        assert_eq!(f.metrics.len(), 4);

        // sugar 5, carbs 25: 90 - 6 - 7.5 = 76.5
        let sugar = metric(&f, "Blood Sugar Impact");
        assert_eq!(sugar.score, 77);
        assert_eq!(sugar.risk, RiskBand::Low);
        assert_eq!(sugar.trend, Trend::Stable);
        assert_eq!(sugar.prediction, "Average sugar: 5g, carbs: 25g. Manageable levels");

        // sodium 400, fiber 28: 85 - 8 + 56 clamps to 95
        let heart = metric(&f, "Heart Health Score");
        assert_eq!(heart.score, 95);
        assert_eq!(heart.trend, Trend::Up);

        // ratio 13 / 25 = 0.52
        let balance = metric(&f, "Nutrient Balance");
        assert_eq!(balance.score, 95);
        assert_eq!(balance.risk, RiskBand::Low);
        assert_eq!(balance.prediction, "Protein-carb ratio: 0.52. Well balanced");

        // 40 + 56 - 4 = 92
        let inflammation = metric(&f, "Inflammation Risk");
        assert_eq!(inflammation.score, 92);
        assert_eq!(inflammation.risk, RiskBand::Low);
        assert_eq!(inflammation.trend, Trend::Down);
    }

    #[test]
    fn test_poor_history_hits_lower_clamps_and_high_risk() {
        let history = [meal("Cola and fries", &[
            ("total_sugar_g", dec!(60)),
            ("sodium_mg", dec!(3000)),
            ("carbohydrate_g", dec!(90)),
            ("protein_g", dec!(3)),
        ])];
        let f = forecast(&history);

        let sugar = metric(&f, "Blood Sugar Impact");
        assert_eq!(sugar.score, 20);
        assert_eq!(sugar.risk, RiskBand::High);
        assert_eq!(sugar.trend, Trend::Up);
        assert!(sugar.prediction.ends_with("High diabetes risk"));

        let heart = metric(&f, "Heart Health Score");
        assert_eq!(heart.score, 30);
        assert_eq!(heart.risk, RiskBand::High);
        assert_eq!(heart.trend, Trend::Down);
        assert_eq!(heart.recommendation, "Lower sodium, increase vegetables");

        let balance = metric(&f, "Nutrient Balance");
        assert_eq!(balance.score, 53);
        assert_eq!(balance.risk, RiskBand::High);

        let inflammation = metric(&f, "Inflammation Risk");
        assert_eq!(inflammation.score, 35);
        assert_eq!(inflammation.risk, RiskBand::High);
    }

    #[test]
    fn test_medium_bands() {
        let f = forecast(&[meal("Granola", &[
            ("sugar_g", dec!(30)),
            ("sodium_mg", dec!(1600)),
            ("fiber_g", dec!(22)),
            ("protein_g", dec!(3)),
            ("carbohydrate_g", dec!(10)),
        ])]);
        assert_eq!(metric(&f, "Blood Sugar Impact").risk, RiskBand::Medium);
        assert_eq!(metric(&f, "Heart Health Score").risk, RiskBand::Medium);
        assert_eq!(metric(&f, "Nutrient Balance").risk, RiskBand::Medium);
        assert_eq!(metric(&f, "Inflammation Risk").risk, RiskBand::Medium);
    }

    #[test]
    fn test_missing_carbohydrates_divide_by_one() {
        let f = forecast(&[meal("Egg", &[("protein_g", dec!(0.25))])]);
        let balance = metric(&f, "Nutrient Balance");
        assert_eq!(balance.score, 75);
        assert_eq!(balance.risk, RiskBand::Medium);
    }

    #[test]
    fn test_recent_keeps_last_seven_meals() {
        let history: Vec<ScannedFood> = (1..=9)
            .map(|i| meal(&format!("Meal {i}"), &[("energy_kcal", Decimal::from(i * 100))]))
            .collect();
        let f = forecast(&history);
        assert_eq!(f.meals_analyzed, 9);
        assert_eq!(f.recent.len(), TREND_WINDOW);
        assert_eq!(f.recent[0].product_name, "Meal 3");
        assert_eq!(f.recent[6].energy_kcal, dec!(900));
        assert_eq!(f.recent[6].sugar_g, Decimal::ZERO);
    }
}
