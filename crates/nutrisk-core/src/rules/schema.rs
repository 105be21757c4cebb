use rust_decimal::Decimal;
use serde::Serialize;

/// One numeric comparison within a condition rule.
#[derive(Debug, Clone, Serialize)]
pub struct NutrientCheck {
    /// Human-readable nutrient name used in finding messages.
    pub nutrient: &'static str,
    /// Acceptable nutrition keys, in order of preference.
    pub synonyms: &'static [&'static str],
    /// The check fires when the value is strictly greater than this.
    pub threshold: u32,
    pub unit: &'static str,
}

impl NutrientCheck {
    pub fn threshold(&self) -> Decimal {
        Decimal::from(self.threshold)
    }
}

/// A health condition mapped to the nutrition checks that conflict with it.
///
/// The rule fires when any of its checks fires.
#[derive(Debug, Clone, Serialize)]
pub struct ConditionRule {
    pub id: &'static str,
    pub name: &'static str,
    /// Lowercase fragments; a profile condition containing any of them selects this rule.
    pub keywords: &'static [&'static str],
    pub checks: &'static [NutrientCheck],
    pub title: &'static str,
    pub recommendation: &'static str,
}

impl ConditionRule {
    /// Substring match against an already-lowercased condition string.
    pub fn applies_to(&self, condition: &str) -> bool {
        self.keywords.iter().any(|k| condition.contains(k))
    }
}
