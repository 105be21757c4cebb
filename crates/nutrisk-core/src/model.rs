use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Nutrient keys the label analysis service is known to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    EnergyKcal,
    ProteinG,
    CarbohydrateG,
    TotalFatG,
    SaturatedFatG,
    TransFatG,
    SodiumMg,
    TotalSugarG,
    AddedSugarG,
    FiberG,
    CholesterolMg,
}

impl NutrientKey {
    pub const ALL: [NutrientKey; 11] = [
        NutrientKey::EnergyKcal,
        NutrientKey::ProteinG,
        NutrientKey::CarbohydrateG,
        NutrientKey::TotalFatG,
        NutrientKey::SaturatedFatG,
        NutrientKey::TransFatG,
        NutrientKey::SodiumMg,
        NutrientKey::TotalSugarG,
        NutrientKey::AddedSugarG,
        NutrientKey::FiberG,
        NutrientKey::CholesterolMg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKey::EnergyKcal => "energy_kcal",
            NutrientKey::ProteinG => "protein_g",
            NutrientKey::CarbohydrateG => "carbohydrate_g",
            NutrientKey::TotalFatG => "total_fat_g",
            NutrientKey::SaturatedFatG => "saturated_fat_g",
            NutrientKey::TransFatG => "trans_fat_g",
            NutrientKey::SodiumMg => "sodium_mg",
            NutrientKey::TotalSugarG => "total_sugar_g",
            NutrientKey::AddedSugarG => "added_sugar_g",
            NutrientKey::FiberG => "fiber_g",
            NutrientKey::CholesterolMg => "cholesterol_mg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NutrientKey::EnergyKcal => "Energy",
            NutrientKey::ProteinG => "Protein",
            NutrientKey::CarbohydrateG => "Carbohydrate",
            NutrientKey::TotalFatG => "Total fat",
            NutrientKey::SaturatedFatG => "Saturated fat",
            NutrientKey::TransFatG => "Trans fat",
            NutrientKey::SodiumMg => "Sodium",
            NutrientKey::TotalSugarG => "Total sugars",
            NutrientKey::AddedSugarG => "Added sugars",
            NutrientKey::FiberG => "Fiber",
            NutrientKey::CholesterolMg => "Cholesterol",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            NutrientKey::EnergyKcal => "kcal",
            NutrientKey::SodiumMg | NutrientKey::CholesterolMg => "mg",
            _ => "g",
        }
    }

    pub fn from_key(key: &str) -> Option<NutrientKey> {
        NutrientKey::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Nutrition values per 100 g, keyed by the service's nutrient key.
///
/// A key that is absent is unknown, never zero. Deserializing drops `null`
/// and non-numeric values rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NutritionFacts(BTreeMap<String, Decimal>);

impl NutritionFacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep numeric entries (numbers or numeric strings); drop the rest.
    pub fn from_json_map(raw: &BTreeMap<String, Value>) -> Self {
        raw.iter()
            .filter_map(|(key, value)| decimal_from_json(value).map(|d| (key.as_str(), d)))
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Decimal) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).copied()
    }

    /// Returns the first key from `keys` that has a value, with that value.
    pub fn first_available<'k>(&self, keys: &[&'k str]) -> Option<(&'k str, Decimal)> {
        keys.iter()
            .find_map(|k| self.get(k).map(|value| (*k, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<'de> Deserialize<'de> for NutritionFacts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
        Ok(raw.map(|m| Self::from_json_map(&m)).unwrap_or_default())
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for NutritionFacts {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        NutritionFacts(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToxicityBand {
    Low,
    Medium,
    High,
}

impl ToxicityBand {
    pub fn from_score(score: Decimal) -> ToxicityBand {
        if score > Decimal::from(60) {
            ToxicityBand::High
        } else if score > Decimal::from(30) {
            ToxicityBand::Medium
        } else {
            ToxicityBand::Low
        }
    }
}

impl fmt::Display for ToxicityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToxicityBand::Low => write!(f, "low"),
            ToxicityBand::Medium => write!(f, "medium"),
            ToxicityBand::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IngredientRecord")]
pub struct Ingredient {
    /// Name as it appeared on the label.
    pub raw_name: String,
    pub normalized_name: String,
    /// 0-100, higher is worse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toxicity_score: Option<Decimal>,
}

impl Ingredient {
    pub fn new(raw_name: impl Into<String>) -> Self {
        let raw_name = raw_name.into();
        Ingredient {
            normalized_name: normalize_ingredient(&raw_name),
            raw_name,
            toxicity_score: None,
        }
    }

    pub fn toxicity_band(&self) -> Option<ToxicityBand> {
        self.toxicity_score.map(ToxicityBand::from_score)
    }
}

/// Stored ingredient shape; only the raw name is expected.
#[derive(Deserialize)]
struct IngredientRecord {
    #[serde(default)]
    raw_name: Option<String>,
    #[serde(default)]
    normalized_name: Option<String>,
    #[serde(default)]
    toxicity_score: Option<Decimal>,
}

impl From<IngredientRecord> for Ingredient {
    fn from(record: IngredientRecord) -> Self {
        let raw_name = record.raw_name.unwrap_or_default();
        let normalized_name = record
            .normalized_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| normalize_ingredient(&raw_name));
        Ingredient {
            raw_name,
            normalized_name,
            toxicity_score: record.toxicity_score,
        }
    }
}

/// The structured result of analysing one food label image.
///
/// Every field is optional when loading; absent or `null` values become empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedFood {
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub nutrition_per_100g: NutritionFacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_health_score: Option<Decimal>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Lowercase, trim, and collapse runs of whitespace to a single space.
pub fn normalize_ingredient(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_ingredient() {
        assert_eq!(normalize_ingredient("  Peanut   Oil "), "peanut oil");
        assert_eq!(normalize_ingredient("SUGAR"), "sugar");
        assert_eq!(normalize_ingredient("   "), "");
    }

    #[test]
    fn test_first_available_prefers_earlier_key() {
        let facts: NutritionFacts = [("sugar_g", dec!(4)), ("total_sugar_g", dec!(12))]
            .into_iter()
            .collect();
        assert_eq!(
            facts.first_available(&["total_sugar_g", "sugar_g"]),
            Some(("total_sugar_g", dec!(12)))
        );
    }

    #[test]
    fn test_first_available_falls_back() {
        let facts: NutritionFacts = [("sugar_g", dec!(4))].into_iter().collect();
        assert_eq!(
            facts.first_available(&["total_sugar_g", "sugar_g"]),
            Some(("sugar_g", dec!(4)))
        );
        assert_eq!(facts.first_available(&["sodium_mg"]), None);
    }

    #[test]
    fn test_toxicity_band() {
        assert_eq!(ToxicityBand::from_score(dec!(10)), ToxicityBand::Low);
        assert_eq!(ToxicityBand::from_score(dec!(30)), ToxicityBand::Low);
        assert_eq!(ToxicityBand::from_score(dec!(40)), ToxicityBand::Medium);
        assert_eq!(ToxicityBand::from_score(dec!(70)), ToxicityBand::High);
    }

    #[test]
    fn test_nutrient_key_round_trip_names() {
        for key in NutrientKey::ALL {
            assert_eq!(NutrientKey::from_key(key.as_str()), Some(key));
        }
        assert_eq!(NutrientKey::from_key("sugar_g"), None);
    }

    #[test]
    fn test_scanned_food_accepts_sparse_json() {
        let food: ScannedFood = serde_json::from_str(r#"{ "product_name": "Crackers" }"#).unwrap();
        assert!(food.ingredients.is_empty());
        assert!(food.nutrition_per_100g.is_empty());
        assert_eq!(food.overall_health_score, None);
    }

    #[test]
    fn test_scanned_food_without_product_name() {
        let food: ScannedFood =
            serde_json::from_str(r#"{ "ingredients": [], "nutrition_per_100g": {} }"#).unwrap();
        assert_eq!(food.product_name, "");
        assert!(food.ingredients.is_empty());
    }

    #[test]
    fn test_null_fields_load_as_empty() {
        let food: ScannedFood = serde_json::from_str(
            r#"{ "product_name": null, "ingredients": null, "nutrition_per_100g": null }"#,
        )
        .unwrap();
        assert_eq!(food, ScannedFood::default());
    }

    #[test]
    fn test_ingredient_normalized_name_derived_when_absent() {
        let food: ScannedFood = serde_json::from_str(
            r#"{ "product_name": "x", "ingredients": [
                { "raw_name": "  Roasted  PEANUT " },
                { "raw_name": "Salt", "normalized_name": "" },
                { "toxicity_score": 12 }
            ] }"#,
        )
        .unwrap();
        assert_eq!(food.ingredients[0].normalized_name, "roasted peanut");
        assert_eq!(food.ingredients[1].normalized_name, "salt");
        assert_eq!(food.ingredients[2].raw_name, "");
        assert_eq!(food.ingredients[2].toxicity_score, Some(dec!(12)));
    }

    #[test]
    fn test_null_and_non_numeric_nutrients_dropped() {
        let food: ScannedFood = serde_json::from_str(
            r#"{ "product_name": "x", "nutrition_per_100g": {
                "sugar_g": null, "sodium_mg": "n/a", "fiber_g": "2.5", "protein_g": 7
            } }"#,
        )
        .unwrap();
        let facts = &food.nutrition_per_100g;
        assert_eq!(facts.len(), 2);
        assert_eq!(facts.get("sugar_g"), None);
        assert_eq!(facts.get("fiber_g"), Some(dec!(2.5)));
        assert_eq!(facts.get("protein_g"), Some(dec!(7)));
    }

    #[test]
    fn test_stored_food_survives_serialization() {
        let mut food = ScannedFood {
            product_name: "Oat Bar".into(),
            ingredients: vec![Ingredient::new("Rolled Oats")],
            ..Default::default()
        };
        food.nutrition_per_100g.insert("total_sugar_g", dec!(12.5));
        let json = serde_json::to_string(&food).unwrap();
        let back: ScannedFood = serde_json::from_str(&json).unwrap();
        assert_eq!(back, food);
    }
}
