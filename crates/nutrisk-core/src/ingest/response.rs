use crate::error::NutriskError;
use crate::model::{normalize_ingredient, Ingredient, NutritionFacts, ScannedFood};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const DEFAULT_PRODUCT_NAME: &str = "Food Product";

/// Response document of the label analysis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub ingredient_analysis: Vec<IngredientAnalysis>,
    #[serde(default)]
    pub nutrition: Option<NutritionBlock>,
    #[serde(default)]
    pub nutri_score: Option<NutriScore>,
    #[serde(default)]
    pub fssai: Option<FssaiStatus>,
    #[serde(default)]
    pub recommendations: Vec<ServiceRecommendation>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientAnalysis {
    /// Text as read from the label.
    #[serde(default)]
    pub ingredient: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub risk: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub toxicity_score: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionBlock {
    #[serde(default)]
    pub health_score: Option<Decimal>,
    #[serde(default)]
    pub safety_level: Option<String>,
    #[serde(default)]
    pub total_ingredients: Option<u32>,
    #[serde(default)]
    pub toxic_ingredients: Option<u32>,
    /// Raw values; anything that is not a number is discarded on ingestion.
    #[serde(default, rename = "per100g")]
    pub per_100g: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutriScore {
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub score: Option<Decimal>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FssaiStatus {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRecommendation {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub priority: String,
}

impl AnalysisResponse {
    /// Reshape into the scorer's input.
    ///
    /// Fails only when the service itself reported failure.
    pub fn into_scanned_food(self) -> Result<ScannedFood, NutriskError> {
        if !self.success {
            return Err(NutriskError::AnalysisFailed(
                self.error
                    .unwrap_or_else(|| "service reported failure without a reason".into()),
            ));
        }

        let product_name = self
            .product_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_PRODUCT_NAME)
            .to_string();

        let ingredients = self
            .ingredient_analysis
            .iter()
            .filter_map(IngredientAnalysis::to_ingredient)
            .collect();

        let (nutrition_per_100g, overall_health_score) = match self.nutrition {
            Some(block) => (parse_nutrition(&block.per_100g), block.health_score),
            None => (NutritionFacts::new(), None),
        };

        Ok(ScannedFood {
            product_name,
            ingredients,
            nutrition_per_100g,
            overall_health_score,
        })
    }
}

impl IngredientAnalysis {
    fn to_ingredient(&self) -> Option<Ingredient> {
        let raw = if self.ingredient.trim().is_empty() {
            self.name.trim()
        } else {
            self.ingredient.trim()
        };
        if raw.is_empty() {
            return None;
        }
        Some(Ingredient {
            raw_name: raw.to_string(),
            normalized_name: normalize_ingredient(raw),
            toxicity_score: self.toxicity_score,
        })
    }
}

/// Keep numeric entries (numbers or numeric strings); drop the rest.
pub fn parse_nutrition(raw: &BTreeMap<String, Value>) -> NutritionFacts {
    NutritionFacts::from_json_map(raw)
}
