use super::schema::{ConditionRule, NutrientCheck};

pub const SUGAR_KEYS: &[&str] = &["total_sugar_g", "sugar_g"];
pub const SATURATED_FAT_KEYS: &[&str] = &["saturated_fat_g"];
pub const TOTAL_FAT_KEYS: &[&str] = &["total_fat_g", "fat_g"];
pub const SODIUM_KEYS: &[&str] = &["sodium_mg"];

/// Condition rules in evaluation order.
pub static CONDITION_RULES: &[ConditionRule] = &[
    ConditionRule {
        id: "diabetes",
        name: "Diabetes",
        keywords: &["diabetes"],
        checks: &[NutrientCheck {
            nutrient: "sugar",
            synonyms: SUGAR_KEYS,
            threshold: 10,
            unit: "g",
        }],
        title: "DIABETES WARNING",
        recommendation: "This product may cause blood sugar spikes. Limit consumption or avoid if managing diabetes strictly.",
    },
    ConditionRule {
        id: "cholesterol",
        name: "High cholesterol / heart disease",
        keywords: &["cholesterol", "heart"],
        checks: &[
            NutrientCheck {
                nutrient: "saturated fat",
                synonyms: SATURATED_FAT_KEYS,
                threshold: 5,
                unit: "g",
            },
            NutrientCheck {
                nutrient: "fat",
                synonyms: TOTAL_FAT_KEYS,
                threshold: 15,
                unit: "g",
            },
        ],
        title: "CHOLESTEROL WARNING",
        recommendation: "High fat foods may worsen cholesterol levels. Consider limiting portion size or choosing lower-fat alternatives.",
    },
    ConditionRule {
        id: "hypertension",
        name: "Hypertension",
        keywords: &["hypertension", "blood pressure"],
        checks: &[NutrientCheck {
            nutrient: "sodium",
            synonyms: SODIUM_KEYS,
            threshold: 400,
            unit: "mg",
        }],
        title: "HIGH SODIUM WARNING",
        recommendation: "High sodium intake may raise blood pressure and strain the heart. Choose low-sodium alternatives where possible.",
    },
];
