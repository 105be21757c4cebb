use crate::model::ScannedFood;
use crate::profile::HealthProfile;
use crate::score::RiskReport;

/// Preamble sent ahead of the prompt to text-generation backends.
pub const SYSTEM_PREAMBLE: &str = "You are a helpful assistant for a food label analysis app. \
Give practical, friendly nutrition guidance. You are not a doctor: recommend consulting a \
healthcare professional for medical decisions.";

/// Build the advisory prompt for one assessment.
///
/// The output depends only on the inputs: nutrition keys are listed in
/// sorted order and findings in report order.
pub fn build_prompt(food: &ScannedFood, profile: &HealthProfile, report: &RiskReport) -> String {
    let ingredients: Vec<&str> = food
        .ingredients
        .iter()
        .map(|i| i.raw_name.as_str())
        .collect();
    let nutrition: Vec<String> = food
        .nutrition_per_100g
        .iter()
        .map(|(k, v)| format!("{}={}", k, v.normalize()))
        .collect();

    let mut lines = vec![
        "User Health Profile:".to_string(),
        format!("- Allergies: {}", list_or_none(&profile.allergies)),
        format!(
            "- Health Conditions: {}",
            list_or_none(&profile.health_conditions)
        ),
        format!(
            "- Dietary Restrictions: {}",
            list_or_none(&profile.dietary_restrictions)
        ),
        String::new(),
        "Scanned Food Product:".to_string(),
        format!("- Product: {}", food.product_name),
        format!("- Ingredients: {}", join_or_unavailable(&ingredients)),
        format!("- Nutrition per 100g: {}", join_or_unavailable(&nutrition)),
        String::new(),
        format!(
            "Risk Analysis Results (overall: {}, safety score {}/100):",
            report.overall_level, report.safety_score
        ),
    ];
    lines.extend(
        report
            .findings
            .iter()
            .map(|f| format!("- {}: {}", f.title, f.message)),
    );

    let mut out = lines.join("\n");
    out.push_str(
        "\n\nPlease provide:\n\
         1. A personalized explanation of the health impact\n\
         2. Safe consumption advice (if any)\n\
         3. Alternative food suggestions\n\
         4. Long-term health considerations\n\
         \n\
         Keep the response friendly, informative, and actionable.\n",
    );
    out
}

fn join_or_unavailable<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "Not available".to_string()
    } else {
        items.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join(", ")
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none declared".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;
    use crate::score::assess;
    use rust_decimal_macros::dec;

    fn sample() -> (ScannedFood, HealthProfile) {
        let food = ScannedFood {
            product_name: "Choco Spread".into(),
            ingredients: vec![Ingredient::new("Sugar"), Ingredient::new("Hazelnuts")],
            nutrition_per_100g: [("total_sugar_g", dec!(56.3)), ("energy_kcal", dec!(539))]
                .into_iter()
                .collect(),
            overall_health_score: None,
        };
        let profile = HealthProfile::new(["hazelnut"], ["diabetes"], Vec::<String>::new());
        (food, profile)
    }

    #[test]
    fn test_prompt_contains_profile_food_and_findings() {
        let (food, profile) = sample();
        let report = assess(&food, &profile);
        let prompt = build_prompt(&food, &profile, &report);

        assert!(prompt.contains("- Allergies: hazelnut"));
        assert!(prompt.contains("- Dietary Restrictions: none declared"));
        assert!(prompt.contains("- Product: Choco Spread"));
        assert!(prompt.contains("- Ingredients: Sugar, Hazelnuts"));
        assert!(prompt.contains("energy_kcal=539, total_sugar_g=56.3"));
        assert!(prompt.contains("- CRITICAL ALLERGY ALERT:"));
        assert!(prompt.contains("- DIABETES WARNING:"));
        assert!(prompt.contains("safety score 20/100"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let (food, profile) = sample();
        let report = assess(&food, &profile);
        assert_eq!(
            build_prompt(&food, &profile, &report),
            build_prompt(&food, &profile, &report)
        );
    }

    #[test]
    fn test_prompt_for_sparse_food() {
        let food = ScannedFood::default();
        let profile = HealthProfile::default();
        let report = assess(&food, &profile);
        let prompt = build_prompt(&food, &profile, &report);
        assert!(prompt.contains("- Ingredients: Not available"));
        assert!(prompt.contains("- Nutrition per 100g: Not available"));
        assert!(prompt.contains("- SAFE TO CONSUME:"));
    }

    #[test]
    fn test_prompt_layout() {
        let food = ScannedFood {
            product_name: "Plain Water".into(),
            ..Default::default()
        };
        let profile = HealthProfile::default();
        let report = assess(&food, &profile);
        let prompt = build_prompt(&food, &profile, &report);

        let expected_head = "User Health Profile:\n\
            - Allergies: none declared\n\
            - Health Conditions: none declared\n\
            - Dietary Restrictions: none declared\n\
            \n\
            Scanned Food Product:\n\
            - Product: Plain Water\n\
            - Ingredients: Not available\n\
            - Nutrition per 100g: Not available\n\
            \n\
            Risk Analysis Results (overall: Safe, safety score 95/100):\n\
            - SAFE TO CONSUME: No allergens or health condition conflicts detected.\n\
            \n\
            Please provide:\n";
        assert!(prompt.starts_with(expected_head), "{prompt}");
        assert!(prompt.ends_with("actionable.\n"));
    }
}
