use nutrisk_core::error::NutriskError;
use nutrisk_core::rules::{condition_rules, find_rule};

pub fn list() -> Result<(), NutriskError> {
    println!("Built-in condition rules:\n");
    for rule in condition_rules() {
        println!("  {:<14} {}", rule.id, rule.name);
        println!("                 Matches conditions containing: {}", rule.keywords.join(", "));
        println!();
    }
    println!("Declared allergies are matched against ingredient names separately;");
    println!("every match is a Danger finding.\n");
    Ok(())
}

pub fn explain(id: &str) -> Result<(), NutriskError> {
    let rule = find_rule(id).ok_or_else(|| {
        let known: Vec<&str> = condition_rules().iter().map(|r| r.id).collect();
        NutriskError::InvalidInput(format!(
            "unknown rule '{}' (available: {})",
            id,
            known.join(", ")
        ))
    })?;

    println!("{} ({})\n", rule.name, rule.id);
    println!(
        "Applies when a health condition contains any of: {}\n",
        rule.keywords
            .iter()
            .map(|k| format!("\"{k}\""))
            .collect::<Vec<_>>()
            .join(", ")
    );

    println!("Checks (per 100g, any one exceeding raises a Warning):\n");

    let width = rule
        .checks
        .iter()
        .map(|c| c.nutrient.len())
        .max()
        .unwrap_or(10);

    println!("  {:<width$}  {:<10}  Label keys", "Nutrient", "Limit", width = width + 2);
    println!("  {}", "-".repeat(width + 2 + 12 + 30));
    for check in rule.checks {
        println!(
            "  {:<width$}  {:<10}  {}",
            check.nutrient,
            format!("> {}{}", check.threshold, check.unit),
            check.synonyms.join(", "),
            width = width + 2
        );
    }
    println!();

    println!("Values equal to the limit do not fire. A missing value skips the check;");
    println!("when every check is missing the rule is skipped.\n");

    println!("Finding title: {}", rule.title);
    println!("Recommendation: {}\n", rule.recommendation);

    Ok(())
}
