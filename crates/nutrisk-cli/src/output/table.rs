use nutrisk_core::advice::Advice;
use nutrisk_core::ingest::response::AnalysisResponse;
use nutrisk_core::metrics::{HealthForecast, HealthMetrics, MetricBand};
use nutrisk_core::model::{NutrientKey, ScannedFood};
use nutrisk_core::profile::HealthProfile;
use nutrisk_core::score::{Evaluation, RiskLevel};

pub fn print_food(food: &ScannedFood) {
    println!("=== {} ===\n", food.product_name);

    if let Some(score) = food.overall_health_score {
        println!("  Health score: {}/100\n", score.normalize());
    }

    if food.ingredients.is_empty() {
        println!("  No ingredients recognised.\n");
    } else {
        println!("  Ingredients:");
        let width = food
            .ingredients
            .iter()
            .map(|i| i.raw_name.len())
            .max()
            .unwrap_or(10);
        for ingredient in &food.ingredients {
            match (ingredient.toxicity_score, ingredient.toxicity_band()) {
                (Some(score), Some(band)) => println!(
                    "    {:<width$}  toxicity {:>3} ({})",
                    ingredient.raw_name,
                    score.normalize(),
                    band,
                    width = width
                ),
                _ => println!("    {}", ingredient.raw_name),
            }
        }
        println!();
    }

    if food.nutrition_per_100g.is_empty() {
        println!("  No nutrition values recognised.\n");
        return;
    }

    println!("  Nutrition per 100g:");
    for (key, value) in food.nutrition_per_100g.iter() {
        match NutrientKey::from_key(key) {
            Some(nutrient) => println!(
                "    {:<16} {} {}",
                nutrient.label(),
                value.normalize(),
                nutrient.unit()
            ),
            None => println!("    {:<16} {}", key, value.normalize()),
        }
    }
    println!();
}

/// Service-side extras the scorer does not use.
pub fn print_service_summary(response: &AnalysisResponse) {
    if let Some(ref nutri) = response.nutri_score {
        match nutri.score {
            Some(score) => println!("  Nutri-Score: {} ({})", nutri.grade, score.normalize()),
            None => println!("  Nutri-Score: {}", nutri.grade),
        }
    }
    if let Some(ref fssai) = response.fssai {
        let validity = if fssai.valid { "valid" } else { "not valid" };
        println!("  FSSAI: {} ({}, {})", fssai.number, validity, fssai.status);
        if !fssai.message.is_empty() {
            println!("    {}", fssai.message);
        }
    }
    if !response.recommendations.is_empty() {
        println!("\n  Service recommendations:");
        for rec in &response.recommendations {
            println!("    [{}] {}", rec.priority, rec.message);
        }
    }
    if let Some(ref summary) = response.summary {
        println!("\n  {}", summary);
    }
}

pub fn print_assessment(
    product_name: &str,
    evaluation: &Evaluation,
    verbose: bool,
    advice: Option<&Advice>,
) {
    let report = &evaluation.report;

    println!("=== {} ===\n", product_name);
    println!(
        "  Overall: {} (safety score {}/100)\n",
        report.overall_level, report.safety_score
    );

    for finding in &report.findings {
        let marker = match finding.level {
            RiskLevel::Danger => "!!",
            RiskLevel::Warning => " !",
            RiskLevel::Safe => "  ",
        };
        println!("  {} {}", marker, finding.title);
        println!("     {}", finding.message);
        println!("     {}", finding.recommendation);
        println!();
    }

    if verbose {
        println!("  Decisions:");
        for step in &evaluation.trace.steps {
            println!("    - {}", step.message);
        }
        println!();
    }

    if let Some(advice) = advice {
        println!("--- Advice ({}) ---\n", advice.backend);
        println!("{}\n", advice.text.trim());
    }
}

pub fn print_health_metrics(product_name: &str, metrics: &HealthMetrics) {
    println!("=== {} ===\n", product_name);
    for (label, value) in metrics.entries() {
        println!(
            "  {:<18} {:>5}  {}",
            label,
            value.normalize(),
            MetricBand::from_value(value)
        );
    }
    println!();
}

pub fn print_forecast(forecast: &HealthForecast) {
    println!("=== Health forecast ({} meals) ===\n", forecast.meals_analyzed);

    for metric in &forecast.metrics {
        println!(
            "  {:<20} {:>3}/100  trend {:<6} risk {}",
            metric.name, metric.score, metric.trend, metric.risk
        );
        println!("     {}", metric.prediction);
        println!("     {}", metric.recommendation);
        println!();
    }

    if forecast.recent.is_empty() {
        return;
    }
    println!("  Recent meals:");
    println!(
        "    {:<24} {:>8} {:>10} {:>8} {:>8}",
        "Product", "Sugar g", "Sodium mg", "Fiber g", "kcal"
    );
    for point in &forecast.recent {
        println!(
            "    {:<24} {:>8} {:>10} {:>8} {:>8}",
            point.product_name,
            point.sugar_g.normalize(),
            point.sodium_mg.normalize(),
            point.fiber_g.normalize(),
            point.energy_kcal.normalize()
        );
    }
    println!();
}

pub fn print_profile(profile: &HealthProfile) {
    print_list("Allergies", &profile.allergies);
    print_list("Health conditions", &profile.health_conditions);
    print_list("Dietary restrictions", &profile.dietary_restrictions);
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        println!("{heading}: none\n");
        return;
    }
    println!("{heading}:");
    for item in items {
        println!("  - {item}");
    }
    println!();
}
