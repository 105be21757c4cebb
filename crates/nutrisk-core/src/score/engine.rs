use crate::model::{Ingredient, NutritionFacts, ScannedFood};
use crate::profile::HealthProfile;
use crate::rules::condition_rules;
use crate::rules::schema::{ConditionRule, NutrientCheck};
use crate::score::outcome::{RiskFinding, RiskLevel, RiskReport};
use crate::trace::{TraceBundle, TraceStepType};
use rust_decimal::Decimal;
use tracing::debug;

/// A report together with the decisions that produced it.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub report: RiskReport,
    pub trace: TraceBundle,
}

/// Score a scanned food against a health profile.
pub fn assess(food: &ScannedFood, profile: &HealthProfile) -> RiskReport {
    evaluate(food, profile).report
}

/// Score a scanned food against a health profile, recording each decision.
///
/// Allergy findings come first, then condition findings, in the order
/// the rules fire. Missing nutrition data skips a rule rather than failing.
pub fn evaluate(food: &ScannedFood, profile: &HealthProfile) -> Evaluation {
    let mut trace = TraceBundle::default();

    let mut findings = allergen_findings(&food.ingredients, &profile.allergies, &mut trace);
    findings.extend(condition_findings(
        &food.nutrition_per_100g,
        &profile.health_conditions,
        &mut trace,
    ));

    let report = RiskReport::from_findings(findings);
    trace.push(
        TraceStepType::OverallDecision,
        format!(
            "Overall {} ({} danger, {} warning) -> safety score {}",
            report.overall_level,
            report.danger_count(),
            report.warning_count(),
            report.safety_score
        ),
    );
    debug!(
        product = %food.product_name,
        overall = %report.overall_level,
        score = report.safety_score,
        "assessment complete"
    );

    Evaluation { report, trace }
}

/// One Danger finding per declared allergy that any ingredient matches.
///
/// Matching is symmetric substring containment on lowercased, trimmed
/// names, so "dairy" matches "dairy solids" and "soy" matches "soy lecithin
/// allergy". Findings follow the ingredient order of the first match.
fn allergen_findings(
    ingredients: &[Ingredient],
    allergies: &[String],
    trace: &mut TraceBundle,
) -> Vec<RiskFinding> {
    let declared: Vec<(&str, String)> = allergies
        .iter()
        .map(|a| (a.trim(), a.trim().to_lowercase()))
        .filter(|(_, key)| !key.is_empty())
        .collect();

    let mut matched: Vec<&str> = Vec::new();
    let mut findings = Vec::new();

    for ingredient in ingredients {
        let names = ingredient_names(ingredient);
        for (allergen, key) in &declared {
            if matched.contains(&key.as_str()) {
                continue;
            }
            if let Some(name) = names.iter().find(|n| contains_either(n, key)) {
                matched.push(key.as_str());
                debug!(ingredient = %name, allergen = %allergen, "allergen match");
                trace.push(
                    TraceStepType::AllergenMatch,
                    format!("Ingredient '{}' matches declared allergy '{}'", name, allergen),
                );
                findings.push(allergy_finding(allergen));
            }
        }
    }

    findings
}

/// Lowercased, trimmed, non-empty names an ingredient is known by.
fn ingredient_names(ingredient: &Ingredient) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(2);
    for name in [&ingredient.normalized_name, &ingredient.raw_name] {
        let lower = name.trim().to_lowercase();
        if !lower.is_empty() && !names.contains(&lower) {
            names.push(lower);
        }
    }
    names
}

fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn allergy_finding(allergen: &str) -> RiskFinding {
    RiskFinding {
        level: RiskLevel::Danger,
        title: "CRITICAL ALLERGY ALERT".into(),
        message: format!(
            "This product contains {}. Your profile declares an allergy to {}.",
            allergen.to_uppercase(),
            allergen
        ),
        recommendation: "DO NOT CONSUME. This could trigger severe allergic reactions including digestive issues, skin reactions, or respiratory problems.".into(),
    }
}

/// One Warning finding per condition rule that fires.
///
/// Rules are visited in table order, so the findings do not depend on the
/// order of the profile's conditions. A rule fires at most once however
/// many conditions select it.
fn condition_findings(
    nutrition: &NutritionFacts,
    conditions: &[String],
    trace: &mut TraceBundle,
) -> Vec<RiskFinding> {
    let declared: Vec<(&str, String)> = conditions
        .iter()
        .map(|c| (c.trim(), c.trim().to_lowercase()))
        .filter(|(_, key)| !key.is_empty())
        .collect();

    let mut findings = Vec::new();
    for rule in condition_rules() {
        let Some((condition, _)) = declared.iter().find(|(_, key)| rule.applies_to(key)) else {
            continue;
        };
        trace.push(
            TraceStepType::ConditionMatch,
            format!("Condition '{}' selects rule '{}'", condition, rule.id),
        );
        findings.extend(evaluate_rule(rule, nutrition, trace));
    }
    findings
}

fn evaluate_rule(
    rule: &ConditionRule,
    nutrition: &NutritionFacts,
    trace: &mut TraceBundle,
) -> Option<RiskFinding> {
    let mut exceeded: Vec<(&NutrientCheck, Decimal)> = Vec::new();
    let mut any_value = false;

    for check in rule.checks {
        let Some((key, value)) = nutrition.first_available(check.synonyms) else {
            trace.push(
                TraceStepType::NutrientLookup,
                format!(
                    "No {} value (tried {})",
                    check.nutrient,
                    check.synonyms.join(", ")
                ),
            );
            continue;
        };
        any_value = true;

        let fired = value > check.threshold();
        trace.push(
            TraceStepType::ThresholdCompare,
            format!(
                "{}: {} {} {} {}{}",
                rule.id,
                key,
                value.normalize(),
                if fired { ">" } else { "<=" },
                check.threshold,
                check.unit
            ),
        );
        if fired {
            exceeded.push((check, value));
        }
    }

    if !any_value {
        debug!(rule = rule.id, "rule skipped, no nutrition data");
        trace.push(
            TraceStepType::RuleSkipped,
            format!("Rule '{}' skipped: no nutrition data", rule.id),
        );
        return None;
    }
    if exceeded.is_empty() {
        return None;
    }

    let parts: Vec<String> = exceeded
        .iter()
        .map(|(check, value)| {
            format!(
                "{} content ({}{} per 100g, above the {}{} limit)",
                check.nutrient,
                value.normalize(),
                check.unit,
                check.threshold,
                check.unit
            )
        })
        .collect();

    Some(RiskFinding {
        level: RiskLevel::Warning,
        title: rule.title.to_string(),
        message: format!("High {} detected.", parts.join(" and high ")),
        recommendation: rule.recommendation.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn food(ingredients: &[&str], nutrition: &[(&str, Decimal)]) -> ScannedFood {
        ScannedFood {
            product_name: "Test Product".into(),
            ingredients: ingredients.iter().map(|n| Ingredient::new(*n)).collect(),
            nutrition_per_100g: nutrition.iter().map(|(k, v)| (*k, *v)).collect(),
            overall_health_score: None,
        }
    }

    fn profile(allergies: &[&str], conditions: &[&str]) -> HealthProfile {
        HealthProfile::new(
            allergies.iter().copied(),
            conditions.iter().copied(),
            Vec::<String>::new(),
        )
    }

    #[test]
    fn test_empty_inputs_give_safe_default() {
        let report = assess(&food(&[], &[]), &HealthProfile::default());
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].level, RiskLevel::Safe);
        assert_eq!(report.overall_level, RiskLevel::Safe);
        assert_eq!(report.safety_score, 95);
    }

    #[test]
    fn test_peanut_allergy() {
        let report = assess(&food(&["peanut oil"], &[]), &profile(&["peanut"], &[]));
        assert_eq!(report.findings.len(), 1);
        let f = &report.findings[0];
        assert_eq!(f.level, RiskLevel::Danger);
        assert!(f.message.contains("peanut"));
        assert_eq!(report.overall_level, RiskLevel::Danger);
        assert_eq!(report.safety_score, 20);
    }

    #[test]
    fn test_allergy_matching_is_symmetric() {
        // short ingredient token inside a longer allergy phrase
        let report = assess(&food(&["soy"], &[]), &profile(&["soy lecithin"], &[]));
        assert_eq!(report.danger_count(), 1);
    }

    #[test]
    fn test_allergy_matching_ignores_case_and_whitespace() {
        let report = assess(&food(&["  Dairy SOLIDS "], &[]), &profile(&[" DAIRY "], &[]));
        assert_eq!(report.danger_count(), 1);
        assert!(report.findings[0].message.contains("DAIRY"));
    }

    #[test]
    fn test_allergy_deduplicated_across_ingredients() {
        let report = assess(
            &food(&["milk powder", "skimmed milk", "milk fat"], &[]),
            &profile(&["milk"], &[]),
        );
        assert_eq!(report.danger_count(), 1);
    }

    #[test]
    fn test_raw_name_also_matched() {
        let mut f = food(&[], &[]);
        f.ingredients.push(Ingredient {
            raw_name: "Hazelnut paste".into(),
            normalized_name: "paste".into(),
            toxicity_score: None,
        });
        let report = assess(&f, &profile(&["hazelnut"], &[]));
        assert_eq!(report.danger_count(), 1);
    }

    #[test]
    fn test_blank_ingredient_never_matches() {
        let mut f = food(&[], &[]);
        f.ingredients.push(Ingredient {
            raw_name: "   ".into(),
            normalized_name: String::new(),
            toxicity_score: None,
        });
        let unchecked = HealthProfile {
            allergies: vec!["peanut".into(), "  ".into()],
            ..Default::default()
        };
        let report = assess(&f, &unchecked);
        assert_eq!(report.overall_level, RiskLevel::Safe);
    }

    #[test]
    fn test_three_allergies_floor() {
        let report = assess(
            &food(&["peanut", "wheat flour", "egg yolk"], &[]),
            &profile(&["peanut", "wheat", "egg"], &[]),
        );
        assert_eq!(report.danger_count(), 3);
        assert_eq!(report.safety_score, 10);
    }

    #[test]
    fn test_allergy_findings_follow_ingredient_order() {
        let report = assess(
            &food(&["wheat flour", "peanut"], &[]),
            &profile(&["peanut", "wheat"], &[]),
        );
        assert!(report.findings[0].message.contains("WHEAT"));
        assert!(report.findings[1].message.contains("PEANUT"));
    }

    #[test]
    fn test_diabetes_warning() {
        let report = assess(
            &food(&[], &[("total_sugar_g", dec!(15))]),
            &profile(&[], &["diabetes"]),
        );
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].level, RiskLevel::Warning);
        assert!(report.findings[0].message.contains("15g"));
        assert_eq!(report.overall_level, RiskLevel::Warning);
        assert_eq!(report.safety_score, 70);
    }

    #[test]
    fn test_diabetes_threshold_is_strict() {
        let at = assess(
            &food(&[], &[("total_sugar_g", dec!(10))]),
            &profile(&[], &["diabetes"]),
        );
        assert_eq!(at.overall_level, RiskLevel::Safe);

        let above = assess(
            &food(&[], &[("total_sugar_g", dec!(10.01))]),
            &profile(&[], &["diabetes"]),
        );
        assert_eq!(above.overall_level, RiskLevel::Warning);
    }

    #[test]
    fn test_sugar_synonym_fallback() {
        let report = assess(
            &food(&[], &[("sugar_g", dec!(22))]),
            &profile(&[], &["Diabetes"]),
        );
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_preferred_synonym_wins_over_fallback() {
        // total_sugar_g is present and below the limit; sugar_g is ignored
        let report = assess(
            &food(&[], &[("total_sugar_g", dec!(8)), ("sugar_g", dec!(30))]),
            &profile(&[], &["diabetes"]),
        );
        assert_eq!(report.overall_level, RiskLevel::Safe);
    }

    #[test]
    fn test_cholesterol_saturated_or_total_fat() {
        let sat = assess(
            &food(&[], &[("saturated_fat_g", dec!(6))]),
            &profile(&[], &["high cholesterol"]),
        );
        assert_eq!(sat.warning_count(), 1);
        assert!(sat.findings[0].message.contains("saturated fat"));

        let total = assess(
            &food(&[], &[("saturated_fat_g", dec!(2)), ("total_fat_g", dec!(16))]),
            &profile(&[], &["heart disease"]),
        );
        assert_eq!(total.warning_count(), 1);
        assert!(total.findings[0].message.contains("16g"));

        let neither = assess(
            &food(&[], &[("saturated_fat_g", dec!(5)), ("total_fat_g", dec!(15))]),
            &profile(&[], &["cholesterol"]),
        );
        assert_eq!(neither.overall_level, RiskLevel::Safe);
    }

    #[test]
    fn test_cholesterol_both_exceeded_is_one_finding() {
        let report = assess(
            &food(&[], &[("saturated_fat_g", dec!(9)), ("total_fat_g", dec!(30))]),
            &profile(&[], &["high cholesterol"]),
        );
        assert_eq!(report.warning_count(), 1);
        let msg = &report.findings[0].message;
        assert!(msg.contains("9g"));
        assert!(msg.contains("30g"));
    }

    #[test]
    fn test_hypertension_warning() {
        let report = assess(
            &food(&[], &[("sodium_mg", dec!(650))]),
            &profile(&[], &["high blood pressure"]),
        );
        assert_eq!(report.warning_count(), 1);
        assert!(report.findings[0].message.contains("650mg"));
    }

    #[test]
    fn test_missing_nutrient_skips_rule() {
        let eval = evaluate(&food(&[], &[]), &profile(&[], &["hypertension"]));
        assert_eq!(eval.report.overall_level, RiskLevel::Safe);
        assert_eq!(eval.report.safety_score, 95);
        assert_eq!(eval.trace.steps_of(TraceStepType::RuleSkipped).count(), 1);
    }

    #[test]
    fn test_rule_selected_twice_fires_once() {
        let report = assess(
            &food(&[], &[("total_fat_g", dec!(40))]),
            &profile(&[], &["high cholesterol", "heart disease"]),
        );
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_allergies_precede_conditions() {
        let report = assess(
            &food(&["peanut"], &[("total_sugar_g", dec!(30)), ("sodium_mg", dec!(900))]),
            &profile(&["peanut"], &["hypertension", "diabetes"]),
        );
        let levels: Vec<RiskLevel> = report.findings.iter().map(|f| f.level).collect();
        assert_eq!(
            levels,
            vec![RiskLevel::Danger, RiskLevel::Warning, RiskLevel::Warning]
        );
        // rule table order, whatever the profile order
        assert_eq!(report.findings[1].title, "DIABETES WARNING");
        assert_eq!(report.findings[2].title, "HIGH SODIUM WARNING");
        assert_eq!(report.safety_score, 20);
    }

    #[test]
    fn test_condition_order_does_not_change_report() {
        let f = food(&[], &[("total_sugar_g", dec!(30)), ("sodium_mg", dec!(900))]);
        let forward = assess(&f, &profile(&[], &["diabetes", "hypertension"]));
        let reversed = assess(&f, &profile(&[], &["hypertension", "diabetes"]));
        assert_eq!(forward, reversed);
        let titles: Vec<&str> = forward.findings.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["DIABETES WARNING", "HIGH SODIUM WARNING"]);
    }

    #[test]
    fn test_first_matching_condition_is_traced() {
        let eval = evaluate(
            &food(&[], &[("total_fat_g", dec!(40))]),
            &profile(&[], &["heart disease", "high cholesterol"]),
        );
        let matches: Vec<&str> = eval
            .trace
            .steps_of(TraceStepType::ConditionMatch)
            .map(|s| s.message.as_str())
            .collect();
        assert_eq!(matches, vec!["Condition 'heart disease' selects rule 'cholesterol'"]);
    }

    #[test]
    fn test_unknown_condition_ignored() {
        let report = assess(
            &food(&[], &[("total_sugar_g", dec!(50))]),
            &profile(&[], &["asthma"]),
        );
        assert_eq!(report.overall_level, RiskLevel::Safe);
    }

    #[test]
    fn test_deterministic() {
        let f = food(&["peanut", "sugar"], &[("total_sugar_g", dec!(25))]);
        let p = profile(&["peanut"], &["diabetes"]);
        let first = evaluate(&f, &p);
        let second = evaluate(&f, &p);
        assert_eq!(first.report, second.report);
        assert_eq!(first.trace, second.trace);
    }

    #[test]
    fn test_trace_records_decisions() {
        let eval = evaluate(
            &food(&["peanut"], &[("total_sugar_g", dec!(12))]),
            &profile(&["peanut"], &["diabetes"]),
        );
        assert_eq!(eval.trace.steps_of(TraceStepType::AllergenMatch).count(), 1);
        assert_eq!(eval.trace.steps_of(TraceStepType::ConditionMatch).count(), 1);
        assert_eq!(eval.trace.steps_of(TraceStepType::ThresholdCompare).count(), 1);
        let last = eval.trace.steps.last().unwrap();
        assert_eq!(last.step_type, TraceStepType::OverallDecision);
    }
}
