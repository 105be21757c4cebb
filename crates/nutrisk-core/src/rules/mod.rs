pub mod builtin;
pub mod schema;

use builtin::CONDITION_RULES;
use schema::ConditionRule;

/// All condition rules, in evaluation order.
pub fn condition_rules() -> &'static [ConditionRule] {
    CONDITION_RULES
}

/// Rules selected by a free-text health condition.
///
/// Matching is case-insensitive substring containment, so one condition
/// such as "diabetes with high blood pressure" can select several rules.
pub fn rules_for_condition(condition: &str) -> Vec<&'static ConditionRule> {
    let lower = condition.trim().to_lowercase();
    if lower.is_empty() {
        return Vec::new();
    }
    CONDITION_RULES
        .iter()
        .filter(|r| r.applies_to(&lower))
        .collect()
}

/// Look up a rule by id (case-insensitive).
pub fn find_rule(id: &str) -> Option<&'static ConditionRule> {
    let lower = id.trim().to_lowercase();
    CONDITION_RULES.iter().find(|r| r.id == lower)
}
