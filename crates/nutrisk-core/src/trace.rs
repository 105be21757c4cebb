use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    AllergenMatch,
    ConditionMatch,
    NutrientLookup,
    ThresholdCompare,
    RuleSkipped,
    OverallDecision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

/// Ordered record of every decision the scorer took for one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    pub steps: Vec<TraceStep>,
}

impl Default for TraceBundle {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            steps: Vec::new(),
        }
    }
}

impl TraceBundle {
    pub fn push(&mut self, step_type: TraceStepType, message: impl Into<String>) {
        self.steps.push(TraceStep {
            step_type,
            message: message.into(),
        });
    }

    pub fn steps_of(&self, step_type: TraceStepType) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter().filter(move |s| s.step_type == step_type)
    }
}
