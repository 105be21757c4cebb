pub mod gemini;
pub mod knowledge;
pub mod prompt;

use crate::error::NutriskError;
use crate::model::ScannedFood;
use crate::profile::HealthProfile;
use crate::score::RiskReport;
use serde::Serialize;
use tracing::warn;

/// Backend that turns an advisory prompt into free text.
pub trait Advisor: Send + Sync {
    fn advise(&self, prompt: &str) -> Result<String, NutriskError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Advisory text and the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub text: String,
    pub backend: String,
}

/// Generate advisory text for a finished assessment.
///
/// The primary advisor is tried first; on error or an empty answer the
/// fallback answers instead.
pub fn advise(
    food: &ScannedFood,
    profile: &HealthProfile,
    report: &RiskReport,
    primary: Option<&dyn Advisor>,
    fallback: &dyn Advisor,
) -> Result<Advice, NutriskError> {
    let prompt = prompt::build_prompt(food, profile, report);

    if let Some(advisor) = primary {
        match advisor.advise(&prompt) {
            Ok(text) if !text.trim().is_empty() => {
                return Ok(Advice {
                    text,
                    backend: advisor.backend_name().to_string(),
                });
            }
            Ok(_) => warn!(backend = advisor.backend_name(), "advisor returned no text"),
            Err(e) => warn!(backend = advisor.backend_name(), error = %e, "advisor failed"),
        }
    }

    let text = fallback.advise(&prompt)?;
    Ok(Advice {
        text,
        backend: fallback.backend_name().to_string(),
    })
}
