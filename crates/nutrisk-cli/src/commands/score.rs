use nutrisk_core::advice::gemini::GeminiAdvisor;
use nutrisk_core::advice::knowledge::KnowledgeBaseAdvisor;
use nutrisk_core::advice::{self, Advisor};
use nutrisk_core::error::NutriskError;
use nutrisk_core::profile::load_profile;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::output;

pub struct ScoreArgs {
    pub food: PathBuf,
    pub profile: Option<PathBuf>,
    pub output_format: String,
    pub verbose: bool,
    pub advise: bool,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub timeout: Duration,
}

pub fn run(args: ScoreArgs) -> Result<(), NutriskError> {
    let Some(food) = nutrisk_core::load_last_scan(&args.food)? else {
        return Err(NutriskError::InvalidInput(format!(
            "no scan data yet (nothing stored at {}); run `nutrisk analyze` first",
            args.food.display()
        )));
    };

    // An unset path and a stored `null` both reach the scorer as no profile.
    let profile = match &args.profile {
        Some(path) => load_profile(path)?,
        None => None,
    };

    let evaluation = nutrisk_core::score_traced(Some(&food), profile.as_ref())?;

    let advice = match (&profile, args.advise) {
        (Some(profile), true) => {
            let gemini = match args.gemini_api_key.as_deref() {
                Some(key) if !key.trim().is_empty() => Some(GeminiAdvisor::new(
                    key,
                    args.gemini_model.as_str(),
                    args.timeout,
                )?),
                _ => {
                    info!("no Gemini API key set, using offline advice");
                    None
                }
            };
            let fallback = KnowledgeBaseAdvisor::new();
            Some(advice::advise(
                &food,
                profile,
                &evaluation.report,
                gemini.as_ref().map(|g| g as &dyn Advisor),
                &fallback,
            )?)
        }
        _ => None,
    };

    match args.output_format.as_str() {
        "json" => output::json::print_assessment(
            &food.product_name,
            &evaluation,
            args.verbose,
            advice.as_ref(),
        )?,
        _ => output::table::print_assessment(
            &food.product_name,
            &evaluation,
            args.verbose,
            advice.as_ref(),
        ),
    }

    Ok(())
}
