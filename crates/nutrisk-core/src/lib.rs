pub mod advice;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod profile;
pub mod rules;
pub mod score;
pub mod trace;

use error::NutriskError;
use ingest::LabelAnalyzer;
use model::ScannedFood;
use profile::HealthProfile;
use score::{Evaluation, RiskReport};
use std::path::Path;
use tracing::info;

/// Main API entry point: score a scanned food against a health profile.
///
/// Both inputs must be present; their contents may be empty. Sparse data
/// yields fewer findings, never an error.
pub fn score(
    food: Option<&ScannedFood>,
    profile: Option<&HealthProfile>,
) -> Result<RiskReport, NutriskError> {
    score_traced(food, profile).map(|e| e.report)
}

/// Like [`score`], also returning the decision trace.
pub fn score_traced(
    food: Option<&ScannedFood>,
    profile: Option<&HealthProfile>,
) -> Result<Evaluation, NutriskError> {
    let food = food.ok_or_else(|| NutriskError::InvalidInput("no scanned food provided".into()))?;
    let profile = profile
        .ok_or_else(|| NutriskError::InvalidInput("no health profile provided".into()))?;
    Ok(score::evaluate(food, profile))
}

/// Analyse a label image with the given backend and reshape the result.
pub fn analyze_label(
    image: &[u8],
    file_name: &str,
    analyzer: &dyn LabelAnalyzer,
) -> Result<ScannedFood, NutriskError> {
    if image.is_empty() {
        return Err(NutriskError::InvalidInput("image is empty".into()));
    }
    let response = analyzer.analyze(image, file_name)?;
    let food = response.into_scanned_food()?;
    info!(
        backend = analyzer.backend_name(),
        product = %food.product_name,
        ingredients = food.ingredients.len(),
        nutrients = food.nutrition_per_100g.len(),
        "label analysed"
    );
    Ok(food)
}

/// Load the last scanned food.
///
/// A missing file or a JSON `null` document means nothing has been scanned yet.
pub fn load_last_scan(path: &Path) -> Result<Option<ScannedFood>, NutriskError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(NutriskError::FoodLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };
    serde_json::from_str(&content).map_err(|e| NutriskError::FoodLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Store a scanned food as the last scan, replacing any previous one.
pub fn save_last_scan(path: &Path, food: &ScannedFood) -> Result<(), NutriskError> {
    let json = serde_json::to_string_pretty(food)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load the logged meal history, oldest first.
///
/// A missing file or a JSON `null` document is an empty history.
pub fn load_meal_history(path: &Path) -> Result<Vec<ScannedFood>, NutriskError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(NutriskError::FoodLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };
    let meals: Option<Vec<ScannedFood>> =
        serde_json::from_str(&content).map_err(|e| NutriskError::FoodLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(meals.unwrap_or_default())
}

/// Append a meal to the history file. Returns the number of logged meals.
pub fn record_meal(path: &Path, food: &ScannedFood) -> Result<usize, NutriskError> {
    let mut meals = load_meal_history(path)?;
    meals.push(food.clone());
    let json = serde_json::to_string_pretty(&meals)?;
    std::fs::write(path, json)?;
    info!(product = %food.product_name, meals = meals.len(), "meal logged");
    Ok(meals.len())
}
