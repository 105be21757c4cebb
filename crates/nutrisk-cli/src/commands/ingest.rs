use nutrisk_core::error::NutriskError;
use nutrisk_core::ingest::response::AnalysisResponse;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), NutriskError> {
    let bytes = std::fs::read(&input_file)?;
    let response: AnalysisResponse = serde_json::from_slice(&bytes)?;
    let food = response.clone().into_scanned_food()?;

    match output_file {
        Some(path) => {
            nutrisk_core::save_last_scan(&path, &food)?;
            eprintln!(
                "Scanned '{}' ({} ingredient(s), {} nutrient value(s)), written to {}",
                food.product_name,
                food.ingredients.len(),
                food.nutrition_per_100g.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&food)?,
            _ => {
                output::table::print_food(&food);
                output::table::print_service_summary(&response);
            }
        },
    }

    Ok(())
}
