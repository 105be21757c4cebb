use nutrisk_core::error::NutriskError;
use nutrisk_core::metrics::health_metrics;
use std::path::Path;

use crate::output;

pub fn run(food_file: &Path, output_format: &str) -> Result<(), NutriskError> {
    let Some(food) = nutrisk_core::load_last_scan(food_file)? else {
        return Err(NutriskError::InvalidInput(format!(
            "no scan data yet (nothing stored at {}); run `nutrisk analyze` first",
            food_file.display()
        )));
    };

    let metrics = health_metrics(&food);
    match output_format {
        "json" => output::json::print(&metrics)?,
        _ => output::table::print_health_metrics(&food.product_name, &metrics),
    }
    Ok(())
}
