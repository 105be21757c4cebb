use nutrisk_core::error::NutriskError;
use std::path::Path;

use crate::output;

pub fn log(food_file: &Path, history_file: &Path) -> Result<(), NutriskError> {
    let Some(food) = nutrisk_core::load_last_scan(food_file)? else {
        return Err(NutriskError::InvalidInput(format!(
            "no scan data yet (nothing stored at {}); run `nutrisk analyze` first",
            food_file.display()
        )));
    };

    let count = nutrisk_core::record_meal(history_file, &food)?;
    eprintln!(
        "Logged '{}' ({} meal(s) in {})",
        food.product_name,
        count,
        history_file.display()
    );
    Ok(())
}

pub fn forecast(history_file: &Path, output_format: &str) -> Result<(), NutriskError> {
    let meals = nutrisk_core::load_meal_history(history_file)?;
    let forecast = nutrisk_core::metrics::forecast(&meals);

    match output_format {
        "json" => output::json::print(&forecast)?,
        _ => output::table::print_forecast(&forecast),
    }
    Ok(())
}
