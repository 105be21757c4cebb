use nutrisk_core::error::NutriskError;
use nutrisk_core::profile::load_profile;
use std::path::Path;

use crate::output;

pub fn show(file: &Path, output_format: &str) -> Result<(), NutriskError> {
    let Some(profile) = load_profile(file)? else {
        println!("No health profile saved in {}.", file.display());
        return Ok(());
    };

    match output_format {
        "json" => output::json::print(&profile)?,
        _ => output::table::print_profile(&profile),
    }
    Ok(())
}
