use nutrisk_core::error::NutriskError;
use nutrisk_core::ingest::http::HttpLabelAnalyzer;
use std::path::PathBuf;
use std::time::Duration;

use crate::output;

pub fn run(
    image: PathBuf,
    ocr_url: &str,
    save: PathBuf,
    output_format: &str,
    timeout: Duration,
) -> Result<(), NutriskError> {
    let bytes = std::fs::read(&image)?;
    let file_name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "label.jpg".to_string());

    let analyzer = HttpLabelAnalyzer::new(ocr_url, timeout)?;
    let food = nutrisk_core::analyze_label(&bytes, &file_name, &analyzer)?;

    nutrisk_core::save_last_scan(&save, &food)?;
    eprintln!("Stored as last scan in {}", save.display());

    match output_format {
        "json" => output::json::print(&food)?,
        _ => output::table::print_food(&food),
    }

    Ok(())
}
