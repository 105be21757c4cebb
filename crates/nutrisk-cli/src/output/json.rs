use nutrisk_core::advice::Advice;
use nutrisk_core::error::NutriskError;
use nutrisk_core::score::Evaluation;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), NutriskError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Print a report with the product name, plus the trace when verbose and
/// any advice.
pub fn print_assessment(
    product_name: &str,
    evaluation: &Evaluation,
    verbose: bool,
    advice: Option<&Advice>,
) -> Result<(), NutriskError> {
    let mut doc = serde_json::Map::new();
    doc.insert("product_name".into(), product_name.into());
    doc.insert("report".into(), serde_json::to_value(&evaluation.report)?);
    if verbose {
        doc.insert("trace".into(), serde_json::to_value(&evaluation.trace)?);
    }
    if let Some(advice) = advice {
        doc.insert("advice".into(), serde_json::to_value(advice)?);
    }
    print(&doc)
}
