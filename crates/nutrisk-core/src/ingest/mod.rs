pub mod http;
pub mod response;

use crate::error::NutriskError;
use response::AnalysisResponse;

/// Backend that turns a food-label photo into the analysis service's response.
pub trait LabelAnalyzer: Send + Sync {
    /// Analyse raw image bytes. `file_name` is passed along for content-type detection.
    fn analyze(&self, image: &[u8], file_name: &str) -> Result<AnalysisResponse, NutriskError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
