use crate::error::NutriskError;
use crate::ingest::response::AnalysisResponse;
use crate::ingest::LabelAnalyzer;
use reqwest::blocking::{multipart, Client};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5005/analyze";

const SERVICE: &str = "label analysis service";

/// Label analysis backend that uploads the image to the OCR service over HTTP.
///
/// The image is sent as multipart field `image`.
pub struct HttpLabelAnalyzer {
    endpoint: String,
    client: Client,
}

impl HttpLabelAnalyzer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, NutriskError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| unavailable(&e))?;
        Ok(HttpLabelAnalyzer {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl LabelAnalyzer for HttpLabelAnalyzer {
    fn analyze(&self, image: &[u8], file_name: &str) -> Result<AnalysisResponse, NutriskError> {
        let part = multipart::Part::bytes(image.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))
            .map_err(|e| unavailable(&e))?;
        let form = multipart::Form::new().part("image", part);

        info!(endpoint = %self.endpoint, bytes = image.len(), "uploading label image");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| unavailable(&e))?;

        let status = response.status();
        let body = response.text().map_err(|e| unavailable(&e))?;

        // Failures are also reported as JSON with `success: false`, so the
        // body is tried before the status code.
        match serde_json::from_str::<AnalysisResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) if status.is_success() => Err(NutriskError::ResponseParse {
                service: SERVICE.into(),
                reason: e.to_string(),
            }),
            Err(_) => Err(NutriskError::ServiceError {
                service: SERVICE.into(),
                status: status.as_u16(),
                message: body,
            }),
        }
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}

fn unavailable(e: &reqwest::Error) -> NutriskError {
    NutriskError::ServiceUnavailable {
        service: SERVICE.into(),
        reason: e.to_string(),
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}
