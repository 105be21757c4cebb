use crate::advice::prompt::SYSTEM_PREAMBLE;
use crate::advice::Advisor;
use crate::error::NutriskError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_MODEL: &str = "gemini-pro";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const SERVICE: &str = "Gemini";

/// Advisor backed by the Gemini `generateContent` endpoint.
pub struct GeminiAdvisor {
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

impl GeminiAdvisor {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NutriskError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(NutriskError::InvalidInput("Gemini API key is empty".into()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(unavailable)?;
        Ok(GeminiAdvisor {
            api_key,
            model: model.into(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Advisor for GeminiAdvisor {
    fn advise(&self, prompt: &str) -> Result<String, NutriskError> {
        let url = format!("{}/{}:generateContent?key={}", API_BASE, self.model, self.api_key);

        info!(model = %self.model, "requesting advisory text");
        let response = self
            .client
            .post(&url)
            .json(&request_body(prompt))
            .send()
            .map_err(unavailable)?;

        let status = response.status();
        let body = response.text().map_err(unavailable)?;
        if !status.is_success() {
            return Err(NutriskError::ServiceError {
                service: SERVICE.into(),
                status: status.as_u16(),
                message: body,
            });
        }

        parse_response(&body)
    }

    fn backend_name(&self) -> &str {
        "gemini"
    }
}

fn request_body(prompt: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: format!("{}\n\n{}", SYSTEM_PREAMBLE, prompt),
            }],
        }],
    }
}

fn parse_response(body: &str) -> Result<String, NutriskError> {
    let parsed: GeminiResponse =
        serde_json::from_str(body).map_err(|e| NutriskError::ResponseParse {
            service: SERVICE.into(),
            reason: e.to_string(),
        })?;

    parsed
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| NutriskError::ResponseParse {
            service: SERVICE.into(),
            reason: "no text in response".into(),
        })
}

// reqwest errors carry the request URL, which includes the API key.
fn unavailable(e: reqwest::Error) -> NutriskError {
    NutriskError::ServiceUnavailable {
        service: SERVICE.into(),
        reason: e.without_url().to_string(),
    }
}
