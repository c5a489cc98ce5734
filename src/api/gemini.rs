use serde::{Deserialize, Serialize};

use super::{
    error::{ApiError, ApiResult},
    send_json,
};

const SERVICE: &str = "gemini";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Thin client for the `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct Gemini {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl Gemini {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Gemini {
            http,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn generate(&self, prompt: &str) -> ApiResult<String> {
        let key = self.api_key.as_deref().ok_or(ApiError::MissingKey(SERVICE))?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: 10,
            },
        };
        let request = self.http.post(url).query(&[("key", key)]).json(&body);
        let response: GenerateResponse = send_json(SERVICE, request).await?;
        first_text(response).ok_or(ApiError::EmptyResponse(SERVICE))
    }
}

fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .find_map(|p| p.text)
}

#[cfg(test)]
pub(crate) fn parse_generated_text(body: &str) -> Option<String> {
    serde_json::from_str::<GenerateResponse>(body).ok().and_then(first_text)
}
