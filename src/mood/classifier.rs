use async_trait::async_trait;
use std::time::Duration;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use super::{detect_by_keywords, Mood, MoodResult};
use crate::api::{error::ApiResult, gemini::Gemini};

const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE: Duration = Duration::from_millis(500);

/// Anything that turns a prompt into a short text reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &str) -> ApiResult<String>;
}

#[async_trait]
impl TextGenerator for Gemini {
    fn is_configured(&self) -> bool {
        Gemini::is_configured(self)
    }

    async fn generate(&self, prompt: &str) -> ApiResult<String> {
        Gemini::generate(self, prompt).await
    }
}

pub struct MoodClassifier<G = Gemini> {
    generator: G,
    attempts: u32,
    retry_base: Duration,
}

impl<G: TextGenerator> MoodClassifier<G> {
    pub fn new(generator: G) -> Self {
        MoodClassifier {
            generator,
            attempts: MAX_ATTEMPTS,
            retry_base: RETRY_BASE,
        }
    }

    pub fn with_retry_base(mut self, retry_base: Duration) -> Self {
        self.retry_base = retry_base;
        self
    }

    /// Classifies free text into one of the six moods. Never fails: model
    /// errors and unexpected replies fall back to keyword matching.
    pub async fn classify(&self, text: &str) -> MoodResult {
        if text.trim().is_empty() || !self.generator.is_configured() {
            return detect_by_keywords(text);
        }

        let prompt = build_prompt(text);
        for attempt in 1..=self.attempts {
            match self.generator.generate(&prompt).await {
                Ok(reply) => {
                    return match Mood::from_label(&reply) {
                        Some(mood) => {
                            info!(%mood, "mood classified by model");
                            mood.profile()
                        }
                        None => {
                            warn!(reply = reply.trim(), "model reply is not a known mood, using keywords");
                            detect_by_keywords(text)
                        }
                    };
                }
                Err(e) => {
                    warn!(attempt, max = self.attempts, "mood classification failed: {e}");
                    if attempt < self.attempts {
                        let delay = self.retry_base * attempt;
                        debug!(?delay, "retrying mood classification");
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        detect_by_keywords(text)
    }
}

pub fn build_prompt(text: &str) -> String {
    let labels = Mood::iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Classify the mood of the following text into exactly one of these labels: {labels}.\n\
         Reply with the label only, no punctuation or explanation.\n\n\
         Text: \"{}\"",
        text.trim().replace('"', "'")
    )
}
