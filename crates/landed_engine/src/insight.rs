use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use serde::{Deserialize, Serialize};

pub const UNAVAILABLE_FALLBACK: &str =
    "AI insights currently unavailable. Good luck with your application!";
pub const MISSING_KEY_FALLBACK: &str =
    "AI insights unavailable: API Key missing. Set API_KEY to enable role analysis.";

#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error("could not build http client: {0}")]
    Client(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("undecodable response: {0}")]
    Decode(String),
    #[error("response blocked by provider safety filters")]
    Blocked,
    #[error("empty response")]
    Empty,
}

/// "Complete this prompt, return text."
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, InsightError>;

    fn model_name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct InsightSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    /// Extended reasoning budget; zero asks for a direct answer.
    pub thinking_budget: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            temperature: 0.7,
            thinking_budget: 0,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

pub fn build_prompt(title: &str, description: &str) -> String {
    format!(
        "Analyze this job posting and provide:\n\
         1. A 2-sentence summary of the role.\n\
         2. Top 3 skills required.\n\
         3. One \"Insider Tip\" for the interview.\n\
         \n\
         Job Title: {title}\n\
         Description: {description}"
    )
}

enum Backend {
    MissingKey,
    Broken,
    Ready(Arc<dyn TextGenerator>),
}

/// Role analysis for a single listing. Never fails: every problem turns into
/// one of the fallback strings.
pub struct InsightClient {
    backend: Backend,
}

impl InsightClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            backend: Backend::Ready(generator),
        }
    }

    pub fn without_credentials() -> Self {
        Self {
            backend: Backend::MissingKey,
        }
    }

    /// Gemini-backed client; a missing or blank key yields a client that only
    /// returns [`MISSING_KEY_FALLBACK`].
    pub fn from_settings(settings: InsightSettings) -> Self {
        let Some(api_key) = settings
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
        else {
            engine_info!("No AI credential configured; insights disabled");
            return Self::without_credentials();
        };
        match GeminiGenerator::new(api_key, settings) {
            Ok(generator) => Self::new(Arc::new(generator)),
            Err(err) => {
                engine_warn!("Insight client unavailable: {}", err);
                Self {
                    backend: Backend::Broken,
                }
            }
        }
    }

    pub async fn analyze(&self, title: &str, description: &str) -> String {
        let generator = match &self.backend {
            Backend::MissingKey => return MISSING_KEY_FALLBACK.to_string(),
            Backend::Broken => return UNAVAILABLE_FALLBACK.to_string(),
            Backend::Ready(generator) => generator,
        };

        let prompt = build_prompt(title, description);
        match generator.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                engine_warn!("{} returned an empty analysis", generator.model_name());
                UNAVAILABLE_FALLBACK.to_string()
            }
            Err(err) => {
                engine_warn!("{} analysis failed: {}", generator.model_name(), err);
                UNAVAILABLE_FALLBACK.to_string()
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct Candidate {
    content: Content,
    finish_reason: Option<String>,
}

/// Gemini `generateContent` over HTTPS.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    settings: InsightSettings,
}

impl GeminiGenerator {
    pub fn new(api_key: String, settings: InsightSettings) -> Result<Self, InsightError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| InsightError::Client(err.to_string()))?;
        Ok(Self {
            client,
            api_key,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, InsightError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                thinking_config: ThinkingConfig {
                    thinking_budget: self.settings.thinking_budget,
                },
            },
        };
        let body =
            serde_json::to_vec(&request).map_err(|err| InsightError::Decode(err.to_string()))?;

        engine_debug!("Sending analysis request to model {}", self.settings.model);
        let response = self
            .client
            .post(self.endpoint())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(body)
            .send()
            .await
            .map_err(|err| InsightError::Request(err.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| InsightError::Request(err.to_string()))?;
        if !status.is_success() {
            return Err(InsightError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_slice(&bytes).map_err(|err| InsightError::Decode(err.to_string()))?;
        let candidate = parsed.candidates.into_iter().next().ok_or(InsightError::Empty)?;
        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(InsightError::Blocked);
        }

        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<String>();
        if text.trim().is_empty() {
            return Err(InsightError::Empty);
        }
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}
