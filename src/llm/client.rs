//! Ollama completion client for fallback generation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::prompts::build_prompt;
use super::AnswerGenerator;
use super::GenerationStyle;
use crate::errors::FaqRagError;
use crate::errors::Result;

/// Non-streaming completion client against the Ollama generate API
pub struct LlmService {
    model: String,
    endpoint: String,
    style: GenerationStyle,
    client: Client,
}

impl LlmService {
    /// Create a new LLM service from configuration
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        Self::with_style(config, GenerationStyle::from_app_config(config))
    }

    /// Create with an explicit generation style
    pub fn with_style(config: &crate::config::AppConfig, style: GenerationStyle) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| FaqRagError::HttpError(e.to_string()))?;

        Ok(Self {
            model: config.llm_model().to_string(),
            endpoint: config.llm_endpoint().to_string(),
            style,
            client,
        })
    }

    /// Get the configured model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AnswerGenerator for LlmService {
    async fn generate(&self, question: &str) -> Result<String> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
            stream: bool,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            response: Option<String>,
        }

        let prompt = build_prompt(question, &self.style);
        let url = format!("{}/api/generate", self.endpoint);
        debug!("Calling Ollama generate API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| FaqRagError::GenerationUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FaqRagError::GenerationUnavailable(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: OllamaResponse = response.json().await.map_err(|e| {
            FaqRagError::GenerationUnavailable(format!("Failed to parse response: {e}"))
        })?;

        result
            .response
            .ok_or_else(|| FaqRagError::GenerationUnavailable("No completion in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> crate::config::AppConfig {
        toml::from_str(
            r#"
[store]
url = "postgresql://localhost/faqrag"
max_connections = 10
min_connections = 1
connection_timeout = 30

[logging]
level = "info"
backtrace = false

[embeddings]
dimension = 512
model = "distiluse-base-multilingual-cased-v2"

[llm]
llm_endpoint = "http://localhost:11434"
llm_key = "ollama"
persona = "ผู้ตอบเป็นชาวสวนกล้วยผู้ชาย"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_service_uses_configured_model() {
        let service = LlmService::new(&config()).unwrap();
        assert_eq!(service.model(), "supachai/llama-3-typhoon-v1.5");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_generation_unavailable() {
        // Nothing listens on this port
        let mut config = config();
        config.llm.llm_endpoint = "http://127.0.0.1:1".to_string();

        let service = LlmService::new(&config).unwrap();
        let result = service.generate("สวัสดี").await;
        assert!(matches!(
            result,
            Err(FaqRagError::GenerationUnavailable(_))
        ));
    }

    #[tokio::test]
    #[ignore = "Requires a running Ollama instance"]
    async fn test_generate_against_local_ollama() {
        let service = LlmService::new(&config()).unwrap();
        let answer = service.generate("สวัสดี").await.unwrap();
        assert!(!answer.is_empty());
    }
}
