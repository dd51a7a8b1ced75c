//! Embeddings generation module
//!
//! Maps text to fixed-length L2-normalized vectors using an HTTP embedding
//! backend:
//! - Ollama (local models)
//! - OpenAI-compatible endpoints
//!
//! Vectors are normalized here rather than trusting the backend, so cosine
//! similarity downstream reduces to a dot product.

pub mod client;
pub mod generator;

use async_trait::async_trait;
pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use generator::EmbeddingService;

use crate::errors::FaqRagError;
use crate::errors::Result;

/// Default embedding dimension (distiluse-base-multilingual-cased-v2)
pub const DEFAULT_EMBEDDING_DIM: usize = 512;

/// Maximum batch size for embedding generation
pub const MAX_BATCH_SIZE: usize = 100;

/// Maps text to fixed-length normalized vectors.
///
/// Batch encoding preserves input order and returns one vector per input.
/// Single-text encoding has identical per-text semantics; batching is purely
/// a performance path.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Encode a batch of texts, one L2-normalized vector per input
    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Encode a single text
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.encode_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| FaqRagError::EmbeddingError("No embedding returned".to_string()))
    }
}

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        // Determine provider based on llm_key or endpoint
        // Priority: llm_key > endpoint domain
        let provider = if config.llm_key() == "ollama" {
            EmbeddingProvider::Ollama
        } else if config.llm_endpoint().contains("api.openai.com") {
            EmbeddingProvider::OpenAI
        } else if config.llm_endpoint().contains("localhost")
            || !config.llm_endpoint().contains("openai")
        {
            // Local or non-OpenAI endpoint, assume Ollama
            EmbeddingProvider::Ollama
        } else {
            EmbeddingProvider::OpenAI
        };

        Self {
            provider,
            model: config.embedding_model().to_string(),
            dimension: config.embedding_dimension(),
            endpoint: config.llm_endpoint().to_string(),
            api_key: if provider == EmbeddingProvider::OpenAI {
                Some(config.llm_key().to_string())
            } else {
                None
            },
        }
    }
}

/// Scale a vector to unit L2 norm.
///
/// Zero vectors are returned unchanged; they have no direction to preserve.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Preprocess text for embedding generation
///
/// Normalizes newlines and collapses whitespace. Empty or whitespace-only
/// text is an error: there is nothing to embed.
pub fn preprocess_text_for_embedding(text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(FaqRagError::EmbeddingError(
            "Empty text provided".to_string(),
        ));
    }

    Ok(text.split_whitespace().collect::<Vec<&str>>().join(" "))
}
