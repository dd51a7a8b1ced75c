//! Embedding generation service with preprocessing, batching and normalization

use std::sync::Arc;

use async_trait::async_trait;

use super::client::EmbeddingClient;
use super::client::EmbeddingProvider;
use super::l2_normalize;
use super::preprocess_text_for_embedding;
use super::Encoder;
use super::EmbeddingConfig;
use super::MAX_BATCH_SIZE;
use crate::errors::Result;

/// Service for generating normalized embeddings
///
/// Wraps [`EmbeddingClient`] with text preprocessing, batch chunking and
/// unconditional L2 normalization of every returned vector.
pub struct EmbeddingService {
    client: Arc<EmbeddingClient>,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Create a new embedding service
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        Self::from_config(EmbeddingConfig::from_app_config(config))
    }

    /// Create from custom config
    pub fn from_config(config: EmbeddingConfig) -> Result<Self> {
        let client = EmbeddingClient::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
        )?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Get the embedding dimension
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.config.dimension
    }

    /// Get the model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the provider
    #[must_use]
    pub const fn provider(&self) -> EmbeddingProvider {
        self.config.provider
    }
}

#[async_trait]
impl Encoder for EmbeddingService {
    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut processed = Vec::with_capacity(texts.len());
        for text in texts {
            processed.push(preprocess_text_for_embedding(text)?);
        }

        let mut embeddings = if processed.len() <= MAX_BATCH_SIZE {
            self.client
                .generate_batch(processed.iter().map(String::as_str).collect())
                .await?
        } else {
            // Split into chunks
            let mut all_embeddings = Vec::with_capacity(processed.len());
            for chunk in processed.chunks(MAX_BATCH_SIZE) {
                let chunk_embeddings = self
                    .client
                    .generate_batch(chunk.iter().map(String::as_str).collect())
                    .await?;
                all_embeddings.extend(chunk_embeddings);
            }
            all_embeddings
        };

        // Backends are not trusted to return unit vectors
        for embedding in &mut embeddings {
            l2_normalize(embedding);
        }

        Ok(embeddings)
    }

    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let processed = preprocess_text_for_embedding(text)?;
        let mut embedding = self.client.generate(&processed).await?;
        l2_normalize(&mut embedding);
        Ok(embedding)
    }
}
