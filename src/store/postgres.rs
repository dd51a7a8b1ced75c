//! PostgreSQL-backed knowledge store

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use super::KnowledgeStore;
use super::QaPair;
use crate::errors::FaqRagError;
use crate::errors::Result;

/// Knowledge store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new store instance from configuration
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout()));

        let pool = pool_options.connect(config.store_url()).await?;

        tracing::info!(
            "Store pool configured: max_connections={}, min_connections={}",
            config.max_connections(),
            config.min_connections()
        );

        Ok(Self::new(pool))
    }

    /// Create the `qa_pairs` table and its index if they don't exist
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS qa_pairs (
                id BIGSERIAL PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_qa_pairs_question ON qa_pairs (question)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetch all stored pairs, oldest first
    pub async fn fetch_all_pairs(&self) -> Result<Vec<QaPair>> {
        let pairs = sqlx::query_as::<_, QaPair>(
            "SELECT id, question, answer, created_at FROM qa_pairs ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pairs)
    }

    /// Get a reference to the pool for raw queries
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl KnowledgeStore for PgStore {
    async fn fetch_all_questions(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT question FROM qa_pairs ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("question")).collect())
    }

    async fn fetch_answer(&self, question: &str) -> Result<String> {
        // Oldest pair wins when duplicate questions exist
        let row = sqlx::query("SELECT answer FROM qa_pairs WHERE question = $1 ORDER BY id ASC LIMIT 1")
            .bind(question)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.get("answer"))
            .ok_or_else(|| FaqRagError::AnswerNotFound(question.to_string()))
    }

    async fn append(&self, question: &str, answer: &str) -> Result<()> {
        sqlx::query("INSERT INTO qa_pairs (question, answer) VALUES ($1, $2)")
            .bind(question)
            .bind(answer)
            .execute(&self.pool)
            .await
            .map_err(|e| FaqRagError::StoreWriteError(e.to_string()))?;

        Ok(())
    }
}
