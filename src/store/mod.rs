//! Durable question/answer storage
//!
//! The engine only needs three operations from the store: fetch every known
//! question, fetch the answer for an exact question, and append a new pair.
//! Appends are not idempotent - duplicate questions with different answers may
//! coexist. When duplicates exist, `fetch_answer` returns the answer of the
//! oldest stored pair.

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::Result;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A stored question/answer pair
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QaPair {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Interface to durable question/answer storage
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Fetch every stored question, in stable storage order.
    ///
    /// Duplicates are returned as stored; callers deduplicate.
    async fn fetch_all_questions(&self) -> Result<Vec<String>>;

    /// Fetch the answer for an exact question match.
    ///
    /// Fails with [`crate::FaqRagError::AnswerNotFound`] when the question is
    /// absent. The oldest stored pair wins when duplicates exist.
    async fn fetch_answer(&self, question: &str) -> Result<String>;

    /// Append a new question/answer pair.
    ///
    /// Failures map to [`crate::FaqRagError::StoreWriteError`].
    async fn append(&self, question: &str, answer: &str) -> Result<()>;
}
