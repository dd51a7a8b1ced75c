//! In-memory knowledge store for tests and embedded use

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::KnowledgeStore;
use super::QaPair;
use crate::errors::FaqRagError;
use crate::errors::Result;

/// Knowledge store backed by a process-local vector.
///
/// Mirrors the duplicate semantics of [`super::PgStore`]: appends never
/// overwrite, and lookups return the oldest matching pair.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pairs: Mutex<Vec<QaPair>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing pairs
    pub fn with_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.pairs.lock().expect("store mutex poisoned");
            for (question, answer) in pairs {
                let id = guard.len() as i64 + 1;
                guard.push(QaPair {
                    id,
                    question,
                    answer,
                    created_at: Utc::now(),
                });
            }
        }
        store
    }

    /// Number of stored pairs (duplicates included)
    pub fn len(&self) -> usize {
        self.pairs.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KnowledgeStore for MemoryStore {
    async fn fetch_all_questions(&self) -> Result<Vec<String>> {
        let guard = self.pairs.lock().expect("store mutex poisoned");
        Ok(guard.iter().map(|p| p.question.clone()).collect())
    }

    async fn fetch_answer(&self, question: &str) -> Result<String> {
        let guard = self.pairs.lock().expect("store mutex poisoned");
        guard
            .iter()
            .find(|p| p.question == question)
            .map(|p| p.answer.clone())
            .ok_or_else(|| FaqRagError::AnswerNotFound(question.to_string()))
    }

    async fn append(&self, question: &str, answer: &str) -> Result<()> {
        let mut guard = self.pairs.lock().expect("store mutex poisoned");
        let id = guard.len() as i64 + 1;
        guard.push(QaPair {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }
}
