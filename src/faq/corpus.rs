//! In-process mirror of the known-question set

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::RwLock;

use tracing::debug;

use crate::errors::Result;
use crate::store::KnowledgeStore;

/// Deduplicated set of known questions, store order preserved.
///
/// First occurrence wins on duplicates, which keeps the matcher's
/// first-occurrence tie-break deterministic for a given store state.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    questions: Vec<String>,
}

impl Corpus {
    /// Build a corpus from raw store questions, dropping duplicates
    pub fn from_questions(questions: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let questions = questions
            .into_iter()
            .filter(|q| seen.insert(q.clone()))
            .collect();
        Self { questions }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn contains(&self, question: &str) -> bool {
        self.questions.iter().any(|q| q == question)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.questions
    }
}

/// Process-owned cache of the corpus, rebuilt wholesale from the store.
///
/// Every refresh is a full reload: the snapshot is always exactly "the store
/// as of the last reload", never a partially-applied patch. Readers take an
/// `Arc` of the latest snapshot and are never blocked by a reload in
/// progress; the swap publishes a complete new snapshot atomically.
pub struct CorpusCache {
    store: Arc<dyn KnowledgeStore>,
    snapshot: RwLock<Arc<Corpus>>,
}

impl CorpusCache {
    /// Create an empty cache; call [`CorpusCache::load`] to populate it
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self {
            store,
            snapshot: RwLock::new(Arc::new(Corpus::default())),
        }
    }

    /// Reload the corpus from the store, replacing the snapshot wholesale
    pub async fn load(&self) -> Result<Arc<Corpus>> {
        let questions = self.store.fetch_all_questions().await?;
        let corpus = Arc::new(Corpus::from_questions(questions));
        debug!("Corpus reloaded: {} unique questions", corpus.len());

        *self.snapshot.write().expect("corpus lock poisoned") = Arc::clone(&corpus);
        Ok(corpus)
    }

    /// The last-loaded snapshot; empty until the first load
    pub fn current(&self) -> Arc<Corpus> {
        Arc::clone(&self.snapshot.read().expect("corpus lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_corpus_deduplicates_preserving_order() {
        let corpus = Corpus::from_questions(vec![
            "a".to_string(),
            "b".to_string(),
            "a".to_string(),
            "c".to_string(),
            "b".to_string(),
        ]);

        assert_eq!(corpus.as_slice(), &["a", "b", "c"]);
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::from_questions(Vec::new());
        assert!(corpus.is_empty());
        assert!(!corpus.contains("a"));
    }

    #[tokio::test]
    async fn test_cache_starts_empty() {
        let store = Arc::new(MemoryStore::new());
        let cache = CorpusCache::new(store);
        assert!(cache.current().is_empty());
    }

    #[tokio::test]
    async fn test_load_replaces_snapshot_wholesale() {
        let store = Arc::new(MemoryStore::with_pairs(vec![(
            "สวัสดี".to_string(),
            "สวัสดีครับ".to_string(),
        )]));
        let cache = CorpusCache::new(Arc::clone(&store) as Arc<dyn KnowledgeStore>);

        cache.load().await.unwrap();
        let first = cache.current();
        assert_eq!(first.len(), 1);

        store.append("ลาก่อน", "แล้วพบกันใหม่").await.unwrap();

        // Old snapshot is untouched until the next load
        assert_eq!(cache.current().len(), 1);

        cache.load().await.unwrap();
        assert_eq!(cache.current().len(), 2);
        assert!(cache.current().contains("ลาก่อน"));

        // The previously taken snapshot was never mutated in place
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_load_deduplicates_store_duplicates() {
        let store = Arc::new(MemoryStore::with_pairs(vec![
            ("q".to_string(), "first".to_string()),
            ("q".to_string(), "second".to_string()),
        ]));
        let cache = CorpusCache::new(store);

        let corpus = cache.load().await.unwrap();
        assert_eq!(corpus.len(), 1);
    }
}
