//! Semantic FAQ matching and self-updating knowledge base
//!
//! The core pipeline: an incoming question is scored against the cached
//! corpus of known questions; a sufficiently similar match is answered from
//! the knowledge store, anything else is answered by the fallback generator
//! and the new pair is persisted so the next occurrence matches.

pub mod corpus;
pub mod engine;
pub mod matcher;

pub use corpus::Corpus;
pub use corpus::CorpusCache;
pub use engine::FaqService;
pub use engine::Outcome;
pub use engine::Reply;
pub use matcher::cosine_similarity;
pub use matcher::Match;
pub use matcher::SimilarityMatcher;

/// Minimum similarity a corpus entry must exceed (strictly) to be answered
/// from the store.
pub const MATCH_THRESHOLD: f32 = 0.7;

/// Stored answers are truncated to this many whitespace-delimited words
/// before the politeness suffix is appended.
pub const ANSWER_WORD_LIMIT: usize = 20;

/// Politeness particle appended to every matched answer.
pub const POLITENESS_SUFFIX: &str = "ครับ";

/// Returned verbatim when the fallback generator cannot be reached.
pub const APOLOGY_MESSAGE: &str = "ขอโทษด้วย ฉันไม่สามารถให้คำตอบนี้ได้";

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic collaborators for unit tests

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::embeddings::Encoder;
    use crate::errors::FaqRagError;
    use crate::errors::Result;
    use crate::llm::AnswerGenerator;

    /// Encoder assigning each distinct text its own axis of a one-hot space.
    ///
    /// Same text always maps to the same unit vector; distinct texts are
    /// orthogonal, so self-similarity is 1.0 and cross-similarity is 0.0.
    pub struct OneHotEncoder {
        dimension: usize,
        axes: Mutex<HashMap<String, usize>>,
    }

    impl OneHotEncoder {
        pub fn new(dimension: usize) -> Self {
            Self {
                dimension,
                axes: Mutex::new(HashMap::new()),
            }
        }

        fn axis_for(&self, text: &str) -> usize {
            let mut axes = self.axes.lock().expect("axes mutex poisoned");
            let next = axes.len();
            *axes.entry(text.to_string()).or_insert(next)
        }
    }

    #[async_trait]
    impl Encoder for OneHotEncoder {
        async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            texts
                .iter()
                .map(|text| {
                    let axis = self.axis_for(text);
                    if axis >= self.dimension {
                        return Err(FaqRagError::EmbeddingError(format!(
                            "one-hot space exhausted at {axis} texts"
                        )));
                    }
                    let mut vector = vec![0.0; self.dimension];
                    vector[axis] = 1.0;
                    Ok(vector)
                })
                .collect()
        }
    }

    /// Encoder that always fails
    pub struct FailingEncoder;

    #[async_trait]
    impl Encoder for FailingEncoder {
        async fn encode_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Err(FaqRagError::EmbeddingError("encoder offline".to_string()))
        }
    }

    /// Generator returning a canned answer per question
    pub struct CannedGenerator {
        pub answer: String,
    }

    #[async_trait]
    impl AnswerGenerator for CannedGenerator {
        async fn generate(&self, question: &str) -> Result<String> {
            Ok(format!("{}: {question}", self.answer))
        }
    }

    /// Generator that is always unavailable
    pub struct UnavailableGenerator;

    #[async_trait]
    impl AnswerGenerator for UnavailableGenerator {
        async fn generate(&self, _question: &str) -> Result<String> {
            Err(FaqRagError::GenerationUnavailable(
                "backend unreachable".to_string(),
            ))
        }
    }
}
