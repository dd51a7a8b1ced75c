//! Similarity scoring of an incoming question against the corpus

use std::sync::Arc;

use tracing::debug;

use super::corpus::Corpus;
use crate::embeddings::Encoder;
use crate::errors::FaqRagError;
use crate::errors::Result;

/// Best-scoring corpus entry for an incoming question
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub question: String,
    pub score: f32,
}

/// Compute cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Scores questions against the corpus and selects the best candidate
pub struct SimilarityMatcher {
    encoder: Arc<dyn Encoder>,
}

impl SimilarityMatcher {
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Self { encoder }
    }

    /// Find the corpus entry most similar to `question`.
    ///
    /// The incoming question is encoded once, the corpus in one batch; the
    /// argmax is stable - on tied scores the entry that appears first in the
    /// corpus wins.
    ///
    /// # Errors
    /// - [`FaqRagError::EmptyCorpus`] when the corpus has no entries
    /// - encoding failures, fatal to the request
    pub async fn best_match(&self, question: &str, corpus: &Corpus) -> Result<Match> {
        if corpus.is_empty() {
            return Err(FaqRagError::EmptyCorpus);
        }

        let question_vec = self.encoder.encode(question).await?;

        let entries: Vec<&str> = corpus.iter().collect();
        let corpus_vecs = self.encoder.encode_batch(&entries).await?;

        let mut best_index = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (index, vec) in corpus_vecs.iter().enumerate() {
            let score = cosine_similarity(&question_vec, vec);
            // Strict comparison keeps the first occurrence on ties
            if score > best_score {
                best_index = index;
                best_score = score;
            }
        }

        debug!(
            "Best match for {:?}: {:?} (score {:.4})",
            question, entries[best_index], best_score
        );

        Ok(Match {
            question: entries[best_index].to_string(),
            score: best_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::testing::OneHotEncoder;

    fn corpus(entries: &[&str]) -> Corpus {
        Corpus::from_questions(entries.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[tokio::test]
    async fn test_empty_corpus_is_an_error() {
        let matcher = SimilarityMatcher::new(Arc::new(OneHotEncoder::new(8)));
        let result = matcher.best_match("อะไร", &corpus(&[])).await;
        assert!(matches!(result, Err(FaqRagError::EmptyCorpus)));
    }

    #[tokio::test]
    async fn test_self_similarity_wins() {
        let matcher = SimilarityMatcher::new(Arc::new(OneHotEncoder::new(8)));
        let corpus = corpus(&["สวัสดี", "ลาก่อน", "ขอบคุณ"]);

        let m = matcher.best_match("ลาก่อน", &corpus).await.unwrap();
        assert_eq!(m.question, "ลาก่อน");
        assert!((m.score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_score_in_range_and_member_of_corpus() {
        let matcher = SimilarityMatcher::new(Arc::new(OneHotEncoder::new(16)));
        let corpus = corpus(&["a", "b", "c"]);

        let m = matcher.best_match("unrelated", &corpus).await.unwrap();
        assert!(m.score >= -1.0 && m.score <= 1.0);
        assert!(corpus.contains(&m.question));
    }

    #[tokio::test]
    async fn test_tie_break_first_occurrence_wins() {
        // All corpus entries are orthogonal to the question, so every score
        // ties at 0.0 and the first entry must be selected.
        let matcher = SimilarityMatcher::new(Arc::new(OneHotEncoder::new(8)));
        let corpus = corpus(&["first", "second", "third"]);

        let m = matcher.best_match("elsewhere", &corpus).await.unwrap();
        assert_eq!(m.question, "first");
        assert!(m.score.abs() < 1e-6);
    }
}
