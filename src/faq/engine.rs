//! Response decision engine
//!
//! Two terminal outcomes per request: a question either clears the match
//! threshold and is answered from the knowledge store, or it is answered by
//! the fallback generator and the new pair is persisted.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::corpus::CorpusCache;
use super::matcher::SimilarityMatcher;
use super::ANSWER_WORD_LIMIT;
use super::APOLOGY_MESSAGE;
use super::MATCH_THRESHOLD;
use super::POLITENESS_SUFFIX;
use crate::embeddings::Encoder;
use crate::errors::FaqRagError;
use crate::errors::Result;
use crate::llm::AnswerGenerator;
use crate::store::KnowledgeStore;

/// How a reply was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Answered from the knowledge store
    Matched { question: String, score: f32 },
    /// Answered by the fallback generator
    Generated,
}

/// Final reply for an incoming question
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub text: String,
    pub outcome: Outcome,
}

/// FAQ answering service
///
/// Owns the corpus cache and the decision of whether a new pair is written;
/// collaborators are injected so every failure path is testable.
pub struct FaqService {
    store: Arc<dyn KnowledgeStore>,
    matcher: SimilarityMatcher,
    generator: Arc<dyn AnswerGenerator>,
    corpus: CorpusCache,
}

impl FaqService {
    /// Create a new service from its collaborators.
    ///
    /// The corpus starts empty; call [`FaqService::init`] to warm it from
    /// the store.
    pub fn new(
        store: Arc<dyn KnowledgeStore>,
        encoder: Arc<dyn Encoder>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        let matcher = SimilarityMatcher::new(encoder);
        let corpus = CorpusCache::new(Arc::clone(&store));

        Self {
            store,
            matcher,
            generator,
            corpus,
        }
    }

    /// Load the corpus from the store at startup
    pub async fn init(&self) -> Result<()> {
        let corpus = self.corpus.load().await?;
        info!("FAQ corpus loaded: {} questions", corpus.len());
        Ok(())
    }

    /// Answer an incoming question.
    ///
    /// # Errors
    /// Encoding failures (and unexpected store read failures) propagate;
    /// every domain failure - empty corpus, store lookup miss, generator
    /// unavailable, degraded write - is recovered into a text reply.
    pub async fn answer(&self, question: &str) -> Result<Reply> {
        let corpus = self.corpus.current();

        // An empty corpus has nothing to match against
        if corpus.is_empty() {
            debug!("Corpus empty, generating directly");
            return self.generate_reply(question).await;
        }

        let m = self.matcher.best_match(question, &corpus).await?;

        if m.score > MATCH_THRESHOLD {
            match self.store.fetch_answer(&m.question).await {
                Ok(answer) => {
                    info!(
                        "Matched {:?} (score {:.4}), answering from store",
                        m.question, m.score
                    );
                    let text = format!(
                        "{}{POLITENESS_SUFFIX}",
                        truncate_words(&answer, ANSWER_WORD_LIMIT)
                    );
                    return Ok(Reply {
                        text,
                        outcome: Outcome::Matched {
                            question: m.question,
                            score: m.score,
                        },
                    });
                }
                // The cache said the question exists but the store disagrees.
                // Answer it the same way an unknown question is answered.
                Err(FaqRagError::AnswerNotFound(q)) => {
                    warn!("Matched question {q:?} has no stored answer, generating instead");
                }
                Err(e) => return Err(e),
            }
        } else {
            debug!(
                "Best score {:.4} below threshold {MATCH_THRESHOLD}, generating",
                m.score
            );
        }

        self.generate_reply(question).await
    }

    /// Generated path: produce an answer, persist the pair, refresh the corpus
    async fn generate_reply(&self, question: &str) -> Result<Reply> {
        let answer = match self.generator.generate(question).await {
            Ok(answer) => answer,
            Err(FaqRagError::GenerationUnavailable(reason)) => {
                warn!("Fallback generator unavailable: {reason}");
                // The apology is a substitute, not knowledge - never persisted
                return Ok(Reply {
                    text: APOLOGY_MESSAGE.to_string(),
                    outcome: Outcome::Generated,
                });
            }
            Err(e) => return Err(e),
        };

        match self.store.append(question, &answer).await {
            Ok(()) => {
                if let Err(e) = self.corpus.load().await {
                    warn!("Corpus reload failed after append, keeping previous snapshot: {e}");
                }
            }
            Err(e) => {
                // Degraded write: the reply still goes out, the store is
                // reconciled later
                warn!("Store append failed, pair not persisted: {e}");
            }
        }

        Ok(Reply {
            text: answer,
            outcome: Outcome::Generated,
        })
    }

    /// Force a corpus reload; returns the new corpus size
    pub async fn reload_corpus(&self) -> Result<usize> {
        let corpus = self.corpus.load().await?;
        Ok(corpus.len())
    }

    /// Number of questions in the current corpus snapshot
    pub fn corpus_len(&self) -> usize {
        self.corpus.current().len()
    }
}

/// Keep the first `limit` whitespace-delimited words of `text`.
///
/// Texts at or under the limit pass through byte-for-byte; truncated texts
/// are rejoined with single spaces.
pub fn truncate_words(text: &str, limit: usize) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() > limit {
        tokens[..limit].join(" ")
    } else {
        text.to_string()
    }
}
