//! Retrieval module
//!
//! Ranks a stored corpus against a question embedding by cosine distance
//! and packs the closest chunks into a token-budgeted context block for
//! the completion prompt.

mod answer;
mod error;

pub use answer::{answer_question, AnswerOptions};
pub use error::SearchError;

use tracing::debug;

use crate::corpus::{Corpus, EmbeddingRecord};
use crate::openai::Client;

/// Separator placed between chunks in the assembled context
pub const CONTEXT_SEPARATOR: &str = "\n\n###\n\n";

/// Flat per-chunk token overhead charged against the context budget,
/// covering the separator
pub const CHUNK_OVERHEAD_TOKENS: usize = 4;

/// Default token budget for the assembled context
pub const DEFAULT_MAX_CONTEXT_TOKENS: usize = 1800;

/// Cosine distance between two vectors: 0 for identical direction, 1 for
/// orthogonal, 2 for opposite.
///
/// A zero-magnitude vector has no direction; its distance to anything is
/// taken as the maximum.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 2.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

/// Rank corpus records by ascending cosine distance to the question vector.
///
/// Ties keep corpus order; the sort is stable.
pub fn rank_records<'a>(
    corpus: &'a Corpus,
    question: &[f64],
) -> Result<Vec<(f64, &'a EmbeddingRecord)>, SearchError> {
    if let Some(first) = corpus.records.first() {
        if first.embedding.len() != question.len() {
            return Err(SearchError::DimensionMismatch {
                expected: first.embedding.len(),
                actual: question.len(),
            });
        }
    }

    let mut ranked: Vec<(f64, &EmbeddingRecord)> = corpus
        .records
        .iter()
        .map(|record| (cosine_distance(question, &record.embedding), record))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(ranked)
}

/// Pack ranked chunks into a context block under a token budget.
///
/// Chunks are taken closest-first. The budget charges each chunk its token
/// count plus a flat separator overhead; the first chunk that would push
/// the total over the budget ends the context, even if a later smaller
/// chunk would still fit.
pub fn pack_context(ranked: &[(f64, &EmbeddingRecord)], max_tokens: usize) -> String {
    let mut parts = Vec::new();
    let mut cur_len = 0usize;

    for (_, record) in ranked {
        cur_len += record.n_tokens + CHUNK_OVERHEAD_TOKENS;
        if cur_len > max_tokens {
            break;
        }
        parts.push(record.text.as_str());
    }

    debug!("Packed {} chunks into context", parts.len());
    parts.join(CONTEXT_SEPARATOR)
}

/// Embed the question and assemble the context block for it.
pub async fn create_context(
    client: &Client,
    corpus: &Corpus,
    question: &str,
    max_tokens: usize,
) -> Result<String, SearchError> {
    let question_embedding = client.embed(question).await?;
    let ranked = rank_records(corpus, &question_embedding)?;
    Ok(pack_context(&ranked, max_tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, n_tokens: usize, embedding: Vec<f64>) -> EmbeddingRecord {
        EmbeddingRecord {
            text: text.to_string(),
            n_tokens,
            embedding,
        }
    }

    #[test]
    fn cosine_distance_spans_zero_to_two() {
        let q = [1.0, 0.0];
        assert!(cosine_distance(&q, &[2.0, 0.0]).abs() < 1e-12);
        assert!((cosine_distance(&q, &[0.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!((cosine_distance(&q, &[-1.0, 0.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_is_maximally_distant() {
        assert_eq!(cosine_distance(&[1.0, 0.0], &[0.0, 0.0]), 2.0);
    }

    #[test]
    fn ranking_is_ascending_and_stable() {
        let corpus = Corpus {
            records: vec![
                record("far", 1, vec![0.0, 1.0]),
                record("near first", 1, vec![1.0, 0.0]),
                record("near second", 1, vec![2.0, 0.0]),
            ],
        };

        let ranked = rank_records(&corpus, &[1.0, 0.0]).unwrap();
        assert_eq!(ranked[0].1.text, "near first");
        assert_eq!(ranked[1].1.text, "near second");
        assert_eq!(ranked[2].1.text, "far");
    }

    #[test]
    fn ranking_rejects_mismatched_dimensions() {
        let corpus = Corpus {
            records: vec![record("a", 1, vec![1.0, 0.0, 0.0])],
        };
        let result = rank_records(&corpus, &[1.0, 0.0]);
        assert!(matches!(
            result,
            Err(SearchError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn context_respects_the_token_budget() {
        let near = record("near", 10, vec![1.0, 0.0]);
        let far = record("far", 10, vec![0.9, 0.1]);
        let ranked = vec![(0.0, &near), (0.1, &far)];

        // each chunk costs 10 + 4; a budget of 20 admits only the first
        let context = pack_context(&ranked, 20);
        assert_eq!(context, "near");
    }

    #[test]
    fn context_joins_chunks_with_separator() {
        let a = record("alpha", 5, vec![1.0]);
        let b = record("beta", 5, vec![1.0]);
        let ranked = vec![(0.0, &a), (0.0, &b)];

        let context = pack_context(&ranked, 100);
        assert_eq!(context, "alpha\n\n###\n\nbeta");
    }

    #[test]
    fn overflow_stops_packing_even_when_later_chunks_fit() {
        let big = record("big", 50, vec![1.0]);
        let small = record("small", 1, vec![1.0]);
        let ranked = vec![(0.0, &big), (0.1, &small)];

        let context = pack_context(&ranked, 30);
        assert!(context.is_empty());
    }

    #[test]
    fn empty_corpus_yields_empty_context() {
        let corpus = Corpus::default();
        let ranked = rank_records(&corpus, &[1.0, 0.0]).unwrap();
        assert!(pack_context(&ranked, 100).is_empty());
    }
}
