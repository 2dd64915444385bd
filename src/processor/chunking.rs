//! Greedy sentence-level chunking under a token budget.
//!
//! Text is split on `". "` boundaries and sentences are packed greedily into
//! chunks. A chunk closes as soon as adding the next sentence would exceed
//! the budget. Sentences that are individually larger than the budget are
//! dropped entirely; splitting mid-sentence would embed half-thoughts.

use tracing::warn;

use crate::corpus::Chunk;
use crate::tokenizer::count_tokens;

/// Split `text` into chunks of at most `max_tokens` tokens each.
///
/// Sentence order is preserved and every chunk ends with a period. Each
/// returned chunk's `n_tokens` is recomputed from its final text, since the
/// joined text tokenizes differently than the sum of its sentences.
pub fn split_into_many(text: &str, max_tokens: usize) -> Vec<Chunk> {
    let sentences: Vec<&str> = text.split(". ").filter(|s| !s.is_empty()).collect();

    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut tokens_so_far = 0usize;

    for sentence in sentences {
        let n_tokens = count_tokens(sentence);

        if tokens_so_far + n_tokens > max_tokens && !current.is_empty() {
            chunks.push(format!("{}.", current.join(". ")));
            current.clear();
            tokens_so_far = 0;
        }

        // a single sentence over the budget cannot be packed at all
        if n_tokens > max_tokens {
            warn!("Dropping sentence of {n_tokens} tokens, over the {max_tokens} token budget");
            continue;
        }

        current.push(sentence);
        tokens_so_far += n_tokens + 1;
    }

    if !current.is_empty() {
        chunks.push(format!("{}.", current.join(". ")));
    }

    chunks
        .into_iter()
        .map(|text| {
            let n_tokens = count_tokens(&text);
            Chunk { text, n_tokens }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_yields_single_chunk() {
        let chunks = split_into_many("One sentence. Another sentence", 500);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "One sentence. Another sentence.");
        assert_eq!(chunks[0].n_tokens, count_tokens(&chunks[0].text));
    }

    #[test]
    fn chunks_respect_the_token_budget() {
        let text = (0..40)
            .map(|i| format!("This is sentence number {i} with a few extra words in it"))
            .collect::<Vec<_>>()
            .join(". ");
        let max_tokens = 50;

        let chunks = split_into_many(&text, max_tokens);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.n_tokens <= max_tokens + 1, "chunk of {} tokens", chunk.n_tokens);
            assert!(chunk.text.ends_with('.'));
        }
    }

    #[test]
    fn sentence_order_is_preserved() {
        let text = (0..20)
            .map(|i| format!("Numbered sentence {i:02} padded with several additional words here"))
            .collect::<Vec<_>>()
            .join(". ");

        let chunks = split_into_many(&text, 40);
        let rejoined = chunks
            .iter()
            .map(|c| c.text.trim_end_matches('.'))
            .collect::<Vec<_>>()
            .join(". ");
        for i in 0..20 {
            let needle = format!("Numbered sentence {i:02}");
            assert!(rejoined.contains(&needle));
        }
        let first = rejoined.find("Numbered sentence 00").unwrap();
        let last = rejoined.find("Numbered sentence 19").unwrap();
        assert!(first < last);
    }

    #[test]
    fn oversized_sentence_is_dropped() {
        let huge = ["word"; 200].join(" ");
        let text = format!("Small one. {huge}. Small two");

        let chunks = split_into_many(&text, 30);
        let all = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(all.contains("Small one"));
        assert!(all.contains("Small two"));
        assert!(!all.contains("word word word"));
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_into_many("", 100).is_empty());
    }
}
