//! Shared token accounting for the pipeline.
//!
//! Every stage that needs a token count goes through [`count_tokens`] so the
//! whole pipeline agrees on one vocabulary. Counts are recomputed from text
//! wherever they cross a format boundary; nothing downstream trusts a count
//! that was written to disk.

use std::sync::OnceLock;

use tiktoken_rs::{cl100k_base, CoreBPE};

fn bpe() -> &'static CoreBPE {
    static BPE: OnceLock<CoreBPE> = OnceLock::new();
    BPE.get_or_init(|| cl100k_base().expect("must load cl100k_base vocabulary"))
}

/// Count the tokens of `text` under the shared vocabulary.
pub fn count_tokens(text: &str) -> usize {
    bpe().encode_ordinary(text).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_stable() {
        let text = "The quick brown fox jumps over the lazy dog.";
        let n = count_tokens(text);
        assert!(n > 0);
        assert_eq!(n, count_tokens(text));
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert_eq!(count_tokens(""), 0);
    }

    #[test]
    fn longer_text_has_more_tokens() {
        let short = "hello world";
        let long = "hello world hello world hello world hello world";
        assert!(count_tokens(long) > count_tokens(short));
    }
}
