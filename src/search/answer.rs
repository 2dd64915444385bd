//! Question answering over a retrieved context.
//!
//! Builds the grounded prompt from the packed context and runs it through
//! the completion endpoint. Answering is best-effort at the edges: any
//! service failure yields an empty answer rather than an error, so callers
//! can treat "no answer" uniformly.

use tracing::warn;

use crate::corpus::Corpus;
use crate::openai::{Client, CompletionRequest, COMPLETION_MODEL};

use super::{create_context, DEFAULT_MAX_CONTEXT_TOKENS};

/// Options for answer generation
#[derive(Debug, Clone)]
pub struct AnswerOptions {
    /// Completion model to use
    pub model: String,

    /// Token budget for the retrieved context
    pub max_context_tokens: usize,

    /// Maximum tokens in the generated answer
    pub max_answer_tokens: u32,

    /// Optional stop sequence for the completion
    pub stop: Option<String>,
}

impl Default for AnswerOptions {
    fn default() -> Self {
        Self {
            model: COMPLETION_MODEL.to_string(),
            max_context_tokens: DEFAULT_MAX_CONTEXT_TOKENS,
            max_answer_tokens: 150,
            stop: None,
        }
    }
}

/// Assemble the grounded prompt for a question and its context.
///
/// The instruction tells the model to admit ignorance rather than answer
/// from outside the context.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the question based on the context below, and if the question can't be answered based on the context, say \"I don't know\"\n\nContext: {context}\n\n---\n\nQuestion: {question}\nAnswer:"
    )
}

/// Answer a question against a stored corpus.
///
/// Returns the trimmed completion text, or an empty string when the
/// context cannot be built or the completion call fails. An empty context
/// still goes to the model; the prompt instructs it to say "I don't know".
pub async fn answer_question(
    client: &Client,
    corpus: &Corpus,
    question: &str,
    options: &AnswerOptions,
) -> String {
    let context =
        match create_context(client, corpus, question, options.max_context_tokens).await {
            Ok(context) => context,
            Err(e) => {
                warn!("Failed to build context: {e}");
                return String::new();
            }
        };

    let mut request = CompletionRequest::deterministic(&options.model, build_prompt(&context, question));
    request.max_tokens = options.max_answer_tokens;
    request.stop = options.stop.clone().map(|s| vec![s]);

    match client.complete(&request).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Completion failed: {e}");
            String::new()
        }
    }
}
