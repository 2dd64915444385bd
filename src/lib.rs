//! # siteqa — question answering over a crawled website
//!
//! This crate builds a retrieval-augmented question-answering corpus from a
//! single website and answers free-text questions against it.
//!
//! ## Pipeline
//!
//! The build side runs four stages, each the sole writer of its artifact:
//!
//! 1. [`crawler`] — breadth-first crawl of every reachable in-domain page,
//!    persisting tag-stripped text, one file per page
//! 2. [`processor`] — cleaned tabular records and token-budgeted chunks
//! 3. [`model`] — embedding generation under simultaneous requests/minute
//!    and tokens/minute rate constraints
//! 4. [`corpus`] — CSV persistence of the embedded chunks, one corpus per
//!    domain
//!
//! The ask side ([`search`]) embeds a question, ranks stored chunks by
//! cosine distance, assembles a token-budgeted context and feeds it to a
//! completion model.
//!
//! ## Example
//!
//! ```rust,no_run
//! use siteqa::corpus::{Corpus, DataLayout};
//! use siteqa::search::{answer_question, AnswerOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = siteqa::openai::Client::from_env();
//!     let layout = DataLayout::new("./data");
//!     let corpus = Corpus::load(&layout, "example.com")?;
//!
//!     let answer = answer_question(
//!         &client,
//!         &corpus,
//!         "What does the site say about pricing?",
//!         &AnswerOptions::default(),
//!     )
//!     .await;
//!
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```

mod error;

pub mod corpus;
pub mod crawler;
pub mod model;
pub mod openai;
pub mod processor;
pub mod search;
pub mod tokenizer;

pub use error::Error;

/// Re-export of the crate error types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
