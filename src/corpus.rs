//! Corpus data model and persistence.
//!
//! Artifacts live under an explicit base path, scoped by domain:
//!
//! - `text/{domain}/{page}.txt` — raw tag-stripped page text (crawler)
//! - `processed/{domain}/scraped.csv` — `id, fname, text` (processor)
//! - `processed/{domain}/embeddings.csv` — `text, n_tokens, embeddings`
//!   where `embeddings` is a bracketed comma-separated float list
//!
//! One corpus per domain; storing a corpus overwrites any prior one.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::tokenizer::count_tokens;

/// Filesystem layout for one data directory.
///
/// The base path is threaded through every stage; nothing changes the
/// process working directory.
#[derive(Debug, Clone)]
pub struct DataLayout {
    base: PathBuf,
}

impl DataLayout {
    /// Create a layout rooted at `base`
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Directory holding one text file per crawled page
    pub fn text_dir(&self, domain: &str) -> PathBuf {
        self.base.join("text").join(domain)
    }

    /// Directory holding the tabular artifacts for a domain
    pub fn processed_dir(&self, domain: &str) -> PathBuf {
        self.base.join("processed").join(domain)
    }

    /// Path of the scraped-records table
    pub fn scraped_csv(&self, domain: &str) -> PathBuf {
        self.processed_dir(domain).join("scraped.csv")
    }

    /// Path of the embedded-corpus table
    pub fn embeddings_csv(&self, domain: &str) -> PathBuf {
        self.processed_dir(domain).join("embeddings.csv")
    }
}

/// One row of the scraped-records table: a cleaned page text with a dense,
/// 0-based id assigned in load order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedRow {
    /// Dense record id
    pub id: usize,

    /// Name derived from the page's URL path
    pub fname: String,

    /// Cleaned page text, prefixed with the name
    pub text: String,
}

/// A token-bounded slice of page text, the unit of embedding and retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Chunk text
    pub text: String,

    /// Token count of `text` under the shared tokenizer
    pub n_tokens: usize,
}

/// A chunk plus its embedding vector.
#[derive(Debug, Clone)]
pub struct EmbeddingRecord {
    /// Chunk text
    pub text: String,

    /// Token count of `text`
    pub n_tokens: usize,

    /// Embedding vector; dimensionality is constant across a corpus
    pub embedding: Vec<f64>,
}

/// CSV row shape for `embeddings.csv`
#[derive(Debug, Serialize, Deserialize)]
struct EmbeddingRow {
    text: String,
    n_tokens: usize,
    embeddings: String,
}

/// The full persisted set of embedded chunks for one domain.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Embedded chunks in corpus order
    pub records: Vec<EmbeddingRecord>,
}

impl Corpus {
    /// Persist the corpus, overwriting any prior corpus for the domain.
    pub fn store(&self, layout: &DataLayout, domain: &str) -> Result<()> {
        std::fs::create_dir_all(layout.processed_dir(domain))?;

        let path = layout.embeddings_csv(domain);
        let mut writer = csv::Writer::from_path(&path)?;
        for record in &self.records {
            writer.serialize(EmbeddingRow {
                text: record.text.clone(),
                n_tokens: record.n_tokens,
                embeddings: format_embedding(&record.embedding),
            })?;
        }
        writer.flush()?;

        info!("Stored {} records to {}", self.records.len(), path.display());
        Ok(())
    }

    /// Load a stored corpus.
    ///
    /// Token counts are recomputed from the text rather than trusted from
    /// the file. A malformed vector is an unrecoverable parse failure.
    pub fn load(layout: &DataLayout, domain: &str) -> Result<Self> {
        let path = layout.embeddings_csv(domain);
        let mut reader = csv::Reader::from_path(&path)?;

        let mut records = Vec::new();
        for row in reader.deserialize::<EmbeddingRow>() {
            let row = row?;
            let embedding = parse_embedding(&row.embeddings)?;
            let n_tokens = count_tokens(&row.text);
            records.push(EmbeddingRecord {
                text: row.text,
                n_tokens,
                embedding,
            });
        }

        info!("Loaded {} records from {}", records.len(), path.display());
        Ok(Self { records })
    }
}

/// Render a vector as a bracketed comma-separated list.
fn format_embedding(values: &[f64]) -> String {
    let joined = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("[{joined}]")
}

/// Parse a bracketed comma-separated list back into a vector.
fn parse_embedding(raw: &str) -> Result<Vec<f64>> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| Error::Corpus(format!("malformed embedding value {part:?}: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn layout_paths_are_domain_scoped() {
        let layout = DataLayout::new("/data");
        assert_eq!(
            layout.text_dir("example.com"),
            PathBuf::from("/data/text/example.com")
        );
        assert_eq!(
            layout.scraped_csv("example.com"),
            PathBuf::from("/data/processed/example.com/scraped.csv")
        );
        assert_eq!(
            layout.embeddings_csv("example.com"),
            PathBuf::from("/data/processed/example.com/embeddings.csv")
        );
    }

    #[test]
    fn embedding_list_round_trips() {
        let values = vec![0.25, -1.5, 3.0000000000000004, 0.0];
        let parsed = parse_embedding(&format_embedding(&values)).unwrap();
        assert_eq!(parsed, values);
    }

    #[test]
    fn malformed_embedding_is_an_error() {
        assert!(parse_embedding("[0.1,oops,0.3]").is_err());
    }

    #[test]
    fn corpus_round_trips_through_csv() {
        let dir = tempdir().unwrap();
        let layout = DataLayout::new(dir.path());

        let corpus = Corpus {
            records: vec![
                EmbeddingRecord {
                    text: "first chunk, with a comma and \"quotes\"".to_string(),
                    n_tokens: 0,
                    embedding: vec![0.1, 0.2],
                },
                EmbeddingRecord {
                    text: "second chunk".to_string(),
                    n_tokens: 0,
                    embedding: vec![-0.3, 0.4],
                },
            ],
        };
        corpus.store(&layout, "example.com").unwrap();

        let loaded = Corpus::load(&layout, "example.com").unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[0].text, corpus.records[0].text);
        assert_eq!(loaded.records[0].embedding, vec![0.1, 0.2]);
        assert_eq!(loaded.records[1].embedding, vec![-0.3, 0.4]);
        // counts come from the tokenizer, not the stored column
        assert!(loaded.records[0].n_tokens > 0);
    }

    #[test]
    fn store_overwrites_prior_corpus() {
        let dir = tempdir().unwrap();
        let layout = DataLayout::new(dir.path());

        let first = Corpus {
            records: vec![EmbeddingRecord {
                text: "old".to_string(),
                n_tokens: 1,
                embedding: vec![1.0],
            }],
        };
        first.store(&layout, "example.com").unwrap();

        let second = Corpus {
            records: vec![EmbeddingRecord {
                text: "new".to_string(),
                n_tokens: 1,
                embedding: vec![2.0],
            }],
        };
        second.store(&layout, "example.com").unwrap();

        let loaded = Corpus::load(&layout, "example.com").unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].text, "new");
    }
}
