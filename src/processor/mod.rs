//! Text processing module
//!
//! Turns the crawler's raw page text files into the tabular artifacts the
//! embedding stage consumes: a `scraped.csv` of cleaned, named records and
//! a list of token-bounded chunks.

mod chunking;
mod config;
mod error;

pub use chunking::split_into_many;
pub use config::{ProcessorConfig, ProcessorConfigBuilder, DEFAULT_MAX_CHUNK_TOKENS};
pub use error::ProcessError;

use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use crate::corpus::{Chunk, DataLayout, ScrapedRow};
use crate::tokenizer::count_tokens;

/// A scraped record with its token count attached
#[derive(Debug, Clone)]
pub struct TextRecord {
    /// Dense record id
    pub id: usize,

    /// Record name derived from the page filename
    pub fname: String,

    /// Cleaned text, prefixed with the record name
    pub text: String,

    /// Token count of `text`
    pub n_tokens: usize,
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("must compile whitespace regex"))
}

/// Collapse newlines, literal `\n` escapes and whitespace runs into single
/// spaces.
pub fn clean_text(text: &str) -> String {
    let replaced = text.replace('\n', " ").replace("\\n", " ");
    whitespace_runs().replace_all(&replaced, " ").into_owned()
}

/// Derive a record name from a page's text filename.
///
/// Strips the `{domain}_` prefix and the `.txt` suffix, turns dashes and
/// underscores into spaces and removes `#update` markers. A filename too
/// short to carry both affixes yields an empty name.
pub fn record_name(file_name: &str, domain: &str) -> String {
    let prefix_len = domain.len() + 1;
    let stem = file_name
        .get(prefix_len..file_name.len().saturating_sub(4))
        .unwrap_or("");
    stem.replace(['-', '_'], " ").replace("#update", "")
}

/// Build the scraped-records table from one domain's text directory and
/// persist it as `scraped.csv`.
///
/// Files are visited in filename order so ids are stable across runs. Each
/// record's text is its cleaned page text prefixed with the record name, so
/// the page's identity survives into every chunk cut from it.
pub fn build_records(layout: &DataLayout, domain: &str) -> Result<Vec<ScrapedRow>, ProcessError> {
    let text_dir = layout.text_dir(domain);

    let mut file_names: Vec<String> = std::fs::read_dir(&text_dir)?
        .filter_map(|entry| Some(entry.ok()?.file_name().to_string_lossy().into_owned()))
        .collect();
    file_names.sort();

    let mut rows = Vec::with_capacity(file_names.len());
    for (id, file_name) in file_names.iter().enumerate() {
        let raw = std::fs::read_to_string(text_dir.join(file_name))?;
        let name = record_name(file_name, domain);
        let text = format!("{name}.{}", clean_text(&raw));
        rows.push(ScrapedRow {
            id,
            fname: name,
            text,
        });
    }

    std::fs::create_dir_all(layout.processed_dir(domain))?;
    let csv_path = layout.scraped_csv(domain);
    let mut writer = csv::Writer::from_path(&csv_path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(ProcessError::Io)?;

    info!("Processed {} pages into {}", rows.len(), csv_path.display());
    Ok(rows)
}

/// Attach token counts to scraped rows.
pub fn tokenize_records(rows: Vec<ScrapedRow>) -> Vec<TextRecord> {
    rows.into_iter()
        .map(|row| {
            let n_tokens = count_tokens(&row.text);
            TextRecord {
                id: row.id,
                fname: row.fname,
                text: row.text,
                n_tokens,
            }
        })
        .collect()
}

/// Cut records into chunks that fit the configured token budget.
///
/// Records already under the budget pass through as a single chunk; larger
/// ones are split at sentence boundaries. Empty records are skipped.
pub fn chunk_records(records: &[TextRecord], config: &ProcessorConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for record in records {
        if record.text.is_empty() {
            continue;
        }
        if record.n_tokens > config.max_chunk_tokens {
            chunks.extend(split_into_many(&record.text, config.max_chunk_tokens));
        } else {
            chunks.push(Chunk {
                text: record.text.clone(),
                n_tokens: record.n_tokens,
            });
        }
    }
    info!("Cut {} records into {} chunks", records.len(), chunks.len());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("a\nb"), "a b");
        assert_eq!(clean_text("a\\nb"), "a b");
        assert_eq!(clean_text("a   b\t\tc"), "a b c");
    }

    #[test]
    fn record_name_strips_affixes() {
        assert_eq!(
            record_name("example.com_docs_getting-started.txt", "example.com"),
            "docs getting started"
        );
    }

    #[test]
    fn record_name_removes_update_marker() {
        assert_eq!(
            record_name("example.com_news#update.txt", "example.com"),
            "news"
        );
    }

    #[test]
    fn record_name_of_short_filename_is_empty() {
        assert_eq!(record_name("x.txt", "example.com"), "");
    }

    #[test]
    fn build_records_assigns_ids_in_filename_order() {
        let dir = tempdir().unwrap();
        let layout = DataLayout::new(dir.path());
        let text_dir = layout.text_dir("example.com");
        std::fs::create_dir_all(&text_dir).unwrap();
        std::fs::write(text_dir.join("example.com_b-page.txt"), "Second\npage").unwrap();
        std::fs::write(text_dir.join("example.com_a-page.txt"), "First page").unwrap();

        let rows = build_records(&layout, "example.com").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 0);
        assert_eq!(rows[0].fname, "a page");
        assert_eq!(rows[0].text, "a page.First page");
        assert_eq!(rows[1].id, 1);
        assert_eq!(rows[1].text, "b page.Second page");

        // the table also lands on disk
        assert!(layout.scraped_csv("example.com").exists());
    }

    #[test]
    fn chunk_records_passes_small_texts_through() {
        let records = tokenize_records(vec![ScrapedRow {
            id: 0,
            fname: "page".to_string(),
            text: "page.A short text".to_string(),
        }]);

        let chunks = chunk_records(&records, &ProcessorConfig::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "page.A short text");
    }

    #[test]
    fn chunk_records_splits_large_texts() {
        let long_text = (0..60)
            .map(|i| format!("Sentence number {i} with some padding words added"))
            .collect::<Vec<_>>()
            .join(". ");
        let records = tokenize_records(vec![ScrapedRow {
            id: 0,
            fname: "long".to_string(),
            text: long_text,
        }]);

        let config = ProcessorConfig::builder().max_chunk_tokens(60).build();
        let chunks = chunk_records(&records, &config);
        assert!(chunks.len() > 1);
    }

    #[test]
    fn chunk_records_skips_empty_texts() {
        let records = vec![TextRecord {
            id: 0,
            fname: String::new(),
            text: String::new(),
            n_tokens: 0,
        }];
        assert!(chunk_records(&records, &ProcessorConfig::default()).is_empty());
    }
}
