//! On-disk persistence of crawled page text.
//!
//! Each fetched page lands as one `.txt` file under `text/{domain}/`. The
//! filename is derived from the URL so a later processing pass can recover
//! a human-readable record name from it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Characters that cannot appear in a filename on common filesystems
const INVALID_FILENAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Writes page text files into one domain's text directory.
#[derive(Debug)]
pub struct PageStore {
    dir: PathBuf,
}

impl PageStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Persist one page's text under the filename derived from its URL.
    pub fn store_page(&self, url: &str, text: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.join(file_name_for_url(url));
        fs::write(&path, text)?;
        debug!("Wrote page text to {}", path.display());
        Ok(path)
    }

    /// The directory pages are written into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Derive the text filename for a page URL.
///
/// The scheme is dropped and every filesystem-hostile character in the
/// remainder becomes an underscore, so the URL path stays recoverable.
pub fn file_name_for_url(url: &str) -> String {
    let without_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let safe: String = without_scheme
        .chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("{safe}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn filename_drops_scheme_and_escapes_separators() {
        assert_eq!(
            file_name_for_url("https://example.com/docs/intro"),
            "example.com_docs_intro.txt"
        );
    }

    #[test]
    fn filename_escapes_query_characters() {
        assert_eq!(
            file_name_for_url("https://example.com/search?q=rust"),
            "example.com_search_q=rust.txt"
        );
    }

    #[test]
    fn filename_keeps_port_colon_escaped() {
        assert_eq!(
            file_name_for_url("http://example.com:8080/x"),
            "example.com_8080_x.txt"
        );
    }

    #[test]
    fn store_writes_one_file_per_page() {
        let dir = tempdir().unwrap();
        let store = PageStore::create(dir.path().join("text").join("example.com")).unwrap();

        let path = store
            .store_page("https://example.com/about", "About us")
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "About us");
        assert!(path.ends_with("example.com_about.txt"));
    }
}
