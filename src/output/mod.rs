//! Output module for persisting crawled documents and reporting results
//!
//! This module handles:
//! - Writing the document corpus as JSON Lines
//! - Writing one Markdown file per document
//! - Printing a summary of the crawl run

mod jsonl;
mod markdown;
pub mod stats;

pub use jsonl::write_jsonl;
pub use markdown::{document_file_name, render_document, write_markdown_files};
pub use stats::{format_report, print_report};

use crate::config::OutputConfig;
use crate::crawler::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize document {url}: {source}")]
    Serialize {
        url: String,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Paths produced by [`write_outputs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub jsonl_path: PathBuf,
    pub markdown_files: Vec<PathBuf>,
}

/// Writes every configured output for a document set
///
/// Creates the output directory if needed, writes the JSONL corpus and, when
/// enabled, the per-document Markdown files.
pub fn write_outputs(documents: &[Document], config: &OutputConfig) -> OutputResult<WrittenOutputs> {
    let directory = Path::new(&config.directory);
    ensure_directory(directory)?;

    let jsonl_path = directory.join(&config.jsonl_file);
    write_jsonl(documents, &jsonl_path)?;
    tracing::info!("Wrote {} documents to {}", documents.len(), jsonl_path.display());

    let markdown_files = if config.markdown_files {
        let files = write_markdown_files(documents, directory)?;
        tracing::info!("Wrote {} Markdown files to {}", files.len(), directory.display());
        files
    } else {
        Vec::new()
    };

    Ok(WrittenOutputs {
        jsonl_path,
        markdown_files,
    })
}

fn ensure_directory(path: &Path) -> OutputResult<()> {
    std::fs::create_dir_all(path).map_err(|source| OutputError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_documents() -> Vec<Document> {
        vec![Document {
            url: "https://example.com/guide".to_string(),
            depth: 1,
            title: "Guide".to_string(),
            headings: vec!["Install".to_string()],
            content: "Run the installer.".to_string(),
            links: vec![],
        }]
    }

    #[test]
    fn test_write_outputs_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = OutputConfig {
            directory: temp_dir.path().join("out/docs").to_string_lossy().into_owned(),
            jsonl_file: "corpus.jsonl".to_string(),
            markdown_files: true,
        };

        let written = write_outputs(&sample_documents(), &config).unwrap();

        assert!(written.jsonl_path.ends_with("out/docs/corpus.jsonl"));
        assert!(written.jsonl_path.exists());
        assert_eq!(written.markdown_files.len(), 1);
        assert!(written.markdown_files[0].exists());
    }

    #[test]
    fn test_write_outputs_without_markdown() {
        let temp_dir = TempDir::new().unwrap();
        let config = OutputConfig {
            directory: temp_dir.path().to_string_lossy().into_owned(),
            jsonl_file: "corpus.jsonl".to_string(),
            markdown_files: false,
        };

        let written = write_outputs(&sample_documents(), &config).unwrap();

        assert!(written.markdown_files.is_empty());
        let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
