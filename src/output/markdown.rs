//! Per-document Markdown files
//!
//! Each kept document becomes `{index:03}_{safe_name}.md` in the output
//! directory, where the index is the document's position in crawl order.

use crate::crawler::Document;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_SAFE_NAME_CHARS: usize = 50;

/// Writes one Markdown file per document
///
/// # Returns
///
/// The paths written, in document order
pub fn write_markdown_files(documents: &[Document], directory: &Path) -> OutputResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(documents.len());

    for (index, document) in documents.iter().enumerate() {
        let path = directory.join(document_file_name(index, &document.url));
        let mut file = File::create(&path)?;
        file.write_all(render_document(document).as_bytes())?;
        written.push(path);
    }

    Ok(written)
}

/// Builds the file name for the document at `index`
///
/// The scheme is dropped, `/` becomes `_`, `:` is removed and the result is
/// cut to 50 characters.
pub fn document_file_name(index: usize, url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let safe_name: String = without_scheme
        .chars()
        .filter(|c| *c != ':')
        .map(|c| if c == '/' { '_' } else { c })
        .take(MAX_SAFE_NAME_CHARS)
        .collect();

    format!("{:03}_{}.md", index, safe_name)
}

/// Formats a document with its title, source and depth header
pub fn render_document(document: &Document) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", document.title));
    md.push_str(&format!("**Source**: {}\n\n", document.url));
    md.push_str(&format!("**Depth**: {}\n\n", document.depth));
    md.push_str("---\n\n");
    md.push_str(&document.content);

    md
}
