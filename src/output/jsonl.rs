//! JSON Lines corpus writer

use crate::crawler::Document;
use crate::output::{OutputError, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one JSON object per document, one document per line
///
/// Non-ASCII text is written as UTF-8, not escaped. An empty document set
/// produces an empty file.
pub fn write_jsonl(documents: &[Document], path: &Path) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    for document in documents {
        serde_json::to_writer(&mut writer, document).map_err(|source| OutputError::Serialize {
            url: document.url.clone(),
            source,
        })?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}
