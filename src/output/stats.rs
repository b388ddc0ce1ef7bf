//! Crawl report formatting
//!
//! This module turns the statistics of a finished crawl into the summary
//! printed at the end of a run.

use crate::crawler::CrawlOutcome;
use crate::output::WrittenOutputs;
use std::fmt::Write;

/// Formats the end-of-run summary
pub fn format_report(outcome: &CrawlOutcome, written: Option<&WrittenOutputs>) -> String {
    let stats = &outcome.stats;
    let mut report = String::new();

    let _ = writeln!(report, "=== Crawl Report ===\n");

    let _ = writeln!(report, "Overview:");
    let _ = writeln!(report, "  Documents collected: {}", outcome.documents.len());
    let _ = writeln!(report, "  URLs visited: {}", outcome.visited_count());
    let _ = writeln!(report, "  Links recorded: {}", stats.links_discovered);
    let _ = writeln!(report);

    let _ = writeln!(report, "Pages:");
    let _ = writeln!(report, "  Kept: {}", stats.pages_kept);
    let _ = writeln!(report, "  Thin: {}", stats.pages_thin);
    let _ = writeln!(report, "  Failed: {}", stats.pages_failed);
    let _ = writeln!(report, "  Skipped: {}", stats.pages_skipped);
    let _ = writeln!(report);

    if !outcome.documents.is_empty() {
        let mut depth_counts = std::collections::BTreeMap::new();
        for document in &outcome.documents {
            *depth_counts.entry(document.depth).or_insert(0usize) += 1;
        }

        let _ = writeln!(report, "Documents by Depth:");
        for (depth, count) in depth_counts {
            let _ = writeln!(report, "  {}: {}", depth, count);
        }
        let _ = writeln!(report);
    }

    if let Some(written) = written {
        let _ = writeln!(report, "Output:");
        let _ = writeln!(report, "  Corpus: {}", written.jsonl_path.display());
        if !written.markdown_files.is_empty() {
            let _ = writeln!(report, "  Markdown: {} files", written.markdown_files.len());
        }
        let _ = writeln!(report);
    }

    let elapsed = stats.elapsed();
    let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
    if stats.interrupted {
        let _ = writeln!(report, "Crawl interrupted after {:.1}s", seconds);
    } else {
        let _ = writeln!(report, "Crawl complete in {:.1}s", seconds);
    }

    report
}

/// Prints the end-of-run summary to stdout
pub fn print_report(outcome: &CrawlOutcome, written: Option<&WrittenOutputs>) {
    print!("{}", format_report(outcome, written));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{CrawlStats, Document};
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn create_test_outcome() -> CrawlOutcome {
        let mut stats = CrawlStats::start();
        stats.pages_kept = 2;
        stats.pages_thin = 1;
        stats.pages_failed = 3;
        stats.finished_at = Some(stats.started_at + chrono::Duration::seconds(42));

        let document = |url: &str, depth| Document {
            url: url.to_string(),
            depth,
            title: "T".to_string(),
            headings: vec![],
            content: String::new(),
            links: vec![],
        };

        CrawlOutcome {
            documents: vec![
                document("https://example.com", 0),
                document("https://example.com/a", 1),
            ],
            visited: ["https://example.com", "https://example.com/a", "https://example.com/b"]
                .iter()
                .map(|s| s.to_string())
                .collect::<HashSet<_>>(),
            stats,
        }
    }

    #[test]
    fn test_report_contains_counts() {
        let report = format_report(&create_test_outcome(), None);

        assert!(report.contains("Documents collected: 2"));
        assert!(report.contains("URLs visited: 3"));
        assert!(report.contains("Thin: 1"));
        assert!(report.contains("Failed: 3"));
        assert!(report.contains("Crawl complete in 42.0s"));
        assert!(!report.contains("Output:"));
    }

    #[test]
    fn test_report_depth_breakdown() {
        let report = format_report(&create_test_outcome(), None);
        assert!(report.contains("Documents by Depth:\n  0: 1\n  1: 1\n"));
    }

    #[test]
    fn test_report_with_outputs() {
        let written = WrittenOutputs {
            jsonl_path: PathBuf::from("output/crawled_docs.jsonl"),
            markdown_files: vec![PathBuf::from("output/000_example.com.md")],
        };

        let report = format_report(&create_test_outcome(), Some(&written));

        assert!(report.contains("Corpus: output/crawled_docs.jsonl"));
        assert!(report.contains("Markdown: 1 files"));
    }

    #[test]
    fn test_report_interrupted() {
        let mut outcome = create_test_outcome();
        outcome.stats.interrupted = true;

        let report = format_report(&outcome, None);
        assert!(report.contains("Crawl interrupted after 42.0s"));
    }
}
