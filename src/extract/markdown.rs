//! HTML to Markdown conversion and post-processing

use crate::extract::ExtractError;
use htmd::options::{HeadingStyle, Options};
use htmd::HtmlToMarkdown;
use regex::Regex;
use std::sync::LazyLock;

static JS_WARNING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)You need to enable JavaScript.*?\.")
        .expect("BUG: hardcoded JavaScript warning regex is invalid")
});

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("BUG: hardcoded newline regex is invalid"));

/// Converts an HTML fragment to ATX-style Markdown and cleans the result
pub fn html_to_markdown(html: &str) -> Result<String, ExtractError> {
    let converter = HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "noscript", "iframe"])
        .options(Options {
            heading_style: HeadingStyle::Atx,
            ..Default::default()
        })
        .build();

    let raw = converter
        .convert(html)
        .map_err(|e| ExtractError::Markdown(e.to_string()))?;

    Ok(clean_markdown(&raw))
}

/// Post-processes converted Markdown
///
/// 1. Drops "You need to enable JavaScript ..." fallback sentences
/// 2. Collapses runs of three or more newlines to a single blank line
/// 3. Trims surrounding whitespace
pub fn clean_markdown(markdown: &str) -> String {
    let without_warning = JS_WARNING_PATTERN.replace_all(markdown, "");
    let collapsed = EXCESS_NEWLINES.replace_all(&without_warning, "\n\n");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(
            clean_markdown("Para one.\n\n\n\n\nPara two."),
            "Para one.\n\nPara two."
        );
    }

    #[test]
    fn test_double_newline_untouched() {
        assert_eq!(clean_markdown("a\n\nb\nc"), "a\n\nb\nc");
    }

    #[test]
    fn test_trim() {
        assert_eq!(clean_markdown("\n\n  text  \n\n"), "text");
    }

    #[test]
    fn test_removes_js_warning_case_insensitively() {
        let cleaned = clean_markdown(
            "Intro.\n\nyou need to ENABLE javascript to run this app.\n\nOutro.",
        );
        assert!(!cleaned.to_lowercase().contains("enable javascript"));
        assert!(cleaned.contains("Intro."));
        assert!(cleaned.contains("Outro."));
        assert!(!cleaned.contains("\n\n\n"));
    }

    #[test]
    fn test_js_warning_stops_at_first_period() {
        let cleaned = clean_markdown("You need to enable JavaScript to run this app. Keep me.");
        assert_eq!(cleaned, "Keep me.");
    }

    #[test]
    fn test_atx_headings() {
        let markdown = html_to_markdown("<h1>Title</h1><h2>Section</h2><p>Body</p>").unwrap();
        assert!(markdown.contains("# Title"));
        assert!(markdown.contains("## Section"));
        assert!(!markdown.contains("====="));
        assert!(!markdown.contains("-----"));
    }

    #[test]
    fn test_skips_script_remnants() {
        let markdown =
            html_to_markdown("<div><script>alert(1)</script><p>Hello world</p></div>").unwrap();
        assert!(markdown.contains("Hello world"));
        assert!(!markdown.contains("alert"));
    }
}
