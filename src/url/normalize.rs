use crate::UrlError;
use url::Url;

/// Schemes that never lead to a crawlable page
const NON_NAVIGABLE_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Canonicalizes an absolute URL according to Sumi-Scribe's dedup rules
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that is not HTTP(S)
/// 3. Remove fragment (everything after #)
/// 4. Remove the query string
/// 5. Remove the trailing slash (the bare origin loses its root slash too)
///
/// Host lowercasing, default-port removal and dot-segment resolution come
/// from the URL parser itself. The result is a fixed point:
/// `canonicalize(canonicalize(u)) == canonicalize(u)`.
///
/// # Examples
///
/// ```
/// use sumi_scribe::url::canonicalize;
///
/// let url = canonicalize("https://Example.com/guide/?tab=1#setup").unwrap();
/// assert_eq!(url, "https://example.com/guide");
/// ```
pub fn canonicalize(url_str: &str) -> Result<String, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(canonical_form(url))
}

/// Resolves a raw href found on `page_url` into its canonical absolute form
///
/// Handles absolute, protocol-relative (`//host/x`), root-relative (`/x`)
/// and path-relative (`x`, `../x`) references. Returns `None` for
/// references that are not navigable HTTP(S) links:
/// - `javascript:`, `mailto:`, `tel:` and `data:` targets
/// - empty and fragment-only hrefs (same-page anchors)
/// - references that fail to resolve
///
/// # Examples
///
/// ```
/// use sumi_scribe::url::normalize_link;
/// use url::Url;
///
/// let page = Url::parse("https://example.com/docs/intro").unwrap();
/// assert_eq!(
///     normalize_link("../about/#team", &page).as_deref(),
///     Some("https://example.com/about")
/// );
/// assert_eq!(normalize_link("mailto:hi@example.com", &page), None);
/// ```
pub fn normalize_link(href: &str, page_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if NON_NAVIGABLE_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return None;
    }

    let resolved = page_url.join(href).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    Some(canonical_form(resolved))
}

/// Strips fragment, query and trailing slashes from a parsed URL
fn canonical_form(mut url: Url) -> String {
    url.set_fragment(None);
    url.set_query(None);

    let serialized: String = url.into();
    serialized.trim_end_matches('/').to_string()
}
