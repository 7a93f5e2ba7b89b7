//! Hostname normalization for free-form user input.
//!
//! Users paste anything from bare domains to full URLs with paths. The
//! normalizer extracts a best-effort hostname and never fails: input that
//! can't be parsed is passed through trimmed, and the probe decides what
//! the third party makes of it.

use url::Url;

/// Extract a hostname from free-form input.
///
/// Input without a recognized scheme gets `http://` prepended before URL
/// parsing; the hostname component is then extracted. If parsing fails for
/// any reason (or the URL has no host), the trimmed input is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use workspace_check_lib::normalize_host;
///
/// assert_eq!(normalize_host("https://sub.example.com/path"), "sub.example.com");
/// assert_eq!(normalize_host("example.com"), "example.com");
/// assert_eq!(normalize_host("not a url"), "not a url");
/// ```
pub fn normalize_host(raw: &str) -> String {
    let trimmed = raw.trim();

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    match Url::parse(&candidate) {
        Ok(url) => url
            .host_str()
            .map(|host| host.to_string())
            .unwrap_or_else(|| trimmed.to_string()),
        Err(_) => trimmed.to_string(),
    }
}

/// Split free-form bulk input into individual entries.
///
/// Entries are separated by newlines or commas; each entry is trimmed and
/// empty entries are dropped. Duplicates are kept: each submitted entry
/// gets its own probe and its own result line.
pub fn split_bulk_input(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_with_path() {
        assert_eq!(
            normalize_host("https://sub.example.com/path"),
            "sub.example.com"
        );
    }

    #[test]
    fn test_bare_domain_unchanged() {
        assert_eq!(normalize_host("example.com"), "example.com");
    }

    #[test]
    fn test_www_prefix_is_kept() {
        // The normalizer extracts the hostname; it does not strip labels
        assert_eq!(normalize_host("www.google.com"), "www.google.com");
    }

    #[test]
    fn test_http_scheme_stripped() {
        assert_eq!(normalize_host("http://example.com"), "example.com");
        assert_eq!(
            normalize_host("https://example.com:8443/a?b=c"),
            "example.com"
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(normalize_host("  example.com  "), "example.com");
    }

    #[test]
    fn test_unparseable_input_passes_through() {
        // A space makes the URL invalid; the raw trimmed string comes back
        assert_eq!(normalize_host("bad domain"), "bad domain");
        assert_eq!(normalize_host(" bad domain "), "bad domain");
    }

    #[test]
    fn test_empty_input_never_fails() {
        assert_eq!(normalize_host(""), "");
        assert_eq!(normalize_host("   "), "");
    }

    #[test]
    fn test_split_on_newlines_and_commas() {
        let input = "a.com\nb.com, c.com\n\n ,d.com ";
        assert_eq!(
            split_bulk_input(input),
            vec!["a.com", "b.com", "c.com", "d.com"]
        );
    }

    #[test]
    fn test_split_keeps_duplicates() {
        assert_eq!(split_bulk_input("a.com,a.com"), vec!["a.com", "a.com"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_bulk_input("").is_empty());
        assert!(split_bulk_input(" , \n ,").is_empty());
    }
}
