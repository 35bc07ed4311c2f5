//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped inside a path segment. RFC 3986 unreserved characters
/// are kept, and so is `%` so that names already percent-encoded pass through
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'%')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Whether a content root points at a remote host
pub fn is_remote(root: &str) -> bool {
    root.starts_with("http://") || root.starts_with("https://")
}

/// Percent-encode each segment of a relative path, keeping the separators
///
/// # Examples
/// ```ignore
/// encode_path("blog/my post.md") // -> "blog/my%20post.md"
/// ```
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a base URL and a relative path with exactly one slash between them
///
/// # Examples
/// ```ignore
/// join_url("https://example.com/public/", "/blog/a.md") // -> "https://example.com/public/blog/a.md"
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, encode_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://raw.githubusercontent.com/x/y/master/public"));
        assert!(is_remote("http://localhost:8080"));
        assert!(!is_remote("public"));
        assert!(!is_remote("file:///srv/site"));
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("blog/file1.md"), "blog/file1.md");
        assert_eq!(encode_path("blog/my post.md"), "blog/my%20post.md");
        assert_eq!(encode_path("blog/a?b#c.md"), "blog/a%3Fb%23c.md");
        assert_eq!(encode_path("blog/a%20b.md"), "blog/a%20b.md");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://example.com/public/", "/blog/manifest.json"),
            "https://example.com/public/blog/manifest.json"
        );
        assert_eq!(
            join_url("https://example.com", "testimonials/a.md"),
            "https://example.com/testimonials/a.md"
        );
        assert_eq!(join_url("https://example.com/", ""), "https://example.com/");
    }
}
