//! Image reference and URL utilities.
//!
//! A hotel image reference is either a remote URL (`https://...`) or a path
//! relative to the generated site root (`static/images/hotels/x/hotel.webp`).

use std::path::{Component, Path};

/// Check if a reference is a remote http(s) URL with a host.
///
/// # Examples
/// ```ignore
/// assert!(is_remote_url("https://example.com/a.jpg"));
/// assert!(!is_remote_url("static/images/hotels/a.webp"));
/// assert!(!is_remote_url("ftp://example.com/a.jpg"));
/// ```
pub fn is_remote_url(reference: &str) -> bool {
    url::Url::parse(reference.trim()).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// Render a relative filesystem path as a forward-slash site path.
///
/// Host separators never leak into the JSON store, so a path produced on
/// Windows reads the same as one produced on Unix.
pub fn to_site_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Collapse runs of `/` into one.
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Join a base URL and a site path with exactly one `/` between them.
///
/// An empty base yields a root-relative path.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Final path segment of a reference (`a/b/c.webp` -> `c.webp`).
pub fn file_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_remote_url() {
        assert!(is_remote_url("https://example.com/a.jpg"));
        assert!(is_remote_url("http://cdn.example.com/x?y=1"));
        assert!(!is_remote_url("static/images/hotels/a/hotel.webp"));
        assert!(!is_remote_url("/static/images/hotels/a/hotel.webp"));
        assert!(!is_remote_url("ftp://example.com/a.jpg"));
        assert!(!is_remote_url("mailto:someone@example.com"));
        assert!(!is_remote_url(""));
    }

    #[test]
    fn test_to_site_path() {
        let path: PathBuf = ["static", "images", "hotels", "x", "hotel.webp"]
            .iter()
            .collect();
        assert_eq!(to_site_path(&path), "static/images/hotels/x/hotel.webp");
        assert_eq!(to_site_path(Path::new("./a/b")), "a/b");
    }

    #[test]
    fn test_collapse_slashes() {
        assert_eq!(collapse_slashes("//static///images/a.webp"), "/static/images/a.webp");
        assert_eq!(collapse_slashes("a/b"), "a/b");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://x.io/site/", "/static/a.webp"), "https://x.io/site/static/a.webp");
        assert_eq!(join_url("https://x.io", "static/a.webp"), "https://x.io/static/a.webp");
        assert_eq!(join_url("", "static/a.webp"), "/static/a.webp");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/static/images/hotels/x/hotel.webp"), "hotel.webp");
        assert_eq!(file_name("hotel.webp"), "hotel.webp");
    }
}
