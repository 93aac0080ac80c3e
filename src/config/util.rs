//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Extract path component from a URL string
///
/// Returns `None` if the URL is invalid
///
/// # Examples
/// ```ignore
/// extract_url_path("https://example.github.io/hoteles/") -> Some("hoteles")
/// extract_url_path("https://example.com")                -> Some("")
/// extract_url_path("invalid")                            -> None
/// ```
pub fn extract_url_path(url_str: &str) -> Option<String> {
    let parsed = url::Url::parse(url_str).ok()?;
    let path = parsed.path().trim_matches('/');
    Some(path.to_string())
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/hoteles/scripts/      ← cwd
/// /home/user/hoteles/hotelsite.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// [`find_config_file`] starting from an explicit directory.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_url_path() {
        assert_eq!(
            extract_url_path("https://p4blo4p.github.io/hoteles-booking-web-pages"),
            Some("hoteles-booking-web-pages".to_string())
        );
        assert_eq!(
            extract_url_path("https://example.github.io/a/b/"),
            Some("a/b".to_string())
        );
        assert_eq!(extract_url_path("https://example.com"), Some(String::new()));
        assert_eq!(
            extract_url_path("https://example.com:8080/path?query=1#x"),
            Some("path".to_string())
        );
        assert_eq!(extract_url_path("invalid-url"), None);
    }

    #[test]
    fn test_find_config_file_walks_upward() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("scripts/deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("hotelsite.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("hotelsite.toml")).unwrap();
        assert_eq!(found, temp.path().join("hotelsite.toml"));
    }

    #[test]
    fn test_find_config_file_missing() {
        let temp = TempDir::new().unwrap();
        assert!(find_config_file_from(temp.path(), Path::new("no-such-config-4242.toml")).is_none());
    }
}
