//! Slug derivation for hotel directories, file names and URLs.
//!
//! Slugs are ASCII, lowercase and hyphen-separated so the same string works
//! as a directory name on every platform and as a URL path segment.

use deunicode::deunicode;

/// Derive a URL- and filesystem-safe slug.
///
/// Unicode is transliterated to ASCII, everything is lowercased, and every run
/// of characters outside `[a-z0-9-]` becomes a single `-`. Repeated hyphens are
/// collapsed and none are left at either end.
///
/// ```ignore
/// assert_eq!(slugify("Hotel_Test!"), "hotel-test");
/// assert_eq!(slugify("Hôtel  Ritz París"), "hotel-ritz-paris");
/// ```
pub fn slugify(input: &str) -> String {
    let ascii = deunicode(input).to_ascii_lowercase();
    let mut slug = String::with_capacity(ascii.len());

    for c in ascii.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '-' };
        if c == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(c);
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hotel_Test!"), "hotel-test");
        assert_eq!(slugify("four-seasons-bali"), "four-seasons-bali");
        assert_eq!(slugify("Grand Hotel Excelsior"), "grand-hotel-excelsior");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Hôtel Ritz París"), "hotel-ritz-paris");
        assert_eq!(slugify("Ñandú Lodge"), "nandu-lodge");
    }

    #[test]
    fn test_slugify_trims_and_collapses() {
        assert_eq!(slugify("--a--b--"), "a-b");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in [
            "Hotel_Test!",
            "St. Regis México",
            "a--b",
            "The Shining / Overlook",
            "ALL CAPS 123",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {input:?}");
        }
    }
}
