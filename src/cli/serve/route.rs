//! Request routing and static file resolution.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    /// Detail page by `id` or slug.
    Hotel(String),
    /// The whole store as JSON.
    ApiHotels,
    /// File under the static directory, relative path.
    Static(String),
    NotFound,
}

/// Map a request URL to a route. Pure; touches nothing on disk.
pub fn route(url: &str) -> Route {
    let path = normalize_url(url);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] | ["index.html"] => Route::Index,
        ["hotel", id] => {
            let id = id.strip_suffix(".html").unwrap_or(*id);
            Route::Hotel(id.to_owned())
        }
        ["hotel", id, "index.html"] => Route::Hotel((*id).to_owned()),
        ["api", "hoteles"] => Route::ApiHotels,
        ["static", rest @ ..] if !rest.is_empty() => Route::Static(rest.join("/")),
        _ => Route::NotFound,
    }
}

/// Decode percent escapes and strip the query string.
fn normalize_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    percent_decode_str(path)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_default()
}

/// Resolve a relative path under `root`, refusing anything that escapes it.
pub fn resolve_static(rel: &str, root: &Path) -> Option<PathBuf> {
    // Reject paths with suspicious patterns early
    if rel.split('/').any(|part| part == ".." || part.contains('\\')) {
        return None;
    }

    // Canonicalize to resolve symlinks and verify path is under root
    let canonical = root.join(rel).canonicalize().ok()?;
    let root_canonical = root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    canonical.is_file().then_some(canonical)
}
