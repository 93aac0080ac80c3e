//! Template filters.

use std::collections::HashMap;

use tera::{Filter, Value};

use crate::utils::path::is_remote_url;
use crate::utils::path::route::join_url;

/// `{{ hotel.imagenes.hotel | asset }}`
///
/// Turns a local image reference into a URL under the site's base URL
/// (`/static/...` when none is set). Remote URLs pass through.
pub struct AssetFilter {
    base_url: String,
}

impl AssetFilter {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// An empty reference stays empty.
    pub fn url_for(&self, reference: &str) -> String {
        if reference.trim().is_empty() {
            String::new()
        } else if is_remote_url(reference) {
            reference.to_owned()
        } else {
            join_url(&self.base_url, reference)
        }
    }
}

impl Filter for AssetFilter {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        match value {
            Value::String(reference) => Ok(Value::String(self.url_for(reference))),
            Value::Null => Ok(Value::Null),
            other => Err(tera::Error::msg(format!(
                "filter `asset` expects a string, got `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_asset_without_base() {
        let filter = AssetFilter::new("");
        assert_eq!(
            filter.url_for("static/images/hotels/a/hotel.webp"),
            "/static/images/hotels/a/hotel.webp"
        );
        assert_eq!(filter.url_for("/static/x.webp"), "/static/x.webp");
        assert_eq!(filter.url_for(""), "");
    }

    #[test]
    fn test_asset_with_base() {
        let filter = AssetFilter::new("https://x.github.io/hoteles/");
        assert_eq!(
            filter.url_for("static/images/hotels/a/hotel.webp"),
            "https://x.github.io/hoteles/static/images/hotels/a/hotel.webp"
        );
        assert_eq!(
            filter.url_for("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn test_filter_value_types() {
        let filter = AssetFilter::new("");
        let args = HashMap::new();
        assert_eq!(
            filter.filter(&json!("a.webp"), &args).unwrap(),
            json!("/a.webp")
        );
        assert_eq!(filter.filter(&Value::Null, &args).unwrap(), Value::Null);
        assert!(filter.filter(&json!(3), &args).is_err());
    }
}
