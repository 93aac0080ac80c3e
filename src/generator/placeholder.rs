//! Legacy placeholder substitution.
//!
//! Hand-written templates sometimes hard-code sample image URLs. When a base
//! URL is known, `src="<placeholder>"` attributes in a rendered page are
//! pointed at the hotel's own local images instead. Templates should prefer
//! the `asset` filter; this only exists for pages that predate it.

use regex::{NoExpand, Regex};

use crate::config::PlaceholderConfig;
use crate::hotel::{HotelRecord, Slot};
use crate::utils::path::is_remote_url;
use crate::utils::path::route::join_url;

/// Compiled placeholder patterns.
pub struct Placeholders {
    primary: Option<Regex>,
    secondary: Vec<Regex>,
}

/// `src="<url>"` with either quote style.
fn src_pattern(url: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r#"src=["']{}["']"#, regex::escape(url)))
}

impl Placeholders {
    pub fn new(config: &PlaceholderConfig) -> Result<Self, regex::Error> {
        let primary = match config.primary.trim() {
            "" => None,
            url => Some(src_pattern(url)?),
        };
        let secondary = config
            .secondary
            .iter()
            .map(|url| src_pattern(url.trim()))
            .collect::<Result<_, _>>()?;
        Ok(Self { primary, secondary })
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_empty()
    }

    /// Substitute the hotel's local images into `html`.
    ///
    /// Every primary placeholder becomes the `hotel` image. Each feature and
    /// gallery image, in order, takes the first secondary placeholder still
    /// present. Unmatched placeholders stay as they are.
    pub fn apply(&self, html: &str, hotel: &HotelRecord, base_url: &str) -> String {
        let Some(images) = hotel.images() else {
            return html.to_owned();
        };

        let mut html = html.to_owned();
        for reference in images.refs() {
            if is_remote_url(&reference.value) {
                continue;
            }
            let src = format!("src=\"{}\"", join_url(base_url, &reference.value));

            if reference.key.slot == Slot::Hotel {
                if let Some(primary) = &self.primary {
                    html = primary.replace_all(&html, NoExpand(&src)).into_owned();
                }
                continue;
            }

            if let Some(pattern) = self.secondary.iter().find(|p| p.is_match(&html)) {
                html = pattern.replacen(&html, 1, NoExpand(&src)).into_owned();
            }
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> PlaceholderConfig {
        PlaceholderConfig {
            primary: "https://images.unsplash.com/photo-1?w=800&q=80".into(),
            secondary: vec![
                "https://images.unsplash.com/photo-2?w=800".into(),
                "https://images.unsplash.com/photo-3?w=800".into(),
            ],
        }
    }

    #[test]
    fn test_apply() {
        let placeholders = Placeholders::new(&config()).unwrap();
        let hotel: HotelRecord = serde_json::from_value(json!({
            "id": "sol",
            "imagenes": {
                "hotel": "static/images/hotels/sol/hotel.webp",
                "galeria": [
                    "static/images/hotels/sol/galeria_1.webp",
                    "https://cdn.example.com/remote.jpg",
                    "static/images/hotels/sol/galeria_3.webp",
                    "static/images/hotels/sol/galeria_4.webp"
                ]
            }
        }))
        .unwrap();

        let html = concat!(
            r#"<img src="https://images.unsplash.com/photo-1?w=800&q=80">"#,
            r#"<img src='https://images.unsplash.com/photo-2?w=800'>"#,
            r#"<img src="https://images.unsplash.com/photo-3?w=800">"#,
            r#"<img src="https://images.unsplash.com/photo-9">"#,
        );
        let out = placeholders.apply(html, &hotel, "https://x.github.io/h");

        assert_eq!(
            out,
            concat!(
                r#"<img src="https://x.github.io/h/static/images/hotels/sol/hotel.webp">"#,
                r#"<img src="https://x.github.io/h/static/images/hotels/sol/galeria_1.webp">"#,
                r#"<img src="https://x.github.io/h/static/images/hotels/sol/galeria_3.webp">"#,
                r#"<img src="https://images.unsplash.com/photo-9">"#,
            )
        );
    }

    #[test]
    fn test_empty_config() {
        let placeholders = Placeholders::new(&PlaceholderConfig::default()).unwrap();
        assert!(placeholders.is_empty());
        assert!(!Placeholders::new(&config()).unwrap().is_empty());
    }
}
