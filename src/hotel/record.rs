//! A single hotel record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ImageSet;
use crate::utils::slug::slugify;

/// Preferred and legacy key of the display name.
const NAME_KEYS: [&str; 2] = ["nombre", "name"];
/// Preferred and legacy key of the image field.
const IMAGE_KEYS: [&str; 2] = ["imagenes", "images"];

/// One hotel entry of the store.
///
/// Wraps the raw JSON object; key order and unknown fields round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelRecord(Map<String, Value>);

impl HotelRecord {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The `id` field. Numeric ids are accepted and rendered as strings.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Display name, `nombre` first then `name`.
    pub fn name(&self) -> Option<&str> {
        NAME_KEYS
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_str))
            .filter(|name| !name.trim().is_empty())
    }

    /// Name for log lines and reports.
    pub fn label(&self) -> String {
        self.name()
            .map(str::to_owned)
            .or_else(|| self.id())
            .unwrap_or_else(|| "(unnamed)".to_owned())
    }

    /// URL/filesystem key of this record.
    ///
    /// Derived from `id`, or from the display name for legacy records
    /// without one. `position` is the 0-based index in the store and only
    /// matters when both slugify to nothing.
    pub fn slug(&self, position: usize) -> String {
        let from_id = self.id().map(|id| slugify(&id)).unwrap_or_default();
        if !from_id.is_empty() {
            return from_id;
        }

        let from_name = self.name().map(slugify).unwrap_or_default();
        if !from_name.is_empty() {
            return from_name;
        }

        format!("hotel-{}", position + 1)
    }

    /// Whether `key` (an `id` or a slug) identifies this record.
    pub fn matches(&self, key: &str, position: usize) -> bool {
        self.id().as_deref() == Some(key) || self.slug(position) == key
    }

    /// Key the images live under (`imagenes` unless only `images` exists).
    fn images_key(&self) -> &'static str {
        IMAGE_KEYS
            .iter()
            .copied()
            .find(|key| self.0.contains_key(*key))
            .unwrap_or(IMAGE_KEYS[0])
    }

    /// Parsed view of the image field, `None` when absent or malformed.
    pub fn images(&self) -> Option<ImageSet> {
        self.0.get(self.images_key()).and_then(ImageSet::from_value)
    }

    /// Write an image set back under the key it was read from.
    pub fn set_images(&mut self, images: ImageSet) {
        let key = self.images_key();
        self.0.insert(key.to_owned(), images.into_value());
    }
}
