//! View over a record's image field.
//!
//! Two shapes exist in the wild:
//!
//! ```json
//! "imagenes": { "hotel": "...", "pelicula": "..." | ["..."], "galeria": ["..."] }
//! "imagenes": ["...", "..."]
//! ```
//!
//! The mapping form keeps any extra keys verbatim.

use serde_json::{Map, Value};

use crate::config::ImageConfig;

/// Logical image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Primary image.
    Hotel,
    /// Feature image(s).
    Pelicula,
    /// Gallery.
    Galeria,
    /// Entry of the legacy plain sequence.
    Legacy,
}

impl Slot {
    /// File stem prefix under the hotel's asset directory.
    const fn stem(self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Pelicula => "pelicula",
            Self::Galeria => "galeria",
            Self::Legacy => "imagen",
        }
    }

    /// Maximum output width for images of this slot.
    pub const fn max_width(self, config: &ImageConfig) -> u32 {
        match self {
            Self::Hotel => config.max_width_large,
            Self::Pelicula | Self::Galeria | Self::Legacy => config.max_width_medium,
        }
    }
}

/// Stable address of one reference inside an [`ImageSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefKey {
    pub slot: Slot,
    /// 1-based position in the original sequence, `None` for single values.
    pub position: Option<usize>,
}

impl RefKey {
    pub const fn single(slot: Slot) -> Self {
        Self {
            slot,
            position: None,
        }
    }

    pub const fn nth(slot: Slot, position: usize) -> Self {
        Self {
            slot,
            position: Some(position),
        }
    }

    /// Output file stem: `hotel`, `pelicula`, `pelicula_2`, `galeria_1`, `imagen_3`.
    pub fn file_stem(&self) -> String {
        match self.position {
            Some(n) => format!("{}_{n}", self.slot.stem()),
            None => self.slot.stem().to_owned(),
        }
    }

    /// Whether the reference sits in a sequence (and may be dropped).
    pub const fn in_sequence(&self) -> bool {
        self.position.is_some()
    }
}

/// One image reference with its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub key: RefKey,
    pub value: String,
}

/// Single or multiple feature images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feature {
    Single(String),
    Many(Vec<String>),
}

/// Mapping form of the image field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotImages {
    pub hotel: Option<String>,
    pub pelicula: Option<Feature>,
    pub galeria: Option<Vec<String>>,
    /// Original object, used to write back without disturbing other keys.
    raw: Map<String, Value>,
}

/// Parsed image field of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSet {
    Slots(SlotImages),
    List(Vec<String>),
}

/// String entries of a JSON array; anything else is not an image reference.
fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}

fn string_array(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}

fn numbered(slot: Slot, items: &[String]) -> impl Iterator<Item = ImageRef> + '_ {
    items.iter().enumerate().map(move |(i, value)| ImageRef {
        key: RefKey::nth(slot, i + 1),
        value: value.clone(),
    })
}

/// Apply `f` to a sequence, keeping original positions for the keys.
fn map_sequence(
    slot: Slot,
    items: Vec<String>,
    f: &mut impl FnMut(&ImageRef) -> Option<String>,
) -> Vec<String> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| {
            f(&ImageRef {
                key: RefKey::nth(slot, i + 1),
                value,
            })
        })
        .collect()
}

impl SlotImages {
    fn from_map(map: &Map<String, Value>) -> Self {
        let hotel = map.get("hotel").and_then(Value::as_str).map(str::to_owned);
        let pelicula = match map.get("pelicula") {
            Some(Value::String(s)) => Some(Feature::Single(s.clone())),
            Some(Value::Array(items)) => Some(Feature::Many(strings(items))),
            _ => None,
        };
        let galeria = match map.get("galeria") {
            Some(Value::Array(items)) => Some(strings(items)),
            _ => None,
        };

        Self {
            hotel,
            pelicula,
            galeria,
            raw: map.clone(),
        }
    }

    fn into_value(self) -> Value {
        let mut map = self.raw;
        put(&mut map, "hotel", self.hotel.map(Value::String));
        put(
            &mut map,
            "pelicula",
            self.pelicula.map(|feature| match feature {
                Feature::Single(s) => Value::String(s),
                Feature::Many(items) => string_array(items),
            }),
        );
        put(&mut map, "galeria", self.galeria.map(string_array));
        Value::Object(map)
    }
}

/// Set `key` in place, or remove it if it held a reference that is now gone.
fn put(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    match value {
        Some(value) => {
            map.insert(key.to_owned(), value);
        }
        None if map.get(key).is_some_and(Value::is_string) => {
            map.shift_remove(key);
        }
        None => {}
    }
}

impl ImageSet {
    /// Parse the raw field value; `None` for shapes that hold no references.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::Slots(SlotImages::from_map(map))),
            Value::Array(items) => Some(Self::List(strings(items))),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Slots(slots) => slots.into_value(),
            Self::List(items) => string_array(items),
        }
    }

    /// Every reference in document order.
    pub fn refs(&self) -> Vec<ImageRef> {
        match self {
            Self::List(items) => numbered(Slot::Legacy, items).collect(),
            Self::Slots(slots) => {
                let mut refs = Vec::new();
                if let Some(hotel) = &slots.hotel {
                    refs.push(ImageRef {
                        key: RefKey::single(Slot::Hotel),
                        value: hotel.clone(),
                    });
                }
                match &slots.pelicula {
                    Some(Feature::Single(value)) => refs.push(ImageRef {
                        key: RefKey::single(Slot::Pelicula),
                        value: value.clone(),
                    }),
                    Some(Feature::Many(items)) => refs.extend(numbered(Slot::Pelicula, items)),
                    None => {}
                }
                if let Some(items) = &slots.galeria {
                    refs.extend(numbered(Slot::Galeria, items));
                }
                refs
            }
        }
    }

    /// Rewrite every reference through `f`.
    ///
    /// `Some(value)` replaces the reference. `None` drops it: sequence
    /// entries are removed (the rest keep their order) and single slots are
    /// removed from the mapping.
    pub fn map_refs(self, mut f: impl FnMut(&ImageRef) -> Option<String>) -> Self {
        match self {
            Self::List(items) => Self::List(map_sequence(Slot::Legacy, items, &mut f)),
            Self::Slots(mut slots) => {
                slots.hotel = slots.hotel.and_then(|value| {
                    f(&ImageRef {
                        key: RefKey::single(Slot::Hotel),
                        value,
                    })
                });
                slots.pelicula = slots.pelicula.and_then(|feature| match feature {
                    Feature::Single(value) => f(&ImageRef {
                        key: RefKey::single(Slot::Pelicula),
                        value,
                    })
                    .map(Feature::Single),
                    Feature::Many(items) => {
                        Some(Feature::Many(map_sequence(Slot::Pelicula, items, &mut f)))
                    }
                });
                slots.galeria = slots
                    .galeria
                    .map(|items| map_sequence(Slot::Galeria, items, &mut f));
                Self::Slots(slots)
            }
        }
    }
}
