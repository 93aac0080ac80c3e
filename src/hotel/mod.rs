//! Hotel Record Store model.
//!
//! The store is a single JSON array of hotel objects. Records are kept as
//! order-preserving JSON maps so fields this crate does not understand
//! survive a load/save cycle untouched.

mod images;
mod record;
pub mod store;

pub use images::{ImageRef, ImageSet, RefKey, Slot};
pub use record::HotelRecord;
