//! # U-Packing Core
//!
//! Core data model for the U-Packing 3D box packing engine.
//!
//! This crate provides the value types exchanged with the volume packer:
//! candidate items and boxes on the way in, orientated/packed records on the
//! way out, and the priority list the packer consumes items from.
//!
//! ## Core Components
//!
//! - [`Item`] / [`BoxType`]: immutable packing inputs with builder-style
//!   configuration
//! - [`ItemList`]: lazily sorted priority container with a pluggable
//!   [`SortStrategy`]
//! - [`OrientatedItem`], [`PackedItem`], [`PackedLayer`], [`PackedBox`]:
//!   placement records
//! - [`PackResult`]: a packed box plus the items that did not fit
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod boxes;
pub mod error;
pub mod item;
pub mod item_list;
pub mod layer;
pub mod orientated_item;
pub mod packed_item;
pub mod result;

// Re-exports
pub use boxes::BoxType;
pub use error::{Error, Result};
pub use item::{Item, PlacementPredicate};
pub use item_list::{ItemList, SortStrategy};
pub use layer::PackedLayer;
pub use orientated_item::OrientatedItem;
pub use packed_item::{PackedItem, PackedItemList};
pub use result::{PackResult, PackedBox};
