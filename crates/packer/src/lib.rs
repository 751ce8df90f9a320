//! # U-Packing
//!
//! Layer-based 3D bin packing for shipping and fulfilment.
//!
//! Given one box and a prioritized list of items, the [`VolumePacker`]
//! decides which items go in and exactly where: every placement carries 3D
//! coordinates and an axis-aligned orientation. Items it cannot place are
//! handed back so a caller can try them against other boxes.
//!
//! ## Features
//!
//! - Six-orientation support with per-item `keep_flat` restriction
//! - Weight capacity and per-item placement predicates
//! - Row/layer construction with vertical stacking into leftover headroom
//! - Layer stabilisation so larger footprints end up underneath
//!
//! ## Quick Start
//!
//! ```
//! use u_packing::{BoxType, Item, ItemList, VolumePacker};
//!
//! let box_type = BoxType::new("carton", 10, 10, 10).with_max_weight(1000);
//!
//! let mut items = ItemList::new();
//! items.insert(Item::new("mug", 5, 5, 5, 1));
//!
//! let result = VolumePacker::new(box_type, items).pack()?;
//! assert_eq!(result.packed_box.items().len(), 1);
//! # Ok::<(), u_packing::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support on the value
//!   types

pub mod orientation;
pub mod packer;
pub mod stabiliser;

// Re-exports
pub use orientation::OrientatedItemFactory;
pub use packer::VolumePacker;
pub use stabiliser::LayerStabiliser;

/// Core data model.
pub use u_packing_core as core;

pub use u_packing_core::{
    BoxType, Error, Item, ItemList, OrientatedItem, PackResult, PackedBox, PackedItem,
    PackedItemList, PackedLayer, PlacementPredicate, Result, SortStrategy,
};
