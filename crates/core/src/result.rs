//! Packing result representation.

use crate::boxes::BoxType;
use crate::item::Item;
use crate::packed_item::PackedItemList;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A box together with the items packed into it.
///
/// Immutable once returned by the packer; coordinates are expressed in the
/// box's original (un-rotated) frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackedBox {
    box_type: BoxType,
    items: PackedItemList,
}

impl PackedBox {
    /// Creates a new packed box.
    pub fn new(box_type: BoxType, items: PackedItemList) -> Self {
        Self { box_type, items }
    }

    /// Returns the box.
    pub fn box_type(&self) -> &BoxType {
        &self.box_type
    }

    /// Returns the packed items, layer by layer in insertion order.
    pub fn items(&self) -> &PackedItemList {
        &self.items
    }

    /// Returns the combined volume of the packed items.
    pub fn used_volume(&self) -> u64 {
        self.items.total_volume()
    }

    /// Returns the fraction of the inner volume occupied by items (0.0 - 1.0).
    pub fn volume_utilisation(&self) -> f64 {
        let inner = self.box_type.inner_volume();
        if inner == 0 {
            0.0
        } else {
            self.used_volume() as f64 / inner as f64
        }
    }

    /// Returns the gross weight: empty box plus all packed items.
    pub fn total_weight(&self) -> u64 {
        u64::from(self.box_type.empty_weight()) + self.items.total_weight()
    }

    /// Returns the weight budget left before `max_weight` is reached.
    pub fn remaining_weight(&self) -> u64 {
        u64::from(self.box_type.max_weight()).saturating_sub(self.total_weight())
    }
}

/// Outcome of packing one box: the packed box plus the items that did not fit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackResult {
    /// The box and everything placed into it.
    pub packed_box: PackedBox,

    /// Items that could not be placed in this box, in the order they were
    /// rejected. Callers typically retry these against a larger box.
    pub unpacked: Vec<Item>,
}

impl PackResult {
    /// Returns true if every candidate item was placed.
    pub fn all_packed(&self) -> bool {
        self.unpacked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packed_item::PackedItem;

    #[test]
    fn test_volume_utilisation() {
        let box_type = BoxType::new("B1", 10, 10, 10);
        let mut items = PackedItemList::new();
        let item = Item::new("I1", 5, 5, 5, 1);
        items.insert(PackedItem::new(item, 0, 0, 0, 5, 5, 5));

        let packed = PackedBox::new(box_type, items);
        assert!((packed.volume_utilisation() - 0.125).abs() < 1e-9);
    }

    #[test]
    fn test_weights() {
        let box_type = BoxType::new("B1", 10, 10, 10)
            .with_empty_weight(100)
            .with_max_weight(500);
        let mut items = PackedItemList::new();
        items.insert(PackedItem::new(Item::new("I1", 5, 5, 5, 40), 0, 0, 0, 5, 5, 5));

        let packed = PackedBox::new(box_type, items);
        assert_eq!(packed.total_weight(), 140);
        assert_eq!(packed.remaining_weight(), 360);
    }
}
