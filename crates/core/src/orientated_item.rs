//! Items with a chosen axis-aligned orientation.

use nalgebra::Vector3;

use crate::item::Item;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An item whose dimensions have been permuted onto the box axes.
///
/// The (width, length, depth) triple denotes the extent along the box's
/// X, Y and Z axes respectively.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientatedItem {
    item: Item,
    dimensions: Vector3<u32>,
}

impl OrientatedItem {
    /// Creates a new orientated item.
    pub fn new(item: Item, width: u32, length: u32, depth: u32) -> Self {
        Self {
            item,
            dimensions: Vector3::new(width, length, depth),
        }
    }

    /// Returns the underlying item.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Returns the orientated dimensions (width, length, depth).
    pub fn dimensions(&self) -> &Vector3<u32> {
        &self.dimensions
    }

    /// Returns the extent along the box's X axis.
    pub fn width(&self) -> u32 {
        self.dimensions.x
    }

    /// Returns the extent along the box's Y axis.
    pub fn length(&self) -> u32 {
        self.dimensions.y
    }

    /// Returns the extent along the box's Z axis.
    pub fn depth(&self) -> u32 {
        self.dimensions.z
    }

    /// Returns the volume, which is invariant under orientation.
    pub fn volume(&self) -> u64 {
        u64::from(self.dimensions.x) * u64::from(self.dimensions.y) * u64::from(self.dimensions.z)
    }

    /// Consumes the orientation and returns the underlying item.
    pub fn into_item(self) -> Item {
        self.item
    }
}
