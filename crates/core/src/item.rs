//! Packable item types.

use std::fmt;
use std::sync::Arc;

use nalgebra::Vector3;

use crate::boxes::BoxType;
use crate::error::{Error, Result};
use crate::packed_item::PackedItemList;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placement predicate for constrained items.
///
/// Evaluated against the items already committed to the box and the box
/// itself; returning `false` rejects the candidate placement.
pub type PlacementPredicate = Arc<dyn Fn(&PackedItemList, &BoxType) -> bool + Send + Sync>;

// All six axis-aligned permutations of (width, length, depth), expressed as
// index triples into the raw dimension vector.
const ORIENTATIONS_ANY: [(usize, usize, usize); 6] = [
    (0, 1, 2),
    (0, 2, 1),
    (1, 0, 2),
    (1, 2, 0),
    (2, 0, 1),
    (2, 1, 0),
];

// Orientations that keep the original depth axis pointing up.
const ORIENTATIONS_KEEP_FLAT: [(usize, usize, usize); 2] = [(0, 1, 2), (1, 0, 2)];

/// A rectangular item to be packed into a box.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Human-readable description; also the final ordering tie-break.
    description: String,

    /// Dimensions (width, length, depth).
    dimensions: Vector3<u32>,

    /// Weight of the item.
    weight: u32,

    /// Disallows orientations that change which axis points up.
    keep_flat: bool,

    /// Optional placement predicate for constrained items.
    #[cfg_attr(feature = "serde", serde(skip))]
    constraint: Option<PlacementPredicate>,
}

impl Item {
    /// Creates a new item with the given description, dimensions and weight.
    pub fn new(
        description: impl Into<String>,
        width: u32,
        length: u32,
        depth: u32,
        weight: u32,
    ) -> Self {
        Self {
            description: description.into(),
            dimensions: Vector3::new(width, length, depth),
            weight,
            keep_flat: false,
            constraint: None,
        }
    }

    /// Sets whether the item must keep its original depth axis upright.
    pub fn with_keep_flat(mut self, keep_flat: bool) -> Self {
        self.keep_flat = keep_flat;
        self
    }

    /// Attaches a placement predicate, making this a constrained item.
    pub fn with_constraint(
        mut self,
        predicate: impl Fn(&PackedItemList, &BoxType) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.constraint = Some(Arc::new(predicate));
        self
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the dimensions (width, length, depth).
    pub fn dimensions(&self) -> &Vector3<u32> {
        &self.dimensions
    }

    /// Returns the width.
    pub fn width(&self) -> u32 {
        self.dimensions.x
    }

    /// Returns the length.
    pub fn length(&self) -> u32 {
        self.dimensions.y
    }

    /// Returns the depth.
    pub fn depth(&self) -> u32 {
        self.dimensions.z
    }

    /// Returns the weight.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Returns whether the item must stay flat.
    pub fn keep_flat(&self) -> bool {
        self.keep_flat
    }

    /// Returns the volume.
    pub fn volume(&self) -> u64 {
        u64::from(self.dimensions.x) * u64::from(self.dimensions.y) * u64::from(self.dimensions.z)
    }

    /// Returns the smallest of the three dimensions.
    pub fn min_dimension(&self) -> u32 {
        self.dimensions.x.min(self.dimensions.y).min(self.dimensions.z)
    }

    /// Returns true if a placement predicate is attached.
    pub fn is_constrained(&self) -> bool {
        self.constraint.is_some()
    }

    /// Evaluates the placement predicate against the current box state.
    ///
    /// Unconstrained items can always be packed.
    pub fn can_be_packed(&self, already_packed: &PackedItemList, box_type: &BoxType) -> bool {
        match &self.constraint {
            Some(predicate) => predicate(already_packed, box_type),
            None => true,
        }
    }

    /// Returns true if both items have the same dimension set, in any order.
    pub fn same_dimensions(&self, other: &Item) -> bool {
        let mut a = [self.dimensions.x, self.dimensions.y, self.dimensions.z];
        let mut b = [other.dimensions.x, other.dimensions.y, other.dimensions.z];
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    /// Returns the allowed orientations as index triples into the raw
    /// dimension vector, one per axis of the box.
    pub fn allowed_orientations(&self) -> &'static [(usize, usize, usize)] {
        if self.keep_flat {
            &ORIENTATIONS_KEEP_FLAT
        } else {
            &ORIENTATIONS_ANY
        }
    }

    /// Returns the dimensions permuted for the given orientation.
    pub fn dimensions_for_orientation(&self, orientation: (usize, usize, usize)) -> Vector3<u32> {
        let (x_idx, y_idx, z_idx) = orientation;
        Vector3::new(
            self.dimensions[x_idx],
            self.dimensions[y_idx],
            self.dimensions[z_idx],
        )
    }

    /// Validates the item and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.description.is_empty() {
            return Err(Error::InvalidItem("description must not be empty".into()));
        }

        if self.dimensions.x == 0 || self.dimensions.y == 0 || self.dimensions.z == 0 {
            return Err(Error::InvalidItem(format!(
                "all dimensions for '{}' must be positive",
                self.description
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("description", &self.description)
            .field("dimensions", &self.dimensions)
            .field("weight", &self.weight)
            .field("keep_flat", &self.keep_flat)
            .field("constrained", &self.constraint.is_some())
            .finish()
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.dimensions == other.dimensions
            && self.weight == other.weight
            && self.keep_flat == other.keep_flat
            && match (&self.constraint, &other.constraint) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_count() {
        let item = Item::new("I1", 10, 20, 30, 5);
        assert_eq!(item.allowed_orientations().len(), 6);

        let flat = item.clone().with_keep_flat(true);
        assert_eq!(flat.allowed_orientations().len(), 2);
    }

    #[test]
    fn test_keep_flat_preserves_depth() {
        let item = Item::new("I1", 10, 20, 30, 5).with_keep_flat(true);
        for &orientation in item.allowed_orientations() {
            let dims = item.dimensions_for_orientation(orientation);
            assert_eq!(dims.z, 30);
        }
    }

    #[test]
    fn test_dimensions_for_orientation() {
        let item = Item::new("I1", 10, 20, 30, 5);
        let dims = item.dimensions_for_orientation((2, 0, 1));
        assert_eq!((dims.x, dims.y, dims.z), (30, 10, 20));
    }

    #[test]
    fn test_same_dimensions() {
        let a = Item::new("A", 10, 20, 30, 1);
        let b = Item::new("B", 30, 10, 20, 9);
        let c = Item::new("C", 10, 20, 31, 1);

        assert!(a.same_dimensions(&b));
        assert!(!a.same_dimensions(&c));
    }

    #[test]
    fn test_validation() {
        assert!(Item::new("I1", 10, 20, 30, 5).validate().is_ok());
        assert!(Item::new("I1", 0, 20, 30, 5).validate().is_err());
        assert!(Item::new("", 10, 20, 30, 5).validate().is_err());
    }

    #[test]
    fn test_unconstrained_can_always_pack() {
        let item = Item::new("I1", 10, 20, 30, 5);
        let packed = PackedItemList::new();
        let box_type = BoxType::new("B1", 100, 100, 100);

        assert!(item.can_be_packed(&packed, &box_type));
    }
}
