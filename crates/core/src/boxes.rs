//! Shipping box types.

use nalgebra::Vector3;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A candidate box with inner dimensions and weight limits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxType {
    /// Reference string identifying the box.
    reference: String,

    /// Inner dimensions (width, length, depth).
    inner: Vector3<u32>,

    /// Weight of the empty box.
    empty_weight: u32,

    /// Maximum gross weight including the box itself.
    max_weight: u32,

    /// Remaining inventory, if tracked.
    remaining_amount: Option<u32>,
}

impl BoxType {
    /// Creates a new box with the given reference and inner dimensions.
    ///
    /// The empty weight defaults to zero and the maximum weight is
    /// unlimited until set.
    pub fn new(reference: impl Into<String>, width: u32, length: u32, depth: u32) -> Self {
        Self {
            reference: reference.into(),
            inner: Vector3::new(width, length, depth),
            empty_weight: 0,
            max_weight: u32::MAX,
            remaining_amount: None,
        }
    }

    /// Sets the weight of the empty box.
    pub fn with_empty_weight(mut self, weight: u32) -> Self {
        self.empty_weight = weight;
        self
    }

    /// Sets the maximum gross weight.
    pub fn with_max_weight(mut self, weight: u32) -> Self {
        self.max_weight = weight;
        self
    }

    /// Sets the remaining inventory amount.
    pub fn with_remaining_amount(mut self, amount: u32) -> Self {
        self.remaining_amount = Some(amount);
        self
    }

    /// Returns the reference string.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the inner dimensions (width, length, depth).
    pub fn inner_dimensions(&self) -> &Vector3<u32> {
        &self.inner
    }

    /// Returns the inner width.
    pub fn inner_width(&self) -> u32 {
        self.inner.x
    }

    /// Returns the inner length.
    pub fn inner_length(&self) -> u32 {
        self.inner.y
    }

    /// Returns the inner depth.
    pub fn inner_depth(&self) -> u32 {
        self.inner.z
    }

    /// Returns the inner volume.
    pub fn inner_volume(&self) -> u64 {
        u64::from(self.inner.x) * u64::from(self.inner.y) * u64::from(self.inner.z)
    }

    /// Returns the weight of the empty box.
    pub fn empty_weight(&self) -> u32 {
        self.empty_weight
    }

    /// Returns the maximum gross weight.
    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// Returns the weight budget available for items.
    pub fn remaining_weight_capacity(&self) -> u32 {
        self.max_weight.saturating_sub(self.empty_weight)
    }

    /// Returns the remaining inventory, if tracked.
    pub fn remaining_amount(&self) -> Option<u32> {
        self.remaining_amount
    }

    /// Consumes one unit of inventory, if tracked.
    pub fn decrease_amount(&mut self) {
        if let Some(amount) = self.remaining_amount {
            self.remaining_amount = Some(amount.saturating_sub(1));
        }
    }

    /// Validates the box and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.inner.x == 0 || self.inner.y == 0 || self.inner.z == 0 {
            return Err(Error::InvalidBox(format!(
                "all inner dimensions for '{}' must be positive",
                self.reference
            )));
        }

        if self.max_weight < self.empty_weight {
            return Err(Error::InvalidBox(format!(
                "maximum weight for '{}' is below its empty weight",
                self.reference
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_capacity() {
        let box_type = BoxType::new("B1", 100, 80, 50)
            .with_empty_weight(10)
            .with_max_weight(250);

        assert_eq!(box_type.remaining_weight_capacity(), 240);
    }

    #[test]
    fn test_inventory() {
        let mut box_type = BoxType::new("B1", 100, 80, 50).with_remaining_amount(2);

        box_type.decrease_amount();
        assert_eq!(box_type.remaining_amount(), Some(1));
        box_type.decrease_amount();
        box_type.decrease_amount();
        assert_eq!(box_type.remaining_amount(), Some(0));
    }

    #[test]
    fn test_untracked_inventory_stays_untracked() {
        let mut box_type = BoxType::new("B1", 100, 80, 50);
        box_type.decrease_amount();
        assert_eq!(box_type.remaining_amount(), None);
    }

    #[test]
    fn test_validation() {
        assert!(BoxType::new("B1", 100, 80, 50).validate().is_ok());
        assert!(BoxType::new("B2", 0, 80, 50).validate().is_err());

        let too_light = BoxType::new("B3", 100, 80, 50)
            .with_empty_weight(100)
            .with_max_weight(50);
        assert!(too_light.validate().is_err());
    }
}
