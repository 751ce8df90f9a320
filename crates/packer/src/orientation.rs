//! Orientation selection for item placement.

use log::trace;

use u_packing_core::{BoxType, Item, ItemList, OrientatedItem, PackedItemList};

use crate::packer::VolumePacker;

/// Number of pending items considered by placement look-ahead.
const LOOKAHEAD_ITEMS: usize = 8;

/// Chooses the best axis-aligned orientation of an item for a free cuboid
/// inside one specific box.
pub struct OrientatedItemFactory {
    box_type: BoxType,
    /// Single-pass factories never trial-pack; look-ahead packers use them
    /// so that look-ahead does not recurse.
    single_pass: bool,
}

impl OrientatedItemFactory {
    /// Creates a factory for the given box.
    pub fn new(box_type: BoxType) -> Self {
        Self {
            box_type,
            single_pass: false,
        }
    }

    pub(crate) fn single_pass(box_type: BoxType) -> Self {
        Self {
            box_type,
            single_pass: true,
        }
    }

    /// Returns the best orientation of `item` for the free cuboid
    /// `(width_left, length_left, depth_left)`, or `None` if no orientation
    /// fits.
    ///
    /// Orientations that sit flush inside the current row (`length` within
    /// `row_length`) are preferred over ones that would widen the row.
    /// Within a tier, candidates are ranked by how many of the following
    /// items a trial packing still manages to place, then by wasted slot
    /// volume, then by the row length they leave available.
    #[allow(clippy::too_many_arguments)]
    pub fn best_orientation(
        &self,
        item: &Item,
        prev_item: Option<&OrientatedItem>,
        next_items: &mut ItemList,
        is_last_item: bool,
        width_left: u32,
        length_left: u32,
        depth_left: u32,
        row_length: u32,
        already_packed: &PackedItemList,
    ) -> Option<OrientatedItem> {
        let possible =
            self.possible_orientations(item, width_left, length_left, depth_left, already_packed);
        if possible.is_empty() {
            return None;
        }

        // A neighbour with identical dimensions keeps its orientation.
        if let Some(prev) = prev_item {
            if prev.item().same_dimensions(item) {
                if let Some(matched) = possible
                    .iter()
                    .find(|candidate| candidate.dimensions() == prev.dimensions())
                {
                    return Some(matched.clone());
                }
            }
        }

        let flush: Vec<&OrientatedItem> = if row_length > 0 {
            possible
                .iter()
                .filter(|candidate| candidate.length() <= row_length)
                .collect()
        } else {
            Vec::new()
        };
        let candidates: Vec<&OrientatedItem> = if flush.is_empty() {
            possible.iter().collect()
        } else {
            flush
        };

        if candidates.len() == 1 {
            return Some(candidates[0].clone());
        }

        let slot_volume =
            u64::from(width_left) * u64::from(length_left) * u64::from(depth_left);

        let mut scored: Vec<(usize, u64, u32, &OrientatedItem)> = candidates
            .into_iter()
            .map(|candidate| {
                let packed_ahead = if self.single_pass || is_last_item {
                    0
                } else {
                    self.additional_packed_count(
                        candidate, next_items, width_left, row_length, depth_left,
                    )
                };
                let wasted = slot_volume - candidate.volume();
                let length_available = length_left - candidate.length();
                (packed_ahead, wasted, length_available, candidate)
            })
            .collect();

        // More follow-up placements first, then least waste, then the most
        // row length left over. Stable, so enumeration order settles ties.
        scored.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| b.2.cmp(&a.2))
        });

        scored
            .first()
            .map(|(_, _, _, candidate)| (*candidate).clone())
    }

    /// Enumerates the orientations of `item` that fit the free cuboid and
    /// pass the item's placement predicate.
    pub fn possible_orientations(
        &self,
        item: &Item,
        max_width: u32,
        max_length: u32,
        max_depth: u32,
        already_packed: &PackedItemList,
    ) -> Vec<OrientatedItem> {
        if !item.can_be_packed(already_packed, &self.box_type) {
            trace!("item {} rejected by its placement predicate", item.description());
            return Vec::new();
        }

        self.orientations_within(item, max_width, max_length, max_depth)
    }

    /// Enumerates the orientations of `item` that fit the box when empty,
    /// ignoring placement state.
    pub fn possible_orientations_in_empty_box(&self, item: &Item) -> Vec<OrientatedItem> {
        self.orientations_within(
            item,
            self.box_type.inner_width(),
            self.box_type.inner_length(),
            self.box_type.inner_depth(),
        )
    }

    /// Returns true if any orientation of `item` fits the empty box.
    pub fn item_fits_empty_box(&self, item: &Item) -> bool {
        !self.possible_orientations_in_empty_box(item).is_empty()
    }

    fn orientations_within(
        &self,
        item: &Item,
        max_width: u32,
        max_length: u32,
        max_depth: u32,
    ) -> Vec<OrientatedItem> {
        let mut orientations: Vec<OrientatedItem> = Vec::new();

        for &permutation in item.allowed_orientations() {
            let dims = item.dimensions_for_orientation(permutation);
            if orientations
                .iter()
                .any(|existing| *existing.dimensions() == dims)
            {
                continue;
            }
            if dims.x <= max_width && dims.y <= max_length && dims.z <= max_depth {
                orientations.push(OrientatedItem::new(item.clone(), dims.x, dims.y, dims.z));
            }
        }

        orientations
    }

    /// Trial-packs the next few pending items into the row space remaining
    /// after this orientation and counts how many still fit.
    fn additional_packed_count(
        &self,
        orientated: &OrientatedItem,
        next_items: &mut ItemList,
        width_left: u32,
        row_length: u32,
        depth_left: u32,
    ) -> usize {
        let trial_width = width_left - orientated.width();
        if trial_width == 0 {
            return 0;
        }

        let trial_items = next_items.top_n(LOOKAHEAD_ITEMS);
        if trial_items.is_empty() {
            return 0;
        }

        let trial_length = if row_length > 0 {
            row_length
        } else {
            orientated.length()
        };
        let trial_volume = BoxType::new("lookahead", trial_width, trial_length, depth_left);

        VolumePacker::look_ahead(trial_volume, trial_items).pack_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> OrientatedItemFactory {
        OrientatedItemFactory::new(BoxType::new("B1", 100, 80, 50))
    }

    #[test]
    fn test_duplicate_orientations_collapse() {
        let cube = Item::new("cube", 10, 10, 10, 1);
        let orientations = factory().possible_orientations(
            &cube,
            100,
            80,
            50,
            &PackedItemList::new(),
        );

        assert_eq!(orientations.len(), 1);
    }

    #[test]
    fn test_keep_flat_restricts_orientations() {
        let flat = Item::new("flat", 10, 20, 5, 1).with_keep_flat(true);
        let orientations = factory().possible_orientations(
            &flat,
            100,
            80,
            50,
            &PackedItemList::new(),
        );

        assert_eq!(orientations.len(), 2);
        for orientation in &orientations {
            assert_eq!(orientation.depth(), 5);
        }
    }

    #[test]
    fn test_fits_empty_box_uses_rotation() {
        let factory = factory();

        // Only fits once rotated so the 90 extent lies along the width.
        let long = Item::new("long", 10, 90, 10, 1);
        assert!(factory.item_fits_empty_box(&long));

        let oversized = Item::new("oversized", 10, 110, 10, 1);
        assert!(!factory.item_fits_empty_box(&oversized));
    }

    #[test]
    fn test_predicate_filters_all_orientations() {
        let constrained = Item::new("constrained", 10, 10, 10, 1)
            .with_constraint(|packed, _| packed.is_empty());

        let factory = factory();
        let empty = PackedItemList::new();
        assert_eq!(
            factory
                .possible_orientations(&constrained, 100, 80, 50, &empty)
                .len(),
            1
        );

        let mut occupied = PackedItemList::new();
        occupied.insert(u_packing_core::PackedItem::new(
            Item::new("other", 5, 5, 5, 1),
            0,
            0,
            0,
            5,
            5,
            5,
        ));
        assert!(factory
            .possible_orientations(&constrained, 100, 80, 50, &occupied)
            .is_empty());
    }

    #[test]
    fn test_flush_orientation_preferred() {
        let item = Item::new("brick", 10, 20, 5, 1);
        let mut next = ItemList::new();
        let chosen = factory()
            .best_orientation(
                &item,
                None,
                &mut next,
                true,
                100,
                80,
                50,
                10,
                &PackedItemList::new(),
            )
            .unwrap();

        // Only orientations no longer than the current row survive the
        // first cut.
        assert!(chosen.length() <= 10);
    }
}
