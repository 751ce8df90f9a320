//! Single-box volume packer.

use log::debug;

use u_packing_core::{
    BoxType, Item, ItemList, OrientatedItem, PackResult, PackedBox, PackedItem, PackedItemList,
    PackedLayer, Result,
};

use crate::orientation::OrientatedItemFactory;
use crate::stabiliser::LayerStabiliser;

/// Packs one box from a prioritized list of candidate items.
///
/// Layers are built bottom-up: items are placed left-to-right into rows,
/// rows front-to-back into a layer, and shorter items are stacked into the
/// headroom above their taller neighbours. Items that fail mid-row are
/// deferred and retried at the next row or layer boundary; items that can
/// never fit this box are reported back unpacked.
///
/// A packer owns its box and item list for the duration of one [`pack`]
/// call and is consumed by it. Instances are independent: different boxes
/// may be packed on different threads.
///
/// [`pack`]: VolumePacker::pack
pub struct VolumePacker {
    box_type: BoxType,
    items: ItemList,
    skipped: Vec<Item>,
    unpacked: Vec<Item>,
    layers: Vec<PackedLayer>,
    packed: PackedItemList,
    remaining_weight: u32,
    frame_width: u32,
    frame_length: u32,
    box_rotated: bool,
    look_ahead_mode: bool,
}

impl VolumePacker {
    /// Creates a packer for the given box and candidate items.
    pub fn new(box_type: BoxType, items: ItemList) -> Self {
        // Packing always runs against a frame whose width is the larger of
        // the two horizontal extents; placements are mapped back at the end.
        let frame_width = box_type.inner_width().max(box_type.inner_length());
        let frame_length = box_type.inner_width().min(box_type.inner_length());
        let box_rotated = box_type.inner_width() != frame_width;
        let remaining_weight = box_type.remaining_weight_capacity();

        Self {
            box_type,
            items,
            skipped: Vec::new(),
            unpacked: Vec::new(),
            layers: Vec::new(),
            packed: PackedItemList::new(),
            remaining_weight,
            frame_width,
            frame_length,
            box_rotated,
            look_ahead_mode: false,
        }
    }

    pub(crate) fn look_ahead(box_type: BoxType, items: ItemList) -> Self {
        let mut packer = Self::new(box_type, items);
        packer.look_ahead_mode = true;
        packer
    }

    /// Packs as many items as possible.
    ///
    /// Always produces a [`PackedBox`] (possibly empty); items that could
    /// not be placed are returned in [`PackResult::unpacked`]. The only
    /// error cases are invalid inputs.
    pub fn pack(mut self) -> Result<PackResult> {
        self.box_type.validate()?;
        for item in self.items.iter_sorted() {
            item.validate()?;
        }

        Ok(self.run())
    }

    /// Trial-packs and reports only how many items were placed.
    pub(crate) fn pack_count(self) -> usize {
        self.run().packed_box.items().len()
    }

    fn run(mut self) -> PackResult {
        while !self.items.is_empty() {
            let start_depth: u32 = self.layers.iter().map(PackedLayer::depth).sum();
            if start_depth >= self.box_type.inner_depth() {
                break;
            }
            self.pack_layer(start_depth);
        }

        // Whatever is still pending or skipped has no home in this box.
        let mut unpacked = std::mem::take(&mut self.unpacked);
        while let Some(item) = self.items.pop() {
            unpacked.push(item);
        }
        unpacked.extend(self.skipped.drain(..));

        let mut layers = std::mem::take(&mut self.layers);
        if self.box_rotated {
            layers = rotate_layers(layers);
        }
        if !self.look_ahead_mode {
            layers = LayerStabiliser::new().stabilise(layers);
        }

        let mut items = PackedItemList::new();
        for layer in layers {
            for item in layer.into_items() {
                items.insert(item);
            }
        }

        debug!(
            "packed {} item(s) into box {} ({} left over)",
            items.len(),
            self.box_type.reference(),
            unpacked.len()
        );

        PackResult {
            packed_box: PackedBox::new(self.box_type, items),
            unpacked,
        }
    }

    /// Builds one layer starting at `start_depth`, filling the packing
    /// frame and whatever vertical budget the box has left.
    fn pack_layer(&mut self, start_depth: u32) {
        let factory = if self.look_ahead_mode {
            OrientatedItemFactory::single_pass(self.box_type.clone())
        } else {
            OrientatedItemFactory::new(self.box_type.clone())
        };

        let mut layer = PackedLayer::new();
        let mut width_left = self.frame_width;
        let mut length_left = self.frame_length;
        let depth_left = self.box_type.inner_depth() - start_depth;

        let (mut x, mut y) = (0u32, 0u32);
        let mut row_width = 0u32;
        let mut row_length = 0u32;
        let mut layer_depth = 0u32;
        let mut prev_item: Option<OrientatedItem> = None;

        while !self.items.is_empty() {
            let item = match self.items.pop() {
                Some(item) => item,
                None => break,
            };

            // Weight and raw size are settled before any geometry is tried.
            if item.weight() > self.remaining_weight || !factory.item_fits_empty_box(&item) {
                debug!(
                    "item {} cannot go into box {} at all; dropping",
                    item.description(),
                    self.box_type.reference()
                );
                self.unpacked.push(item);
                self.rebuild_item_list(None);
                continue;
            }

            let is_last_item = self.items.is_empty();
            let orientated = factory.best_orientation(
                &item,
                prev_item.as_ref(),
                &mut self.items,
                is_last_item,
                width_left,
                length_left,
                depth_left,
                row_length,
                &self.packed,
            );

            if let Some(orientated) = orientated {
                let (width, length, depth) =
                    (orientated.width(), orientated.length(), orientated.depth());
                debug!(
                    "placing {} as {}x{}x{} at ({}, {}, {})",
                    item.description(),
                    width,
                    length,
                    depth,
                    x,
                    y,
                    start_depth
                );

                self.remaining_weight -= item.weight();
                let packed = PackedItem::from_orientated(orientated.clone(), x, y, start_depth);
                self.packed.insert(packed.clone());
                layer.insert(packed);

                width_left -= width;
                row_width += width;
                row_length = row_length.max(length);
                layer_depth = layer_depth.max(depth);

                // Fill the headroom above a shorter item before moving on.
                if layer_depth > depth {
                    self.stack_into(
                        &factory,
                        &mut layer,
                        width,
                        length,
                        layer_depth - depth,
                        x,
                        y,
                        start_depth + depth,
                    );
                }

                x += width;
                prev_item = Some(orientated);
                self.rebuild_item_list(None);
            } else if layer.is_empty() {
                // A fresh layer offers the whole frame; failing here means
                // the item can never fit the remaining depth.
                debug!(
                    "item {} does not fit the remaining depth of box {}; dropping",
                    item.description(),
                    self.box_type.reference()
                );
                self.unpacked.push(item);
                self.rebuild_item_list(None);
            } else if width_left > 0 && !self.items.is_empty() {
                // Defer within this row; retried at the next boundary.
                self.skipped.push(item);
            } else if x > 0 && item.min_dimension() <= length_left {
                debug!("starting new row at y={}", y + row_length);
                width_left += row_width;
                length_left -= row_length;
                y += row_length;
                x = 0;
                row_width = 0;
                row_length = 0;
                prev_item = None;
                self.rebuild_item_list(Some(item));
            } else {
                self.rebuild_item_list(Some(item));
                break;
            }
        }

        if !layer.is_empty() {
            self.layers.push(layer);
        }
    }

    /// Stacks further items into the vertical slot above a just-placed
    /// item, up to the current layer depth.
    #[allow(clippy::too_many_arguments)]
    fn stack_into(
        &mut self,
        factory: &OrientatedItemFactory,
        layer: &mut PackedLayer,
        max_width: u32,
        max_length: u32,
        mut max_depth: u32,
        x: u32,
        y: u32,
        mut z: u32,
    ) {
        while max_depth > 0 && !self.items.is_empty() {
            let top_fits_weight = self
                .items
                .peek()
                .is_some_and(|top| top.weight() <= self.remaining_weight);
            if !top_fits_weight {
                break;
            }

            let item = match self.items.pop() {
                Some(item) => item,
                None => break,
            };
            let is_last_item = self.items.is_empty();
            let orientated = factory.best_orientation(
                &item,
                None,
                &mut self.items,
                is_last_item,
                max_width,
                max_length,
                max_depth,
                0,
                &self.packed,
            );

            match orientated {
                Some(orientated) => {
                    debug!(
                        "stacking {} at ({}, {}, {})",
                        item.description(),
                        x,
                        y,
                        z
                    );
                    self.remaining_weight -= item.weight();
                    let depth = orientated.depth();
                    let packed = PackedItem::from_orientated(orientated, x, y, z);
                    self.packed.insert(packed.clone());
                    layer.insert(packed);
                    max_depth -= depth;
                    z += depth;
                }
                None => {
                    self.items.insert(item);
                    break;
                }
            }
        }
    }

    /// Swaps the skipped queue back in once the pending list runs dry, then
    /// reinserts the in-flight item, if any.
    fn rebuild_item_list(&mut self, current: Option<Item>) {
        if self.items.is_empty() && !self.skipped.is_empty() {
            let mut fresh = ItemList::new().with_strategy(self.items.strategy());
            for item in self.skipped.drain(..) {
                fresh.insert(item);
            }
            self.items = fresh;
        }

        if let Some(item) = current {
            self.items.insert(item);
        }
    }
}

/// Maps placements from the packing frame back onto the original box axes
/// by swapping X with Y and width with length.
fn rotate_layers(layers: Vec<PackedLayer>) -> Vec<PackedLayer> {
    layers
        .into_iter()
        .map(|layer| {
            let mut rotated = PackedLayer::new();
            for item in layer.into_items() {
                let (x, y, z) = (item.x(), item.y(), item.z());
                let (width, length, depth) = (item.width(), item.length(), item.depth());
                rotated.insert(PackedItem::new(item.into_item(), y, x, z, length, width, depth));
            }
            rotated
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_list(items: Vec<Item>) -> ItemList {
        items.into_iter().collect()
    }

    #[test]
    fn test_empty_list_packs_empty_box() {
        let result = VolumePacker::new(BoxType::new("B1", 10, 10, 10), ItemList::new())
            .pack()
            .unwrap();

        assert!(result.packed_box.items().is_empty());
        assert!(result.all_packed());
    }

    #[test]
    fn test_invalid_box_is_rejected() {
        let items = item_list(vec![Item::new("I1", 5, 5, 5, 1)]);
        let result = VolumePacker::new(BoxType::new("B1", 0, 10, 10), items).pack();

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_item_is_rejected() {
        let items = item_list(vec![Item::new("I1", 0, 5, 5, 1)]);
        let result = VolumePacker::new(BoxType::new("B1", 10, 10, 10), items).pack();

        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_item_is_returned_unpacked() {
        let items = item_list(vec![
            Item::new("fits", 5, 5, 5, 1),
            Item::new("oversized", 50, 50, 50, 1),
        ]);
        let result = VolumePacker::new(BoxType::new("B1", 10, 10, 10), items)
            .pack()
            .unwrap();

        assert_eq!(result.packed_box.items().len(), 1);
        assert_eq!(result.unpacked.len(), 1);
        assert_eq!(result.unpacked[0].description(), "oversized");
    }

    #[test]
    fn test_rows_advance_along_length() {
        let items = item_list(vec![
            Item::new("a", 5, 5, 5, 1),
            Item::new("b", 5, 5, 5, 1),
            Item::new("c", 5, 5, 5, 1),
            Item::new("d", 5, 5, 5, 1),
        ]);
        let result = VolumePacker::new(BoxType::new("B1", 10, 10, 5), items)
            .pack()
            .unwrap();

        assert_eq!(result.packed_box.items().len(), 4);
        let origins: Vec<(u32, u32, u32)> = result
            .packed_box
            .items()
            .iter()
            .map(|item| (item.x(), item.y(), item.z()))
            .collect();
        assert!(origins.contains(&(0, 0, 0)));
        assert!(origins.contains(&(5, 0, 0)));
        assert!(origins.contains(&(0, 5, 0)));
        assert!(origins.contains(&(5, 5, 0)));
    }

    #[test]
    fn test_lookahead_orients_first_item_around_the_next() {
        // Laid flat along the width the wide item would block the row;
        // look-ahead turns it so the large one still fits beside it.
        let items = item_list(vec![
            Item::new("large", 6, 6, 4, 1),
            Item::new("wide", 10, 4, 4, 1),
        ]);
        let result = VolumePacker::new(BoxType::new("B1", 10, 10, 4), items)
            .pack()
            .unwrap();

        assert!(result.all_packed());

        let find = |description: &str| {
            result
                .packed_box
                .items()
                .iter()
                .find(|item| item.item().description() == description)
                .unwrap()
        };

        let wide = find("wide");
        assert_eq!((wide.x(), wide.y()), (0, 0));
        assert_eq!((wide.width(), wide.length()), (4, 10));
        assert_eq!((find("large").x(), find("large").y()), (4, 0));
    }
}
