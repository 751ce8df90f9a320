//! Vertical reordering of finalized layers.

use u_packing_core::PackedLayer;

/// Reorders layers so that larger footprints support smaller ones.
///
/// Layers are sorted by decreasing footprint (ties keep their build order)
/// and every item's Z coordinate is rewritten so each layer's bottom rests
/// on the cumulative depth of the layers below it. Items' X/Y positions are
/// untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerStabiliser;

impl LayerStabiliser {
    /// Creates a new stabiliser.
    pub fn new() -> Self {
        Self
    }

    /// Returns the re-ordered, re-based layers.
    pub fn stabilise(&self, mut layers: Vec<PackedLayer>) -> Vec<PackedLayer> {
        layers.sort_by(|a, b| b.footprint().cmp(&a.footprint()));

        let mut stabilised = Vec::with_capacity(layers.len());
        let mut current_depth = 0u32;

        for layer in layers {
            let base = layer.start_depth();
            let depth = layer.depth();

            let mut rebuilt = PackedLayer::new();
            for item in layer.into_items() {
                let z = item.z() - base + current_depth;
                let (x, y) = (item.x(), item.y());
                rebuilt.insert(item.repositioned(x, y, z));
            }

            stabilised.push(rebuilt);
            current_depth += depth;
        }

        stabilised
    }
}
