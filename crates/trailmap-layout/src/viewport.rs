use crate::model::{Bounds, Categories, LayoutTree, Viewport, ViewportFit};
use crate::{Error, Result};

/// Padding (px) added on each side of the node-center extent before fitting.
pub const VIEWPORT_PADDING: f64 = 100.0;
pub const FIT_MARGIN: f64 = 0.9;

/// Computes the render scale for `viewport` and translates nodes and boxes so the node-center
/// extent is centered in the scaled viewport (`viewport / scale`).
///
/// The scale never exceeds `1`; it is returned for the renderer and not applied to any
/// coordinate. A degenerate extent (single node, one row) falls back to the padding alone.
pub fn fit_viewport(
    tree: &mut LayoutTree,
    categories: &mut Categories,
    viewport: Viewport,
) -> Result<ViewportFit> {
    let Viewport { width, height } = viewport;
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(Error::InvalidViewport { width, height });
    }

    let b = Bounds::from_points(tree.nodes.iter().map(|n| (n.x, n.y))).unwrap_or(Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    });
    let extent_w = b.width() + 2.0 * VIEWPORT_PADDING;
    let extent_h = b.height() + 2.0 * VIEWPORT_PADDING;
    let scale = ((width / extent_w).min(height / extent_h) * FIT_MARGIN).min(1.0);

    let offset_x = (width / scale - b.width()) / 2.0 - b.min_x;
    let offset_y = (height / scale - b.height()) / 2.0 - b.min_y;
    for node in tree.nodes.iter_mut() {
        node.x += offset_x;
        node.y += offset_y;
    }
    for cat in categories.values_mut() {
        cat.x += offset_x;
        cat.y += offset_y;
    }

    tracing::debug!(scale, offset_x, offset_y, "viewport fit done");
    Ok(ViewportFit {
        scale,
        offset_x,
        offset_y,
        width,
        height,
    })
}
