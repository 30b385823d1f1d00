//! Leaf clustering: pulls leaf-only sibling groups toward their parent and folds large groups
//! into two columns.

use crate::model::LayoutTree;

/// Fraction of the parent-to-child depth distance kept after clustering.
pub const CLUSTER_PULL: f64 = 0.5;
/// Groups up to this size stay in one column.
pub const SINGLE_COLUMN_MAX: usize = 3;
pub const ROW_SPACING_FACTOR: f64 = 1.2;
/// Depth-axis distance between the two column centers.
pub const COLUMN_GAP: f64 = 320.0;

/// Runs after tree layout and side mirroring.
///
/// For every parent whose children are all leaves, each child moves to half its depth
/// distance (toward the parent, on its effective side). Groups larger than
/// [`SINGLE_COLUMN_MAX`] are laid out as two columns (even index left, odd index right) with
/// `ceil(n / 2)` rows centered on the parent's cross-axis position; smaller groups keep their
/// tree-layout cross-axis positions.
pub fn cluster_leaves(tree: &mut LayoutTree, node_spacing_vertical: f64) {
    let row_spacing = ROW_SPACING_FACTOR * node_spacing_vertical;
    let mut clustered = 0usize;

    for p in 0..tree.len() {
        let children = &tree.nodes[p].children;
        if children.is_empty() || !children.iter().all(|&c| tree.nodes[c].is_leaf()) {
            continue;
        }
        let children = children.clone();
        let (parent_x, parent_y) = (tree.nodes[p].x, tree.nodes[p].y);
        let n = children.len();
        let rows = n.div_ceil(2);

        for (k, &c) in children.iter().enumerate() {
            let node = &mut tree.nodes[c];
            let distance = (node.x - parent_x).abs() * CLUSTER_PULL;
            let anchor_x = parent_x + node.effective_side().sign() * distance;
            if n <= SINGLE_COLUMN_MAX {
                node.x = anchor_x;
                continue;
            }
            let column = if k % 2 == 0 { -0.5 } else { 0.5 };
            let row = (k / 2) as f64 - (rows as f64 - 1.0) / 2.0;
            node.x = anchor_x + column * COLUMN_GAP;
            node.y = parent_y + row * row_spacing;
        }
        clustered += 1;
    }

    tracing::debug!(groups = clustered, "leaf clustering done");
}
