//! Attribute inheritance: category, side and visibility flow from ancestors to descendants
//! that do not set them.
//!
//! [`LayoutTree`] is pre-ordered, so every parent precedes its children. One forward sweep
//! that copies the parent's resolved values is enough; no node ever walks up its ancestor
//! chain.

use crate::model::LayoutTree;

pub fn resolve_inheritance(tree: &mut LayoutTree) {
    for i in 0..tree.nodes.len() {
        let (category, side, visibility) = match tree.nodes[i].parent {
            Some(p) => {
                let parent = &tree.nodes[p];
                (
                    parent.inherited_category.clone(),
                    parent.inherited_side,
                    parent.inherited_visibility.clone(),
                )
            }
            None => (None, None, None),
        };
        let node = &mut tree.nodes[i];
        node.inherited_category = node.category.clone().or(category);
        node.inherited_side = node.side.or(side);
        node.inherited_visibility = node.visibility.clone().or(visibility);
    }
}
