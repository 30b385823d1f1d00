use crate::model::{Categories, LayoutTree};

/// Moves everything except the root so that the root's `y` sits at the midpoint of the union
/// of all category boxes. Returns the applied delta; no-op (0) without categories.
pub fn center_root(tree: &mut LayoutTree, categories: &mut Categories) -> f64 {
    let Some(root) = tree.root() else {
        return 0.0;
    };
    let mut extent: Option<(f64, f64)> = None;
    for cat in categories.values() {
        extent = Some(match extent {
            None => (cat.y, cat.bottom()),
            Some((top, bottom)) => (top.min(cat.y), bottom.max(cat.bottom())),
        });
    }
    let Some((top, bottom)) = extent else {
        return 0.0;
    };

    let delta = root.y - (top + bottom) / 2.0;
    for node in tree.nodes.iter_mut().skip(1) {
        node.y += delta;
    }
    for cat in categories.values_mut() {
        cat.y += delta;
    }
    tracing::debug!(delta, "root centering done");
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::aggregate_categories;
    use crate::inherit::resolve_inheritance;
    use crate::tree::build_layout_tree;
    use trailmap_core::{Node, RoadmapConfig, Side};

    fn tree_with(categories: &[(&str, Side, f64)]) -> LayoutTree {
        let mut root = Node::new("root");
        for (name, side, _) in categories {
            let mut n = Node::new(*name);
            n.category = Some(name.to_string());
            n.side = Some(*side);
            root.children.push(n);
        }
        let mut tree = build_layout_tree(&root, &RoadmapConfig::default(), None);
        resolve_inheritance(&mut tree);
        for (i, (_, _, y)) in categories.iter().enumerate() {
            tree.nodes[i + 1].y = *y;
        }
        tree
    }

    #[test]
    fn root_lands_on_union_midpoint() {
        let mut tree = tree_with(&[("a", Side::Right, 300.0), ("b", Side::Left, 900.0)]);
        let mut cats = aggregate_categories(&mut tree);
        let gap_before = tree.nodes[2].y - tree.nodes[1].y;

        center_root(&mut tree, &mut cats);

        let top = cats.values().map(|c| c.y).fold(f64::INFINITY, f64::min);
        let bottom = cats
            .values()
            .map(|c| c.bottom())
            .fold(f64::NEG_INFINITY, f64::max);
        let root = tree.root().unwrap();
        assert!((root.y - (top + bottom) / 2.0).abs() < 1e-9);
        assert_eq!(root.y, 0.0);
        // Relative layout is preserved.
        assert!((tree.nodes[2].y - tree.nodes[1].y - gap_before).abs() < 1e-9);
        // Boxes still contain their members.
        for cat in cats.values() {
            for &m in &cat.members {
                let [(_, y0), (_, y1)] = tree.nodes[m].footprint();
                assert!(y0 >= cat.y - 1e-9 && y1 <= cat.bottom() + 1e-9);
            }
        }
    }

    #[test]
    fn no_categories_is_a_no_op() {
        let mut tree = build_layout_tree(&Node::new("solo"), &RoadmapConfig::default(), None);
        tree.nodes[0].y = 42.0;
        let mut cats = Categories::new();
        assert_eq!(center_root(&mut tree, &mut cats), 0.0);
        assert_eq!(tree.nodes[0].y, 42.0);
    }
}
