//! Category boxes: groups nodes by inherited category and side, wraps each group in a padded
//! rectangle, and pushes same-side boxes apart along the cross axis.

use crate::model::{Bounds, Categories, CategoryBounds, LayoutTree};
use indexmap::IndexMap;
use trailmap_core::Side;

pub const CATEGORY_PADDING: f64 = 40.0;
/// Minimum vertical gap between two boxes on the same side.
pub const CATEGORY_MIN_GAP: f64 = 30.0;

/// Minimal rectangle around the members' footprints, inflated by [`CATEGORY_PADDING`].
pub fn category_bounds(
    tree: &LayoutTree,
    name: &str,
    side: Side,
    members: Vec<usize>,
) -> CategoryBounds {
    let points = members.iter().flat_map(|&i| tree.nodes[i].footprint());
    let b = Bounds::from_points(points).unwrap_or(Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    });
    CategoryBounds {
        name: name.to_string(),
        side,
        x: b.min_x - CATEGORY_PADDING,
        y: b.min_y - CATEGORY_PADDING,
        width: b.width() + 2.0 * CATEGORY_PADDING,
        height: b.height() + 2.0 * CATEGORY_PADDING,
        members,
    }
}

fn mean_y(tree: &LayoutTree, members: &[usize]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    members.iter().map(|&i| tree.nodes[i].y).sum::<f64>() / members.len() as f64
}

fn shift_members(tree: &mut LayoutTree, members: &[usize], dy: f64) {
    for &i in members {
        tree.nodes[i].y += dy;
    }
}

/// Key a category part is stored under: the plain name when the category sits on one side
/// only, `"{name}#{side}"` for each half of a category whose members sit on both sides.
pub fn category_key(name: &str, side: Side, split: bool) -> String {
    if split {
        format!("{name}#{}", side.as_str())
    } else {
        name.to_string()
    }
}

/// Groups every non-root node by its inherited category and resolves same-side overlaps.
///
/// The root is the anchor the boxes are later centered around and never joins a group. Members
/// are grouped by category and effective side, so a category with members on both sides gets
/// one box per side (see [`category_key`]).
///
/// Each side is swept once in order of mean member `y`, carrying a running offset: every box
/// is first moved by the offset accumulated so far, then, if it starts less than
/// [`CATEGORY_MIN_GAP`] below the furthest bottom edge seen on that side, the shortfall is
/// added to the offset and the box moves again. Member nodes move with their box.
pub fn aggregate_categories(tree: &mut LayoutTree) -> Categories {
    let mut groups: IndexMap<(String, Side), Vec<usize>> = IndexMap::new();
    for node in tree.nodes.iter().skip(1) {
        if let Some(category) = &node.inherited_category {
            groups
                .entry((category.clone(), node.effective_side()))
                .or_default()
                .push(node.id);
        }
    }

    let is_split = |name: &str, side: Side| {
        let other = match side {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
        groups.contains_key(&(name.to_string(), other))
    };
    let keyed: Vec<(String, String, Side, Vec<usize>)> = groups
        .iter()
        .map(|((name, side), members)| {
            let key = category_key(name, *side, is_split(name, *side));
            (key, name.clone(), *side, members.clone())
        })
        .collect();

    let mut categories: Categories = keyed
        .into_iter()
        .map(|(key, name, side, members)| (key, category_bounds(tree, &name, side, members)))
        .collect();

    for side in [Side::Left, Side::Right] {
        let mut bucket: Vec<(f64, String)> = categories
            .iter()
            .filter(|(_, c)| c.side == side)
            .map(|(key, c)| (mean_y(tree, &c.members), key.clone()))
            .collect();
        bucket.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut offset = 0.0;
        let mut far_edge: Option<f64> = None;
        for (_, key) in bucket {
            let Some(cat) = categories.get_mut(&key) else {
                continue;
            };
            let name = std::mem::take(&mut cat.name);
            let members = std::mem::take(&mut cat.members);
            if offset > 0.0 {
                shift_members(tree, &members, offset);
            }
            let mut bounds = category_bounds(tree, &name, side, members);
            if let Some(edge) = far_edge {
                let gap = bounds.y - edge;
                if gap < CATEGORY_MIN_GAP {
                    let shortfall = CATEGORY_MIN_GAP - gap;
                    offset += shortfall;
                    shift_members(tree, &bounds.members, shortfall);
                    bounds = category_bounds(tree, &name, side, bounds.members);
                }
            }
            far_edge = Some(far_edge.map_or(bounds.bottom(), |e: f64| e.max(bounds.bottom())));
            *cat = bounds;
        }
    }

    tracing::debug!(categories = categories.len(), "category aggregation done");
    categories
}
