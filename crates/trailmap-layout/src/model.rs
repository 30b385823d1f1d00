use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use trailmap_core::{Diagnostic, Side, Status};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A roadmap node after layout. `x`/`y` are the node center.
///
/// `parent` is an index back-reference for traversal only; ownership of the tree is the
/// `children` lists, rooted at index 0 of [`LayoutTree::nodes`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutNode {
    /// Pre-order index; equal to this node's position in the layout's node list.
    pub id: usize,
    pub name: String,
    pub status: Status,
    pub link: Option<String>,
    pub category: Option<String>,
    pub side: Option<Side>,
    pub visibility: Option<String>,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub node_width: f64,
    pub node_height: f64,
    pub depth_scale: f64,
    pub font_size: f64,
    pub label_lines: Vec<String>,
    pub inherited_category: Option<String>,
    pub inherited_side: Option<Side>,
    pub inherited_visibility: Option<String>,
    pub color: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl LayoutNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn effective_side(&self) -> Side {
        self.side.or(self.inherited_side).unwrap_or(Side::Right)
    }

    pub fn footprint(&self) -> [(f64, f64); 2] {
        let hw = self.node_width / 2.0;
        let hh = self.node_height / 2.0;
        [(self.x - hw, self.y - hh), (self.x + hw, self.y + hh)]
    }
}

/// Flat, pre-ordered node arena shared by every pipeline stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutTree {
    pub nodes: Vec<LayoutNode>,
}

impl LayoutTree {
    pub const ROOT: usize = 0;

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.first()
    }

    pub fn node(&self, id: usize) -> &LayoutNode {
        &self.nodes[id]
    }

    pub fn by_name(&self, name: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn edges(&self, edge_width: f64) -> Vec<LayoutEdge> {
        self.nodes
            .iter()
            .filter_map(|n| {
                n.parent.map(|p| LayoutEdge {
                    from: p,
                    to: n.id,
                    stroke_width: edge_width * n.depth_scale,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub from: usize,
    pub to: usize,
    pub stroke_width: f64,
}

/// Axis-aligned box around every node of one category; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBounds {
    pub name: String,
    pub side: Side,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub members: Vec<usize>,
}

impl CategoryBounds {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn overlaps(&self, other: &CategoryBounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

pub type Categories = IndexMap<String, CategoryBounds>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Render-time transform: draw with `scale(scale)`; the offsets are already baked into node
/// and category coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportFit {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibleView {
    pub nodes: Vec<usize>,
    pub edges: Vec<LayoutEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub categories: Categories,
    pub viewport: ViewportFit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<VisibleView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}
