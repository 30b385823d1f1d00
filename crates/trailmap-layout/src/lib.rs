#![forbid(unsafe_code)]

//! Headless roadmap layout.
//!
//! The pipeline turns a normalized [`Node`] tree into positioned nodes and category boxes.
//! Stages run strictly in this order, each mutating the shared [`LayoutTree`]:
//!
//! 1. [`tree::build_layout_tree`] : flatten + size nodes from their wrapped labels
//! 2. [`inherit::resolve_inheritance`] : category / side / visibility
//! 3. [`tidy::layout_tree`] : tidy tree placement, horizontal orientation, left mirroring
//! 4. [`cluster::cluster_leaves`] : compact leaf-only sibling groups
//! 5. [`category::aggregate_categories`] : category boxes + same-side collision sweep
//! 6. [`center::center_root`] : root onto the middle of the category union
//! 7. [`viewport::fit_viewport`] : scale + translation for the target viewport
//!
//! Every stage is public so callers can stop early or inspect intermediate state.

pub mod category;
pub mod center;
pub mod cluster;
pub mod inherit;
pub mod model;
pub mod palette;
pub mod text;
pub mod tidy;
pub mod tree;
pub mod viewport;

use crate::model::{LayoutEdge, LayoutTree, RoadmapLayout, Viewport, VisibleView};
use crate::palette::Palette;
use crate::text::TextMeasurer;
use serde_json::Value;
use std::sync::Arc;
use trailmap_core::{Node, RoadmapConfig, normalize_roadmap_with_diagnostics};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] trailmap_core::Error),
    #[error("invalid viewport {width}x{height}: both sides must be positive")]
    InvalidViewport { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    /// `None` selects the character-count heuristic.
    pub text_measurer: Option<Arc<dyn TextMeasurer + Send + Sync>>,
    pub palette: Arc<Palette>,
    pub viewport: Viewport,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: None,
            palette: Arc::new(Palette::default()),
            viewport: Viewport::default(),
        }
    }
}

/// Runs the full pipeline on an already-normalized tree.
///
/// A root without a name is rejected with [`trailmap_core::Error::EmptyTree`], the same error
/// the normalizer reports for it.
pub fn layout_roadmap(
    root: &Node,
    config: &RoadmapConfig,
    options: &LayoutOptions,
) -> Result<RoadmapLayout> {
    if root.name.trim().is_empty() {
        return Err(trailmap_core::Error::EmptyTree {
            message: "root item has no name".to_string(),
        }
        .into());
    }

    let measurer = options
        .text_measurer
        .as_deref()
        .map(|m| m as &dyn TextMeasurer);

    let mut tree = tree::build_layout_tree(root, config, measurer);
    inherit::resolve_inheritance(&mut tree);
    tidy::layout_tree(
        &mut tree,
        config.node_spacing_vertical,
        config.node_spacing_horizontal,
    );
    cluster::cluster_leaves(&mut tree, config.node_spacing_vertical);
    let mut categories = category::aggregate_categories(&mut tree);
    center::center_root(&mut tree, &mut categories);
    let fit = viewport::fit_viewport(&mut tree, &mut categories, options.viewport)?;
    palette::assign_colors(&mut tree, &options.palette, config.color_mode);

    let edges = tree.edges(config.edge_width);
    let visible = config.hide_leaves.then(|| visible_view(&tree, &edges));

    Ok(RoadmapLayout {
        nodes: tree.nodes,
        edges,
        categories,
        viewport: fit,
        visible,
        diagnostics: Vec::new(),
    })
}

/// Normalizes a raw record and lays it out; normalizer diagnostics are carried into the
/// result.
pub fn layout_raw(
    raw: &Value,
    config: &RoadmapConfig,
    options: &LayoutOptions,
) -> Result<RoadmapLayout> {
    let normalized = normalize_roadmap_with_diagnostics(raw)?;
    let mut layout = layout_roadmap(&normalized.root, config, options)?;
    layout.diagnostics = normalized.diagnostics;
    Ok(layout)
}

/// View without leaves and without edges ending in a leaf. A lone root stays visible.
pub fn visible_view(tree: &LayoutTree, edges: &[LayoutEdge]) -> VisibleView {
    let keep = |id: usize| !tree.nodes[id].is_leaf() || id == LayoutTree::ROOT;
    VisibleView {
        nodes: tree.nodes.iter().map(|n| n.id).filter(|&id| keep(id)).collect(),
        edges: edges
            .iter()
            .filter(|e| keep(e.from) && keep(e.to))
            .cloned()
            .collect(),
    }
}
