//! Flattens a [`Node`] tree into a [`LayoutTree`] and sizes every node from its label.

use crate::model::{LayoutNode, LayoutTree};
use crate::text::{
    DeterministicTextMeasurer, HEURISTIC_CHAR_WIDTH_FACTOR, LINE_HEIGHT_FACTOR, TextMeasurer,
    TextStyle, wrap_label, wrap_label_chars,
};
use trailmap_core::{Node, RoadmapConfig};

/// Per-level size decay: `depth_scale = DEPTH_DECAY^depth`.
pub const DEPTH_DECAY: f64 = 0.85;
pub const BASE_FONT_SIZE: f64 = 16.0;
pub const LABEL_MAX_WIDTH: f64 = 180.0;
pub const NODE_PADDING_X: f64 = 16.0;
pub const NODE_PADDING_Y: f64 = 10.0;
pub const MIN_NODE_WIDTH: f64 = 120.0;
pub const MIN_NODE_HEIGHT: f64 = 40.0;

pub fn depth_scale(depth: usize) -> f64 {
    DEPTH_DECAY.powi(depth.min(i32::MAX as usize) as i32)
}

/// Label lines plus the unscaled (depth 0) text block size.
#[derive(Debug, Clone)]
pub struct LabelBlock {
    pub lines: Vec<String>,
    pub width: f64,
    pub height: f64,
}

/// Wraps and measures a label at depth-0 metrics. Deeper nodes reuse the same line breaks and
/// scale the block by their depth scale, so identical labels never grow with depth.
pub fn measure_label(
    name: &str,
    config: &RoadmapConfig,
    measurer: Option<&dyn TextMeasurer>,
) -> LabelBlock {
    let style = TextStyle {
        font_size: BASE_FONT_SIZE * config.text_scale,
        ..Default::default()
    };
    let max_width = LABEL_MAX_WIDTH * config.node_scale;

    let (lines, width) = match measurer {
        Some(m) => {
            let lines = wrap_label(name, m, &style, Some(max_width));
            let width = lines
                .iter()
                .map(|l| m.measure(l, &style).width)
                .fold(0.0, f64::max);
            (lines, width)
        }
        None => {
            let col = style.font_size * HEURISTIC_CHAR_WIDTH_FACTOR;
            let max_chars = (max_width / col).floor() as usize;
            let lines = wrap_label_chars(name, max_chars);
            let heuristic = DeterministicTextMeasurer::default();
            let width = lines
                .iter()
                .map(|l| heuristic.line_width_px(l, style.font_size))
                .fold(0.0, f64::max);
            (lines, width)
        }
    };
    let height = lines.len() as f64 * style.font_size * LINE_HEIGHT_FACTOR;
    LabelBlock {
        lines,
        width,
        height,
    }
}

/// Flattens `root` into pre-order and sizes each node. Positions start at the origin;
/// inherited attributes start unset.
pub fn build_layout_tree(
    root: &Node,
    config: &RoadmapConfig,
    measurer: Option<&dyn TextMeasurer>,
) -> LayoutTree {
    let mut nodes: Vec<LayoutNode> = Vec::with_capacity(root.count());
    let mut stack: Vec<(&Node, Option<usize>, usize)> = vec![(root, None, 0)];

    while let Some((node, parent, depth)) = stack.pop() {
        let id = nodes.len();
        if let Some(p) = parent {
            nodes[p].children.push(id);
        }

        let scale = depth_scale(depth);
        let label = measure_label(&node.name, config, measurer);
        let pad_x = 2.0 * NODE_PADDING_X * config.node_scale;
        let pad_y = 2.0 * NODE_PADDING_Y * config.node_scale;
        let node_width = (label.width + pad_x).max(MIN_NODE_WIDTH * config.node_scale) * scale;
        let node_height = (label.height + pad_y).max(MIN_NODE_HEIGHT * config.node_scale) * scale;

        nodes.push(LayoutNode {
            id,
            name: node.name.clone(),
            status: node.status,
            link: node.link.clone(),
            category: node.category.clone(),
            side: node.side,
            visibility: node.visibility.clone(),
            depth,
            x: 0.0,
            y: 0.0,
            node_width,
            node_height,
            depth_scale: scale,
            font_size: BASE_FONT_SIZE * config.text_scale * scale,
            label_lines: label.lines,
            inherited_category: None,
            inherited_side: None,
            inherited_visibility: None,
            color: String::new(),
            parent,
            children: Vec::new(),
        });

        for child in node.children.iter().rev() {
            stack.push((child, Some(id), depth + 1));
        }
    }

    LayoutTree { nodes }
}
