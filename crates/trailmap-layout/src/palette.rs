//! Status / visibility color lookup. The palette is an immutable value handed in through
//! [`crate::LayoutOptions`], so hosts and tests can swap it freely.

use crate::model::{LayoutNode, LayoutTree};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use trailmap_core::{ColorMode, Status, Visibility};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub status: IndexMap<Status, String>,
    pub visibility: IndexMap<Visibility, String>,
    /// Used for anything the maps above do not cover.
    pub default_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        let status = [
            (Status::Ready, "#2e7d32"),
            (Status::Soon, "#f9a825"),
            (Status::NotStarted, "#9e9e9e"),
            (Status::WontDo, "#c62828"),
        ];
        let visibility = [
            (Visibility::Public, "#1565c0"),
            (Visibility::Internal, "#6a1b9a"),
        ];
        Self {
            status: status
                .into_iter()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
            visibility: visibility
                .into_iter()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
            default_color: "#607d8b".to_string(),
        }
    }
}

impl Palette {
    pub fn status_color(&self, status: Status) -> &str {
        self.status
            .get(&status)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    /// Missing visibility means `internal`; an unrecognized value gets the default color.
    pub fn visibility_color(&self, raw: Option<&str>) -> &str {
        let visibility = match raw {
            None => Some(Visibility::default()),
            Some(raw) => Visibility::parse(raw),
        };
        visibility
            .and_then(|v| self.visibility.get(&v))
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    pub fn color_for(&self, node: &LayoutNode, mode: ColorMode) -> &str {
        match mode {
            ColorMode::Status => self.status_color(node.status),
            ColorMode::Visibility => self.visibility_color(node.inherited_visibility.as_deref()),
        }
    }
}

pub fn assign_colors(tree: &mut LayoutTree, palette: &Palette, mode: ColorMode) {
    for node in tree.nodes.iter_mut() {
        node.color = palette.color_for(node, mode).to_string();
    }
}
