use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which attribute drives node coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorMode {
    #[default]
    Status,
    Visibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoadmapConfig {
    /// Cross-axis distance (px) for a sibling separation of `1.0`.
    pub node_spacing_vertical: f64,
    /// Depth-axis distance (px) between consecutive tree levels.
    pub node_spacing_horizontal: f64,
    pub node_scale: f64,
    pub text_scale: f64,
    pub edge_width: f64,
    /// Reserved; carried through for renderers but not read by the layout pipeline.
    pub stagger_offset: f64,
    pub hide_leaves: bool,
    pub color_mode: ColorMode,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            node_spacing_vertical: 200.0,
            node_spacing_horizontal: 1000.0,
            node_scale: 1.2,
            text_scale: 1.3,
            edge_width: 10.0,
            stagger_offset: 0.2,
            hide_leaves: false,
            color_mode: ColorMode::Status,
        }
    }
}

impl RoadmapConfig {
    /// Builds a config from a partial JSON object. Missing keys keep their defaults and unknown
    /// keys are ignored; `null` yields the defaults.
    pub fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        if !value.is_object() {
            return Err(Error::InvalidConfig {
                message: format!("expected an object, got {}", json_kind(value)),
            });
        }
        let cfg = Self::deserialize(value).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("nodeSpacingVertical", self.node_spacing_vertical),
            ("nodeSpacingHorizontal", self.node_spacing_horizontal),
            ("nodeScale", self.node_scale),
            ("textScale", self.text_scale),
        ];
        for (key, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::InvalidConfig {
                    message: format!("`{key}` must be a positive number, got {v}"),
                });
            }
        }
        if !(self.edge_width.is_finite() && self.edge_width >= 0.0) {
            return Err(Error::InvalidConfig {
                message: format!("`edgeWidth` must be non-negative, got {}", self.edge_width),
            });
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
