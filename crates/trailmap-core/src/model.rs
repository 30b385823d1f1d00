use serde::{Deserialize, Serialize};

/// Delivery status of a roadmap item. Parsed case-insensitively from free text; anything
/// unrecognized becomes [`Status::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Ready,
    Soon,
    NotStarted,
    WontDo,
    #[default]
    Default,
}

impl Status {
    pub fn parse(raw: &str) -> Self {
        // Accept `notStarted`, `not started`, `not-started`, `NOT_STARTED`, ...
        let key: String = raw
            .chars()
            .filter(|c| !(c.is_whitespace() || *c == '-' || *c == '_' || *c == '\''))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "ready" => Self::Ready,
            "soon" => Self::Soon,
            "notstarted" => Self::NotStarted,
            "wontdo" => Self::WontDo,
            _ => Self::Default,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Soon => "soon",
            Self::NotStarted => "notStarted",
            Self::WontDo => "wontDo",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// `-1.0` for [`Side::Left`], `1.0` for [`Side::Right`].
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Public,
    #[default]
    Internal,
}

impl Visibility {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "public" => Some(Self::Public),
            "internal" => Some(Self::Internal),
            _ => None,
        }
    }
}

/// Canonical roadmap item. The parent exclusively owns its children.
///
/// `category` and `visibility` keep the raw text the author wrote: both are inherited verbatim
/// by descendants and only interpreted at color-lookup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Default,
            link: None,
            category: None,
            side: None,
            visibility: None,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        let mut n = 0usize;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            n += 1;
            stack.extend(node.children.iter());
        }
        n
    }
}
