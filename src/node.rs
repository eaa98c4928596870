use crate::{Scalar, PLAIN_TAG};

/// The deepest collection nesting that loading, checking and dumping accept.
/// Trees are walked recursively, so deeper input is refused up front.
pub const MAX_DEPTH: usize = 128;

/// One value in a document tree.
///
/// The tree is strict: every node is owned by exactly one parent. Aliases
/// refer to anchored nodes by name only and are never resolved here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Sequence),
    Mapping(Mapping),
    Alias(Alias),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    pub items: Vec<Node>,
    /// Explicit tag, or [`PLAIN_TAG`] when the source had none.
    pub tag: Option<String>,
    pub anchor: Option<String>,
    /// Whether the tag may be omitted when writing.
    pub implicit: bool,
    pub style: CollectionStyle,
}

/// Key/value pairs in the order they were encountered. Keys may repeat and
/// need not be scalars.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mapping {
    pub pairs: Vec<(Node, Node)>,
    pub tag: Option<String>,
    pub anchor: Option<String>,
    pub implicit: bool,
    pub style: CollectionStyle,
}

/// A reference to an anchor defined elsewhere in the same document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alias {
    pub anchor: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionStyle {
    #[default]
    Any,
    /// Indentation-based layout.
    Block,
    /// `[...]` or `{...}`.
    Flow,
}

impl CollectionStyle {
    pub fn name(self) -> &'static str {
        match self {
            CollectionStyle::Any => "any",
            CollectionStyle::Block => "block",
            CollectionStyle::Flow => "flow",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "any" => CollectionStyle::Any,
            "block" => CollectionStyle::Block,
            "flow" => CollectionStyle::Flow,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
    Alias,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
            NodeKind::Alias => "alias",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "scalar" => NodeKind::Scalar,
            "sequence" => NodeKind::Sequence,
            "mapping" => NodeKind::Mapping,
            "alias" => NodeKind::Alias,
            _ => return None,
        })
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    #[inline]
    pub fn plain(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::plain(value))
    }

    #[inline]
    pub fn quoted(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::quoted(value))
    }

    /// A block sequence without an explicit tag.
    pub fn seq(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Sequence(Sequence {
            items: items.into_iter().collect(),
            tag: Some(PLAIN_TAG.to_owned()),
            anchor: None,
            implicit: true,
            style: CollectionStyle::Block,
        })
    }

    /// A block mapping without an explicit tag.
    pub fn mapping(pairs: impl IntoIterator<Item = (Node, Node)>) -> Self {
        Node::Mapping(Mapping {
            pairs: pairs.into_iter().collect(),
            tag: Some(PLAIN_TAG.to_owned()),
            anchor: None,
            implicit: true,
            style: CollectionStyle::Block,
        })
    }

    #[inline]
    pub fn alias(anchor: impl Into<String>) -> Self {
        Node::Alias(Alias {
            anchor: anchor.into(),
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Alias(_) => NodeKind::Alias,
        }
    }

    /// The anchor defined on this node, or referenced by it for an alias.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Node::Scalar(scalar) => scalar.anchor.as_deref(),
            Node::Sequence(seq) => seq.anchor.as_deref(),
            Node::Mapping(map) => map.anchor.as_deref(),
            Node::Alias(alias) => Some(&alias.anchor),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Scalar(scalar) => scalar.tag.as_deref(),
            Node::Sequence(seq) => seq.tag.as_deref(),
            Node::Mapping(map) => map.tag.as_deref(),
            Node::Alias(_) => None,
        }
    }

    /// Set the anchor. Aliases are left alone, their anchor is a reference.
    pub fn with_anchor(self, anchor: impl Into<String>) -> Self {
        let anchor = Some(anchor.into());
        match self {
            Node::Scalar(scalar) => Node::Scalar(Scalar { anchor, ..scalar }),
            Node::Sequence(seq) => Node::Sequence(Sequence { anchor, ..seq }),
            Node::Mapping(map) => Node::Mapping(Mapping { anchor, ..map }),
            alias @ Node::Alias(_) => alias,
        }
    }

    /// Set an explicit tag that must be written.
    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        match self {
            Node::Scalar(scalar) => Node::Scalar(scalar.with_tag(tag)),
            Node::Sequence(seq) => Node::Sequence(Sequence {
                tag: Some(tag.into()),
                implicit: false,
                ..seq
            }),
            Node::Mapping(map) => Node::Mapping(Mapping {
                tag: Some(tag.into()),
                implicit: false,
                ..map
            }),
            alias @ Node::Alias(_) => alias,
        }
    }

    /// Set the layout of a collection. Other nodes are left alone.
    pub fn with_style(self, style: CollectionStyle) -> Self {
        match self {
            Node::Sequence(seq) => Node::Sequence(Sequence { style, ..seq }),
            Node::Mapping(map) => Node::Mapping(Mapping { style, ..map }),
            other => other,
        }
    }

    #[inline]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        if let Node::Scalar(scalar) = self {
            Some(scalar)
        } else {
            None
        }
    }
}

impl From<Scalar> for Node {
    #[inline]
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors() {
        let node = Node::plain("foo").with_anchor("x");
        assert_eq!(node.anchor(), Some("x"));
        assert_eq!(Node::alias("x").anchor(), Some("x"));
        assert_eq!(Node::alias("x").with_anchor("y"), Node::alias("x"));
    }

    #[test]
    fn explicit_tags_are_not_implicit() {
        let Node::Mapping(map) = Node::mapping([]).with_tag("!custom") else {
            panic!("expected a mapping");
        };
        assert_eq!(map.tag.as_deref(), Some("!custom"));
        assert!(!map.implicit);
    }

    #[test]
    fn kind_names() {
        for kind in [
            NodeKind::Scalar,
            NodeKind::Sequence,
            NodeKind::Mapping,
            NodeKind::Alias,
        ] {
            assert_eq!(NodeKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(Node::seq([]).kind(), NodeKind::Sequence);
    }
}
