//! The loose form of a document tree, as it arrives from outside the crate.
//!
//! Host data (JSON, a scripting environment's structs, ...) cannot promise the
//! shapes that [`Document`] and [`Node`] enforce, so it is first described
//! with these types and then checked on the way in. Fields are named after the
//! data model: a node's variant lives in `type`, and a mapping's `value` is a
//! flat list alternating keys and values.

use crate::{
    Alias, CollectionStyle, Document, Mapping, Node, NodeKind, Scalar, ScalarImplicit,
    ScalarStyle, Sequence, StructuralError, TagDirective, VersionDirective, Warning, WarningKind,
    MAX_DEPTH,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawDocument {
    #[cfg_attr(feature = "serde", serde(default))]
    pub root: Option<RawNode>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub version: Option<Vec<i64>>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub tag_directives: Vec<RawTagDirective>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_implicit: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub end_implicit: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawTagDirective {
    pub handle: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawNode {
    /// `scalar`, `sequence`, `mapping` or `alias`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub value: Option<RawValue>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub tag: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub anchor: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub implicit: Option<RawFlag>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawValue {
    Text(String),
    Nodes(Vec<RawNode>),
}

/// An implicit marker: a boolean for collections, or one of `none`, `plain`
/// and `quoted` for scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawFlag {
    Bool(bool),
    Name(String),
}

impl RawNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind: kind.name().to_owned(),
            ..Self::default()
        }
    }
}

impl From<&Document> for RawDocument {
    fn from(document: &Document) -> Self {
        Self {
            root: Some(RawNode::from(&document.root)),
            version: document
                .version
                .map(|v| vec![i64::from(v.major), i64::from(v.minor)]),
            tag_directives: document
                .tag_directives
                .iter()
                .map(|d| RawTagDirective {
                    handle: d.handle.clone(),
                    prefix: d.prefix.clone(),
                })
                .collect(),
            start_implicit: Some(document.start_implicit),
            end_implicit: Some(document.end_implicit),
        }
    }
}

impl From<&Node> for RawNode {
    fn from(node: &Node) -> Self {
        match node {
            Node::Scalar(scalar) => RawNode {
                value: Some(RawValue::Text(scalar.value.clone())),
                tag: scalar.tag.clone(),
                anchor: scalar.anchor.clone(),
                implicit: Some(RawFlag::Name(scalar.implicit.name().to_owned())),
                style: Some(scalar.style.name().to_owned()),
                ..RawNode::new(NodeKind::Scalar)
            },
            Node::Sequence(seq) => RawNode {
                value: Some(RawValue::Nodes(seq.items.iter().map(RawNode::from).collect())),
                tag: seq.tag.clone(),
                anchor: seq.anchor.clone(),
                implicit: Some(RawFlag::Bool(seq.implicit)),
                style: Some(seq.style.name().to_owned()),
                ..RawNode::new(NodeKind::Sequence)
            },
            Node::Mapping(map) => RawNode {
                value: Some(RawValue::Nodes(
                    map.pairs
                        .iter()
                        .flat_map(|(key, value)| [RawNode::from(key), RawNode::from(value)])
                        .collect(),
                )),
                tag: map.tag.clone(),
                anchor: map.anchor.clone(),
                implicit: Some(RawFlag::Bool(map.implicit)),
                style: Some(map.style.name().to_owned()),
                ..RawNode::new(NodeKind::Mapping)
            },
            Node::Alias(alias) => RawNode {
                anchor: Some(alias.anchor.clone()),
                ..RawNode::new(NodeKind::Alias)
            },
        }
    }
}

/// Check and convert a whole stream of loose documents.
///
/// Documents are checked in order, each one fully before the next, and the
/// first structural fault aborts the conversion. Missing or unrecognised
/// style and implicit markers only produce a [`Warning`] and fall back to a
/// default.
pub fn documents_from_raw(
    documents: Vec<RawDocument>,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<Document>, StructuralError> {
    documents
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_document(index, warnings))
        .collect()
}

impl RawDocument {
    /// Check and convert one document. `index` is its position in the stream,
    /// used in errors and warnings.
    pub fn into_document(
        self,
        index: usize,
        warnings: &mut Vec<Warning>,
    ) -> Result<Document, StructuralError> {
        let Some(root) = self.root else {
            return Err(StructuralError::Root { document: index });
        };

        let mut tag_directives = Vec::with_capacity(self.tag_directives.len());
        for (directive_index, directive) in self.tag_directives.into_iter().enumerate() {
            let reason = if directive.handle.is_empty() {
                "empty handle"
            } else if directive.prefix.is_empty() {
                "empty prefix"
            } else {
                tag_directives.push(TagDirective {
                    handle: directive.handle,
                    prefix: directive.prefix,
                });
                continue;
            };
            return Err(StructuralError::TagDirectives {
                document: index,
                index: directive_index,
                reason,
            });
        }

        let version = self
            .version
            .map(|version| version_directive(index, &version))
            .transpose()?;

        let mut converter = Converter {
            document: index,
            path: String::from("root"),
            depth: 0,
            warnings,
        };
        let start_implicit =
            converter.document_marker(self.start_implicit, WarningKind::StartImplicit);
        let end_implicit = converter.document_marker(self.end_implicit, WarningKind::EndImplicit);
        let root = converter.convert(root)?;

        Ok(Document {
            root,
            version,
            tag_directives,
            start_implicit,
            end_implicit,
        })
    }
}

fn version_directive(
    document: usize,
    version: &[i64],
) -> Result<VersionDirective, StructuralError> {
    let &[major, minor] = version else {
        return Err(StructuralError::Version {
            document,
            reason: "expected exactly 2 integers",
        });
    };
    match (i32::try_from(major), i32::try_from(minor)) {
        (Ok(major), Ok(minor)) => Ok(VersionDirective { major, minor }),
        _ => Err(StructuralError::Version {
            document,
            reason: "version number out of range",
        }),
    }
}

struct Converter<'w> {
    document: usize,
    path: String,
    /// Collections enclosing the node being converted.
    depth: usize,
    warnings: &'w mut Vec<Warning>,
}

impl Converter<'_> {
    fn warn(&mut self, kind: WarningKind) {
        let warning = Warning {
            document: self.document,
            path: self.path.clone(),
            kind,
        };
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    fn document_marker(&mut self, marker: Option<bool>, kind: WarningKind) -> bool {
        marker.unwrap_or_else(|| {
            self.warn(kind);
            false
        })
    }

    fn fail(&self, kind: &'static str, reason: &'static str) -> StructuralError {
        StructuralError::Node {
            document: self.document,
            path: self.path.clone(),
            kind,
            reason,
        }
    }

    fn convert(&mut self, raw: RawNode) -> Result<Node, StructuralError> {
        let Some(kind) = NodeKind::from_name(&raw.kind) else {
            return Err(self.fail("node", "unknown node type"));
        };

        // Empty strings stand for absent tags and anchors.
        let tag = raw.tag.filter(|tag| !tag.is_empty());
        let anchor = raw.anchor.filter(|anchor| !anchor.is_empty());

        match kind {
            NodeKind::Alias => match anchor {
                Some(anchor) => Ok(Node::Alias(Alias { anchor })),
                None => Err(self.fail(kind.name(), "alias without anchor")),
            },
            NodeKind::Scalar => {
                let Some(RawValue::Text(value)) = raw.value else {
                    return Err(StructuralError::ScalarValue {
                        document: self.document,
                        path: self.path.clone(),
                    });
                };
                let implicit = match raw.implicit {
                    Some(RawFlag::Name(ref name)) => ScalarImplicit::from_name(name),
                    Some(RawFlag::Bool(false)) => Some(ScalarImplicit::None),
                    _ => None,
                }
                .unwrap_or_else(|| {
                    self.warn(WarningKind::NodeImplicit);
                    ScalarImplicit::None
                });
                let style = raw
                    .style
                    .as_deref()
                    .and_then(ScalarStyle::from_name)
                    .unwrap_or_else(|| {
                        self.warn(WarningKind::NodeStyle);
                        ScalarStyle::Any
                    });
                Ok(Node::Scalar(Scalar {
                    value,
                    tag,
                    implicit,
                    anchor,
                    style,
                }))
            }
            NodeKind::Sequence | NodeKind::Mapping => {
                let children = match raw.value {
                    None => vec![],
                    Some(RawValue::Nodes(nodes)) => nodes,
                    Some(RawValue::Text(_)) => {
                        return Err(self.fail(kind.name(), "value is not a list of nodes"))
                    }
                };
                if self.depth == MAX_DEPTH {
                    return Err(self.fail(kind.name(), "nesting too deep"));
                }
                if kind == NodeKind::Mapping && children.len() % 2 != 0 {
                    return Err(self.fail(kind.name(), "odd number of key/value nodes"));
                }
                let implicit = match raw.implicit {
                    Some(RawFlag::Bool(implicit)) => implicit,
                    _ => {
                        self.warn(WarningKind::NodeImplicit);
                        false
                    }
                };
                let style = raw
                    .style
                    .as_deref()
                    .and_then(CollectionStyle::from_name)
                    .unwrap_or_else(|| {
                        self.warn(WarningKind::NodeStyle);
                        CollectionStyle::Any
                    });

                if kind == NodeKind::Sequence {
                    let mut items = Vec::with_capacity(children.len());
                    for (i, child) in children.into_iter().enumerate() {
                        items.push(self.child(format_args!("[{i}]"), child)?);
                    }
                    Ok(Node::Sequence(Sequence {
                        items,
                        tag,
                        anchor,
                        implicit,
                        style,
                    }))
                } else {
                    let mut pairs = Vec::with_capacity(children.len() / 2);
                    let mut children = children.into_iter();
                    let mut i = 0;
                    while let (Some(key), Some(value)) = (children.next(), children.next()) {
                        let key = self.child(format_args!("[{i}].key"), key)?;
                        let value = self.child(format_args!("[{i}].value"), value)?;
                        pairs.push((key, value));
                        i += 1;
                    }
                    Ok(Node::Mapping(Mapping {
                        pairs,
                        tag,
                        anchor,
                        implicit,
                        style,
                    }))
                }
            }
        }
    }

    fn child(
        &mut self,
        segment: std::fmt::Arguments<'_>,
        raw: RawNode,
    ) -> Result<Node, StructuralError> {
        let len = self.path.len();
        self.path.push_str(&segment.to_string());
        self.depth += 1;
        let result = self.convert(raw);
        self.depth -= 1;
        self.path.truncate(len);
        result
    }
}
