use crate::EventKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The YAML parser rejected the input while loading.
    #[error("load: error while parsing document: {0}")]
    Parse(#[source] libyaml_safer::Error),
    /// The YAML emitter rejected an event while dumping.
    #[error("dump: error while emitting document: {0}")]
    Emit(#[source] libyaml_safer::Error),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Structure(#[from] StructuralError),
    #[error("dump: emitter produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl PartialEq<GrammarError> for Error {
    fn eq(&self, other: &GrammarError) -> bool {
        if let Error::Grammar(err) = self {
            *err == *other
        } else {
            false
        }
    }
}

impl PartialEq<StructuralError> for Error {
    fn eq(&self, other: &StructuralError) -> bool {
        if let Error::Structure(err) = self {
            *err == *other
        } else {
            false
        }
    }
}

/// An event arrived where the stream grammar does not allow it, or opened a
/// collection past [`MAX_DEPTH`](crate::MAX_DEPTH).
///
/// The expected grammar is `StreamStart (DocumentStart Node DocumentEnd)*
/// StreamEnd`, where a node is a scalar, an alias, or a balanced
/// sequence/mapping start and end pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("unexpected {found} event, expected {expected}")]
    Unexpected {
        expected: &'static str,
        found: EventKind,
    },
    #[error("event stream ended early, expected {expected}")]
    Exhausted { expected: &'static str },
    #[error("collections nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// The part of a document tree that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralPart {
    Root,
    TagDirectives,
    Version,
    Node,
    ScalarValue,
}

/// A document tree has a shape that cannot be dumped.
///
/// `document` is the index of the offending document in the stream. Node
/// paths are written from the document root, e.g. `root[2].value`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("invalid document root in document {document}")]
    Root { document: usize },
    #[error("invalid tag directive {index} in document {document}: {reason}")]
    TagDirectives {
        document: usize,
        index: usize,
        reason: &'static str,
    },
    #[error("invalid version directive in document {document}: {reason}")]
    Version {
        document: usize,
        reason: &'static str,
    },
    #[error("invalid {kind} node at {path} in document {document}: {reason}")]
    Node {
        document: usize,
        path: String,
        kind: &'static str,
        reason: &'static str,
    },
    #[error("invalid scalar value at {path} in document {document}")]
    ScalarValue { document: usize, path: String },
}

impl StructuralError {
    pub fn part(&self) -> StructuralPart {
        match self {
            StructuralError::Root { .. } => StructuralPart::Root,
            StructuralError::TagDirectives { .. } => StructuralPart::TagDirectives,
            StructuralError::Version { .. } => StructuralPart::Version,
            StructuralError::Node { .. } => StructuralPart::Node,
            StructuralError::ScalarValue { .. } => StructuralPart::ScalarValue,
        }
    }

    pub fn document(&self) -> usize {
        match *self {
            StructuralError::Root { document }
            | StructuralError::TagDirectives { document, .. }
            | StructuralError::Version { document, .. }
            | StructuralError::Node { document, .. }
            | StructuralError::ScalarValue { document, .. } => document,
        }
    }
}

/// A non-fatal problem found while validating a loose document tree. The
/// dump continues with the fallback value named by the kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} in document {document} at {path}")]
pub struct Warning {
    pub document: usize,
    pub path: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum WarningKind {
    #[error("invalid document start implicit specifier, using false")]
    StartImplicit,
    #[error("invalid document end implicit specifier, using false")]
    EndImplicit,
    #[error("invalid node implicit specifier, using none")]
    NodeImplicit,
    #[error("invalid node style, using any")]
    NodeStyle,
}
