use crate::{Document, Node, ScalarImplicit, StructuralError, MAX_DEPTH};

/// Check that every document can be handed to the dumper.
///
/// Documents and nodes are visited depth-first in document order, and the
/// first fault found is reported.
pub fn validate(documents: &[Document]) -> Result<(), StructuralError> {
    for (index, document) in documents.iter().enumerate() {
        validate_document(index, document)?;
    }
    Ok(())
}

pub fn validate_document(index: usize, document: &Document) -> Result<(), StructuralError> {
    for (directive_index, directive) in document.tag_directives.iter().enumerate() {
        let reason = if directive.handle.is_empty() {
            "empty handle"
        } else if directive.prefix.is_empty() {
            "empty prefix"
        } else {
            continue;
        };
        return Err(StructuralError::TagDirectives {
            document: index,
            index: directive_index,
            reason,
        });
    }

    let mut path = String::from("root");
    NodeValidator {
        document: index,
        path: &mut path,
        depth: 0,
    }
    .validate(&document.root)
}

struct NodeValidator<'a> {
    document: usize,
    path: &'a mut String,
    /// Collections enclosing the node being checked.
    depth: usize,
}

impl NodeValidator<'_> {
    fn fail(&self, node: &Node, reason: &'static str) -> StructuralError {
        StructuralError::Node {
            document: self.document,
            path: self.path.clone(),
            kind: node.kind().name(),
            reason,
        }
    }

    fn validate(&mut self, node: &Node) -> Result<(), StructuralError> {
        if let Node::Alias(alias) = node {
            if alias.anchor.is_empty() {
                return Err(self.fail(node, "alias without anchor"));
            }
            return Ok(());
        }

        if node.anchor() == Some("") {
            return Err(self.fail(node, "empty anchor"));
        }
        if node.tag() == Some("") {
            return Err(self.fail(node, "empty tag"));
        }
        if matches!(node, Node::Sequence(_) | Node::Mapping(_)) && self.depth == MAX_DEPTH {
            return Err(self.fail(node, "nesting too deep"));
        }

        match node {
            Node::Scalar(scalar) => {
                if scalar.tag.is_none() && scalar.implicit == ScalarImplicit::None {
                    return Err(self.fail(node, "neither tag nor implicit flag"));
                }
                Ok(())
            }
            Node::Sequence(seq) => {
                for (i, item) in seq.items.iter().enumerate() {
                    self.child(format_args!("[{i}]"), item)?;
                }
                Ok(())
            }
            Node::Mapping(map) => {
                for (i, (key, value)) in map.pairs.iter().enumerate() {
                    self.child(format_args!("[{i}].key"), key)?;
                    self.child(format_args!("[{i}].value"), value)?;
                }
                Ok(())
            }
            Node::Alias(_) => Ok(()),
        }
    }

    fn child(
        &mut self,
        segment: std::fmt::Arguments<'_>,
        node: &Node,
    ) -> Result<(), StructuralError> {
        let len = self.path.len();
        self.path.push_str(&segment.to_string());
        self.depth += 1;
        let result = self.validate(node);
        self.depth -= 1;
        self.path.truncate(len);
        result
    }
}
