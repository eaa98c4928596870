use std::io::BufRead;

use crate::{Error, Node};

/// One document of a YAML stream: a root node and the document-level
/// metadata needed to write it back the way it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    pub root: Node,
    /// The `%YAML` directive, if present.
    pub version: Option<VersionDirective>,
    /// `%TAG` directives in source order.
    pub tag_directives: Vec<TagDirective>,
    /// The `---` marker was omitted.
    pub start_implicit: bool,
    /// The `...` marker was omitted.
    pub end_implicit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionDirective {
    pub major: i32,
    pub minor: i32,
}

/// Maps a tag handle such as `!!` to a URI prefix. Both parts are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagDirective {
    pub handle: String,
    pub prefix: String,
}

impl TagDirective {
    #[inline]
    pub fn new(handle: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            prefix: prefix.into(),
        }
    }
}

impl Document {
    /// A document with implicit start and end markers and no directives.
    pub fn new(root: Node) -> Self {
        Self {
            root,
            version: None,
            tag_directives: vec![],
            start_implicit: true,
            end_implicit: true,
        }
    }

    #[inline]
    pub fn with_version(self, major: i32, minor: i32) -> Self {
        Self {
            version: Some(VersionDirective { major, minor }),
            ..self
        }
    }

    pub fn with_tag_directive(
        mut self,
        handle: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        self.tag_directives.push(TagDirective::new(handle, prefix));
        self
    }

    /// Set whether the `---` and `...` markers are omitted.
    #[inline]
    pub fn with_markers(self, start_implicit: bool, end_implicit: bool) -> Self {
        Self {
            start_implicit,
            end_implicit,
            ..self
        }
    }

    /// Parse every document in a YAML stream.
    #[inline]
    pub fn load_all(yaml: &str) -> Result<Vec<Document>, Error> {
        crate::load(yaml)
    }

    #[inline]
    pub fn load_all_from_reader(reader: &mut dyn BufRead) -> Result<Vec<Document>, Error> {
        crate::load_from_reader(reader)
    }
}
