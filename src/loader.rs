use crate::{
    Alias, CollectionStyle, Document, Error, Event, EventSource, GrammarError, Mapping, Node,
    Scalar, ScalarImplicit, Sequence, TagDirective, VersionDirective, MAX_DEPTH, PLAIN_TAG,
};

/// Builds document trees from a stream of parse events.
///
/// Loading is all-or-nothing: the first source failure or out-of-place
/// event aborts the load and everything built so far is dropped.
pub struct Loader<S> {
    source: S,
    /// Collections currently open.
    depth: usize,
}

fn unexpected(expected: &'static str, event: &Event) -> Error {
    GrammarError::Unexpected {
        expected,
        found: event.kind(),
    }
    .into()
}

impl<S: EventSource> Loader<S> {
    pub fn new(source: S) -> Self {
        Self { source, depth: 0 }
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Consume the whole stream, from stream start to stream end.
    pub fn load(mut self) -> Result<Vec<Document>, Error> {
        let event = self.source.next_event()?;
        if event != Event::StreamStart {
            return Err(unexpected("stream start", &event));
        }

        let mut documents = Vec::new();
        loop {
            match self.source.next_event()? {
                Event::StreamEnd => break,
                Event::DocumentStart {
                    version,
                    tag_directives,
                    implicit,
                } => {
                    let document = self.load_document(version, tag_directives, implicit)?;
                    log::trace!("loaded document {}", documents.len());
                    documents.push(document);
                }
                event => return Err(unexpected("document start or stream end", &event)),
            }
        }

        log::debug!("loaded {} document(s)", documents.len());
        Ok(documents)
    }

    fn load_document(
        &mut self,
        version: Option<VersionDirective>,
        tag_directives: Vec<TagDirective>,
        start_implicit: bool,
    ) -> Result<Document, Error> {
        let event = self.source.next_event()?;
        let root = self.load_node(event)?;

        let end_implicit = match self.source.next_event()? {
            Event::DocumentEnd { implicit } => implicit,
            event => return Err(unexpected("document end", &event)),
        };

        Ok(Document {
            root,
            version,
            tag_directives,
            start_implicit,
            end_implicit,
        })
    }

    /// Build the node that begins with `event`, pulling the rest of its
    /// subtree from the source.
    fn load_node(&mut self, event: Event) -> Result<Node, Error> {
        match event {
            Event::Scalar {
                tag,
                anchor,
                value,
                style,
                plain_implicit,
                quoted_implicit,
            } => Ok(Node::Scalar(Scalar {
                tag: Some(tag.unwrap_or_else(|| Scalar::default_tag(style).to_owned())),
                implicit: ScalarImplicit::from_flags(plain_implicit, quoted_implicit),
                anchor,
                value,
                style,
            })),
            Event::Alias { anchor } => Ok(Node::Alias(Alias { anchor })),
            Event::SequenceStart {
                tag,
                anchor,
                implicit,
                style,
            } => self.load_sequence(tag, anchor, implicit, style),
            Event::MappingStart {
                tag,
                anchor,
                implicit,
                style,
            } => self.load_mapping(tag, anchor, implicit, style),
            event => Err(unexpected("node", &event)),
        }
    }

    fn enter(&mut self) -> Result<(), Error> {
        if self.depth == MAX_DEPTH {
            return Err(GrammarError::TooDeep { limit: MAX_DEPTH }.into());
        }
        self.depth += 1;
        Ok(())
    }

    fn load_sequence(
        &mut self,
        tag: Option<String>,
        anchor: Option<String>,
        implicit: bool,
        style: CollectionStyle,
    ) -> Result<Node, Error> {
        self.enter()?;
        let mut items = Vec::new();
        loop {
            let event = self.source.next_event()?;
            if event == Event::SequenceEnd {
                break;
            }
            items.push(self.load_node(event)?);
        }
        self.depth -= 1;

        Ok(Node::Sequence(Sequence {
            items,
            tag: Some(tag.unwrap_or_else(|| PLAIN_TAG.to_owned())),
            anchor,
            implicit,
            style,
        }))
    }

    fn load_mapping(
        &mut self,
        tag: Option<String>,
        anchor: Option<String>,
        implicit: bool,
        style: CollectionStyle,
    ) -> Result<Node, Error> {
        self.enter()?;
        let mut pairs = Vec::new();
        loop {
            let event = self.source.next_event()?;
            if event == Event::MappingEnd {
                break;
            }
            let key = self.load_node(event)?;
            let event = self.source.next_event()?;
            let value = self.load_node(event)?;
            pairs.push((key, value));
        }
        self.depth -= 1;

        Ok(Node::Mapping(Mapping {
            pairs,
            tag: Some(tag.unwrap_or_else(|| PLAIN_TAG.to_owned())),
            anchor,
            implicit,
            style,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{EventKind, ScalarStyle};

    fn load_events(events: impl IntoIterator<Item = Event>) -> Result<Vec<Document>, Error> {
        Loader::new(events.into_iter().collect::<VecDeque<_>>()).load()
    }

    fn document(body: impl IntoIterator<Item = Event>) -> Vec<Event> {
        let mut events = vec![Event::StreamStart, Event::document_start(true)];
        events.extend(body);
        events.push(Event::document_end(true));
        events.push(Event::StreamEnd);
        events
    }

    #[test]
    fn empty_stream() {
        let docs = load_events([Event::StreamStart, Event::StreamEnd]).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn scalar_tags() {
        let docs = load_events(document([Event::Scalar {
            tag: None,
            anchor: Some("a".into()),
            value: "x".into(),
            style: ScalarStyle::SingleQuoted,
            plain_implicit: false,
            quoted_implicit: true,
        }]))
        .unwrap();
        assert_eq!(
            docs[0].root,
            Node::Scalar(Scalar {
                value: "x".into(),
                tag: Some("!".into()),
                implicit: ScalarImplicit::Quoted,
                anchor: Some("a".into()),
                style: ScalarStyle::SingleQuoted,
            })
        );

        let docs = load_events(document([Event::Scalar {
            tag: Some("tag:yaml.org,2002:int".into()),
            anchor: None,
            value: "1".into(),
            style: ScalarStyle::Plain,
            plain_implicit: false,
            quoted_implicit: false,
        }]))
        .unwrap();
        assert_eq!(docs[0].root.tag(), Some("tag:yaml.org,2002:int"));
    }

    #[test]
    fn collections_default_to_plain_tag() {
        let docs = load_events(document([
            Event::sequence_start(CollectionStyle::Flow),
            Event::mapping_start(CollectionStyle::Block),
            Event::plain("k"),
            Event::alias("v"),
            Event::MappingEnd,
            Event::SequenceEnd,
        ]))
        .unwrap();
        let expected = Node::seq([Node::mapping([(Node::plain("k"), Node::alias("v"))])])
            .with_style(CollectionStyle::Flow);
        assert_eq!(docs[0].root, expected);
        assert_eq!(docs[0].root.tag(), Some("?"));
    }

    #[test]
    fn document_metadata() {
        let docs = load_events([
            Event::StreamStart,
            Event::DocumentStart {
                version: Some(VersionDirective { major: 1, minor: 2 }),
                tag_directives: vec![TagDirective::new("!e!", "tag:e.com:")],
                implicit: false,
            },
            Event::plain("a"),
            Event::document_end(false),
            Event::StreamEnd,
        ])
        .unwrap();
        assert_eq!(
            docs,
            [Document::new(Node::plain("a"))
                .with_version(1, 2)
                .with_tag_directive("!e!", "tag:e.com:")
                .with_markers(false, false)]
        );
    }

    #[test]
    fn missing_stream_start() {
        let err = load_events([Event::document_start(true)]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::Unexpected {
                expected: "stream start",
                found: EventKind::DocumentStart,
            }
        );
    }

    #[test]
    fn mapping_missing_value() {
        let err = load_events(document([
            Event::mapping_start(CollectionStyle::Block),
            Event::plain("k"),
            Event::MappingEnd,
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            GrammarError::Unexpected {
                expected: "node",
                found: EventKind::MappingEnd,
            }
        );
    }

    #[test]
    fn two_roots() {
        let err = load_events(document([Event::plain("a"), Event::plain("b")])).unwrap_err();
        assert_eq!(
            err,
            GrammarError::Unexpected {
                expected: "document end",
                found: EventKind::Scalar,
            }
        );
    }

    #[test]
    fn nesting_limit() {
        let nested = |depth: usize| {
            let mut events = vec![Event::StreamStart, Event::document_start(true)];
            events.extend((0..depth).map(|_| Event::sequence_start(CollectionStyle::Flow)));
            events.extend((0..depth).map(|_| Event::SequenceEnd));
            events.push(Event::document_end(true));
            events.push(Event::StreamEnd);
            events
        };

        let docs = load_events(nested(MAX_DEPTH)).unwrap();
        assert_eq!(docs.len(), 1);

        let err = load_events(nested(50_000)).unwrap_err();
        assert_eq!(err, GrammarError::TooDeep { limit: MAX_DEPTH });
    }

    #[test]
    fn truncated_stream() {
        let err = load_events([
            Event::StreamStart,
            Event::document_start(true),
            Event::sequence_start(CollectionStyle::Block),
            Event::plain("a"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Grammar(GrammarError::Exhausted { .. })));
    }
}
