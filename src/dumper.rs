use crate::{
    Document, Error, Event, EventSink, GrammarError, Mapping, Node, Scalar, ScalarImplicit,
    ScalarStyle, Sequence, MAX_DEPTH, NON_SPECIFIC_TAG,
};

/// Walks document trees and emits the matching events, the reverse of
/// [`Loader`](crate::Loader).
///
/// The dumper assumes the documents have passed [`validate`](crate::validate);
/// anything the sink still rejects aborts the dump, as does collection
/// nesting past [`MAX_DEPTH`].
pub struct Dumper<K> {
    sink: K,
    depth: usize,
}

impl<K: EventSink> Dumper<K> {
    pub fn new(sink: K) -> Self {
        Self { sink, depth: 0 }
    }

    pub fn into_inner(self) -> K {
        self.sink
    }

    /// Emit a complete stream holding `documents`.
    pub fn dump(&mut self, documents: &[Document]) -> Result<(), Error> {
        self.sink.emit_event(Event::StreamStart)?;
        for (index, document) in documents.iter().enumerate() {
            self.dump_document(document)?;
            log::trace!("dumped document {index}");
        }
        self.sink.emit_event(Event::StreamEnd)
    }

    pub fn dump_document(&mut self, document: &Document) -> Result<(), Error> {
        self.depth = 0;
        self.sink.emit_event(Event::DocumentStart {
            version: document.version,
            tag_directives: document.tag_directives.clone(),
            implicit: document.start_implicit,
        })?;
        self.dump_node(&document.root)?;
        self.sink.emit_event(Event::DocumentEnd {
            implicit: document.end_implicit,
        })
    }

    fn dump_node(&mut self, node: &Node) -> Result<(), Error> {
        match node {
            Node::Scalar(scalar) => self.dump_scalar(scalar),
            Node::Sequence(seq) => self.dump_sequence(seq),
            Node::Mapping(map) => self.dump_mapping(map),
            Node::Alias(alias) => self.sink.emit_event(Event::Alias {
                anchor: alias.anchor.clone(),
            }),
        }
    }

    fn dump_scalar(&mut self, scalar: &Scalar) -> Result<(), Error> {
        // A plain scalar keeps an explicit `!` only if the tag is written out.
        let implicit = if scalar.style == ScalarStyle::Plain
            && scalar.tag.as_deref() == Some(NON_SPECIFIC_TAG)
        {
            ScalarImplicit::None
        } else {
            scalar.implicit
        };
        let (plain_implicit, quoted_implicit) = implicit.flags();
        self.sink.emit_event(Event::Scalar {
            tag: scalar.tag.clone(),
            anchor: scalar.anchor.clone(),
            value: scalar.value.clone(),
            style: scalar.style,
            plain_implicit,
            quoted_implicit,
        })
    }

    fn enter(&mut self) -> Result<(), Error> {
        if self.depth == MAX_DEPTH {
            return Err(GrammarError::TooDeep { limit: MAX_DEPTH }.into());
        }
        self.depth += 1;
        Ok(())
    }

    fn dump_sequence(&mut self, seq: &Sequence) -> Result<(), Error> {
        self.enter()?;
        self.sink.emit_event(Event::SequenceStart {
            tag: seq.tag.clone(),
            anchor: seq.anchor.clone(),
            implicit: seq.implicit,
            style: seq.style,
        })?;
        for item in &seq.items {
            self.dump_node(item)?;
        }
        self.depth -= 1;
        self.sink.emit_event(Event::SequenceEnd)
    }

    fn dump_mapping(&mut self, map: &Mapping) -> Result<(), Error> {
        self.enter()?;
        self.sink.emit_event(Event::MappingStart {
            tag: map.tag.clone(),
            anchor: map.anchor.clone(),
            implicit: map.implicit,
            style: map.style,
        })?;
        for (key, value) in &map.pairs {
            self.dump_node(key)?;
            self.dump_node(value)?;
        }
        self.depth -= 1;
        self.sink.emit_event(Event::MappingEnd)
    }
}
