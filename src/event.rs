use std::collections::VecDeque;

use crate::{
    CollectionStyle, Error, GrammarError, ScalarImplicit, ScalarStyle, TagDirective,
    VersionDirective,
};

/// A low-level YAML parse or emit event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    StreamStart,
    StreamEnd,
    DocumentStart {
        version: Option<VersionDirective>,
        tag_directives: Vec<TagDirective>,
        implicit: bool,
    },
    DocumentEnd {
        implicit: bool,
    },
    /// A reference to a previously anchored node.
    Alias {
        anchor: String,
    },
    Scalar {
        tag: Option<String>,
        anchor: Option<String>,
        value: String,
        style: ScalarStyle,
        /// The tag may be omitted for the plain style.
        plain_implicit: bool,
        /// The tag may be omitted for any non-plain style.
        quoted_implicit: bool,
    },
    SequenceStart {
        tag: Option<String>,
        anchor: Option<String>,
        implicit: bool,
        style: CollectionStyle,
    },
    SequenceEnd,
    MappingStart {
        tag: Option<String>,
        anchor: Option<String>,
        implicit: bool,
        style: CollectionStyle,
    },
    MappingEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    Alias,
    Scalar,
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EventKind::StreamStart => "stream start",
            EventKind::StreamEnd => "stream end",
            EventKind::DocumentStart => "document start",
            EventKind::DocumentEnd => "document end",
            EventKind::Alias => "alias",
            EventKind::Scalar => "scalar",
            EventKind::SequenceStart => "sequence start",
            EventKind::SequenceEnd => "sequence end",
            EventKind::MappingStart => "mapping start",
            EventKind::MappingEnd => "mapping end",
        })
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StreamStart => EventKind::StreamStart,
            Event::StreamEnd => EventKind::StreamEnd,
            Event::DocumentStart { .. } => EventKind::DocumentStart,
            Event::DocumentEnd { .. } => EventKind::DocumentEnd,
            Event::Alias { .. } => EventKind::Alias,
            Event::Scalar { .. } => EventKind::Scalar,
            Event::SequenceStart { .. } => EventKind::SequenceStart,
            Event::SequenceEnd => EventKind::SequenceEnd,
            Event::MappingStart { .. } => EventKind::MappingStart,
            Event::MappingEnd => EventKind::MappingEnd,
        }
    }

    /// A document start without directives.
    #[inline]
    pub fn document_start(implicit: bool) -> Self {
        Event::DocumentStart {
            version: None,
            tag_directives: vec![],
            implicit,
        }
    }

    #[inline]
    pub fn document_end(implicit: bool) -> Self {
        Event::DocumentEnd { implicit }
    }

    /// An untagged plain scalar, as the parser reports `value` written bare.
    #[inline]
    pub fn plain(value: &str) -> Self {
        Self::scalar(value, ScalarStyle::Plain, ScalarImplicit::Plain)
    }

    /// An untagged double-quoted scalar.
    #[inline]
    pub fn quoted(value: &str) -> Self {
        Self::scalar(value, ScalarStyle::DoubleQuoted, ScalarImplicit::Quoted)
    }

    pub fn scalar(value: &str, style: ScalarStyle, implicit: ScalarImplicit) -> Self {
        let (plain_implicit, quoted_implicit) = implicit.flags();
        Event::Scalar {
            tag: None,
            anchor: None,
            value: value.to_owned(),
            style,
            plain_implicit,
            quoted_implicit,
        }
    }

    #[inline]
    pub fn alias(anchor: &str) -> Self {
        Event::Alias {
            anchor: anchor.to_owned(),
        }
    }

    /// An untagged sequence start.
    #[inline]
    pub fn sequence_start(style: CollectionStyle) -> Self {
        Event::SequenceStart {
            tag: None,
            anchor: None,
            implicit: true,
            style,
        }
    }

    /// An untagged mapping start.
    #[inline]
    pub fn mapping_start(style: CollectionStyle) -> Self {
        Event::MappingStart {
            tag: None,
            anchor: None,
            implicit: true,
            style,
        }
    }
}

/// Pull side of the event stream.
pub trait EventSource {
    fn next_event(&mut self) -> Result<Event, Error>;
}

/// Push side of the event stream.
pub trait EventSink {
    fn emit_event(&mut self, event: Event) -> Result<(), Error>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    #[inline]
    fn next_event(&mut self) -> Result<Event, Error> {
        (**self).next_event()
    }
}

impl<K: EventSink + ?Sized> EventSink for &mut K {
    #[inline]
    fn emit_event(&mut self, event: Event) -> Result<(), Error> {
        (**self).emit_event(event)
    }
}

/// A prepared list of events. Running dry before the stream end is a grammar
/// error.
impl EventSource for VecDeque<Event> {
    fn next_event(&mut self) -> Result<Event, Error> {
        self.pop_front().ok_or_else(|| {
            GrammarError::Exhausted {
                expected: "stream end",
            }
            .into()
        })
    }
}

/// Records every emitted event.
impl EventSink for Vec<Event> {
    #[inline]
    fn emit_event(&mut self, event: Event) -> Result<(), Error> {
        self.push(event);
        Ok(())
    }
}
