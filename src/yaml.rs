//! The two public operations, wired to the `libyaml-safer` parser and
//! emitter.
//!
//! Every call owns its own parser or emitter and output buffer; nothing is
//! shared between calls, and an error drops all of it.

use std::io::BufRead;

use libyaml_safer as libyaml;

use crate::{
    documents_from_raw, validate, CollectionStyle, Document, DumpOptions, Dumper, Error, Event,
    EventSink, EventSource, Loader, RawDocument, ScalarStyle, TagDirective, VersionDirective,
    Warning,
};

/// Parse every document in `yaml`.
pub fn load(yaml: &str) -> Result<Vec<Document>, Error> {
    let mut input = yaml.as_bytes();
    load_from_reader(&mut input)
}

pub fn load_from_reader(mut reader: &mut dyn BufRead) -> Result<Vec<Document>, Error> {
    let mut parser = libyaml::Parser::new();
    parser.set_input(&mut reader);
    Loader::new(parser).load()
}

/// Write `documents` as a YAML stream with the default emitter settings.
#[inline]
pub fn dump(documents: &[Document]) -> Result<String, Error> {
    dump_with(documents, &DumpOptions::default())
}

pub fn dump_with(documents: &[Document], options: &DumpOptions) -> Result<String, Error> {
    validate(documents)?;

    let mut output = Vec::new();
    {
        let mut emitter = libyaml::Emitter::new();
        options.configure(&mut emitter);
        emitter.set_output(&mut output);
        Dumper::new(emitter).dump(documents)?;
    }

    log::debug!(
        "dumped {} document(s) into {} bytes",
        documents.len(),
        output.len()
    );
    Ok(String::from_utf8(output)?)
}

/// The result of dumping loose documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dumped {
    pub yaml: String,
    /// Problems that were patched over with a default value.
    pub warnings: Vec<Warning>,
}

/// Check loose documents and write them as a YAML stream.
pub fn dump_raw(documents: Vec<RawDocument>, options: &DumpOptions) -> Result<Dumped, Error> {
    let mut warnings = Vec::new();
    let documents = documents_from_raw(documents, &mut warnings)?;
    let yaml = dump_with(&documents, options)?;
    Ok(Dumped { yaml, warnings })
}

impl EventSource for libyaml::Parser<'_> {
    fn next_event(&mut self) -> Result<Event, Error> {
        self.parse().map(event_from_libyaml).map_err(Error::Parse)
    }
}

impl EventSink for libyaml::Emitter<'_> {
    fn emit_event(&mut self, event: Event) -> Result<(), Error> {
        let event = event_to_libyaml(event).map_err(Error::Emit)?;
        self.emit(event).map_err(Error::Emit)
    }
}

fn event_from_libyaml(event: libyaml::Event) -> Event {
    match event.data {
        libyaml::EventData::StreamStart { .. } => Event::StreamStart,
        libyaml::EventData::StreamEnd => Event::StreamEnd,
        libyaml::EventData::DocumentStart {
            version_directive,
            tag_directives,
            implicit,
        } => Event::DocumentStart {
            version: version_directive.map(|v| VersionDirective {
                major: v.major,
                minor: v.minor,
            }),
            tag_directives: tag_directives
                .into_iter()
                .map(|d| TagDirective {
                    handle: d.handle,
                    prefix: d.prefix,
                })
                .collect(),
            implicit,
        },
        libyaml::EventData::DocumentEnd { implicit } => Event::DocumentEnd { implicit },
        libyaml::EventData::Alias { anchor } => Event::Alias { anchor },
        libyaml::EventData::Scalar {
            anchor,
            tag,
            value,
            plain_implicit,
            quoted_implicit,
            style,
        } => Event::Scalar {
            tag,
            anchor,
            value,
            style: scalar_style_from_libyaml(style),
            plain_implicit,
            quoted_implicit,
        },
        libyaml::EventData::SequenceStart {
            anchor,
            tag,
            implicit,
            style,
        } => Event::SequenceStart {
            tag,
            anchor,
            implicit,
            style: match style {
                libyaml::SequenceStyle::Block => CollectionStyle::Block,
                libyaml::SequenceStyle::Flow => CollectionStyle::Flow,
                _ => CollectionStyle::Any,
            },
        },
        libyaml::EventData::SequenceEnd => Event::SequenceEnd,
        libyaml::EventData::MappingStart {
            anchor,
            tag,
            implicit,
            style,
        } => Event::MappingStart {
            tag,
            anchor,
            implicit,
            style: match style {
                libyaml::MappingStyle::Block => CollectionStyle::Block,
                libyaml::MappingStyle::Flow => CollectionStyle::Flow,
                _ => CollectionStyle::Any,
            },
        },
        libyaml::EventData::MappingEnd => Event::MappingEnd,
    }
}

fn scalar_style_from_libyaml(style: libyaml::ScalarStyle) -> ScalarStyle {
    match style {
        libyaml::ScalarStyle::Plain => ScalarStyle::Plain,
        libyaml::ScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        libyaml::ScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        libyaml::ScalarStyle::Literal => ScalarStyle::Literal,
        libyaml::ScalarStyle::Folded => ScalarStyle::Folded,
        _ => ScalarStyle::Any,
    }
}

fn scalar_style_to_libyaml(style: ScalarStyle) -> libyaml::ScalarStyle {
    match style {
        ScalarStyle::Any => libyaml::ScalarStyle::Any,
        ScalarStyle::Plain => libyaml::ScalarStyle::Plain,
        ScalarStyle::SingleQuoted => libyaml::ScalarStyle::SingleQuoted,
        ScalarStyle::DoubleQuoted => libyaml::ScalarStyle::DoubleQuoted,
        ScalarStyle::Literal => libyaml::ScalarStyle::Literal,
        ScalarStyle::Folded => libyaml::ScalarStyle::Folded,
    }
}

/// The backend's directive types have no public constructor, so they are
/// taken from the parse of a document header that declares them.
fn libyaml_directives(
    version: Option<VersionDirective>,
    tag_directives: &[TagDirective],
) -> Result<(Option<libyaml::VersionDirective>, Vec<libyaml::TagDirective>), libyaml::Error> {
    if version.is_none() && tag_directives.is_empty() {
        return Ok((None, vec![]));
    }

    let mut header = String::new();
    if let Some(VersionDirective { major, minor }) = version {
        header.push_str(&format!("%YAML {major}.{minor}\n"));
    }
    for directive in tag_directives {
        header.push_str(&format!("%TAG {} {}\n", directive.handle, directive.prefix));
    }
    header.push_str("---\n");

    let mut input = header.as_bytes();
    let mut parser = libyaml::Parser::new();
    parser.set_input(&mut input);
    loop {
        match parser.parse()?.data {
            libyaml::EventData::DocumentStart {
                version_directive,
                tag_directives,
                ..
            } => return Ok((version_directive, tag_directives)),
            libyaml::EventData::StreamEnd => return Ok((None, vec![])),
            _ => {}
        }
    }
}

fn event_to_libyaml(event: Event) -> Result<libyaml::Event, libyaml::Error> {
    Ok(match event {
        Event::StreamStart => libyaml::Event::stream_start(libyaml::Encoding::Any),
        Event::StreamEnd => libyaml::Event::stream_end(),
        Event::DocumentStart {
            version,
            tag_directives,
            implicit,
        } => {
            let (version, tag_directives) = libyaml_directives(version, &tag_directives)?;
            libyaml::Event::document_start(version, &tag_directives, implicit)
        }
        Event::DocumentEnd { implicit } => libyaml::Event::document_end(implicit),
        Event::Alias { anchor } => libyaml::Event::alias(&anchor),
        Event::Scalar {
            tag,
            anchor,
            value,
            style,
            plain_implicit,
            quoted_implicit,
        } => libyaml::Event::scalar(
            anchor.as_deref(),
            tag.as_deref(),
            &value,
            plain_implicit,
            quoted_implicit,
            scalar_style_to_libyaml(style),
        ),
        Event::SequenceStart {
            tag,
            anchor,
            implicit,
            style,
        } => libyaml::Event::sequence_start(
            anchor.as_deref(),
            tag.as_deref(),
            implicit,
            match style {
                CollectionStyle::Any => libyaml::SequenceStyle::Any,
                CollectionStyle::Block => libyaml::SequenceStyle::Block,
                CollectionStyle::Flow => libyaml::SequenceStyle::Flow,
            },
        ),
        Event::SequenceEnd => libyaml::Event::sequence_end(),
        Event::MappingStart {
            tag,
            anchor,
            implicit,
            style,
        } => libyaml::Event::mapping_start(
            anchor.as_deref(),
            tag.as_deref(),
            implicit,
            match style {
                CollectionStyle::Any => libyaml::MappingStyle::Any,
                CollectionStyle::Block => libyaml::MappingStyle::Block,
                CollectionStyle::Flow => libyaml::MappingStyle::Flow,
            },
        ),
        Event::MappingEnd => libyaml::Event::mapping_end(),
    })
}
