use pretty_assertions::assert_eq;
use yaml_tree::*;

const CONFIG: &str = r#"name: demo
ports:
- 80
- 443
env:
  debug: "yes"
  level: 'high'
"#;

#[test]
fn load_block_mapping() {
    let docs = load(CONFIG).unwrap();
    assert_eq!(
        docs,
        [Document::new(Node::mapping([
            (Node::plain("name"), Node::plain("demo")),
            (
                Node::plain("ports"),
                Node::seq([Node::plain("80"), Node::plain("443")])
            ),
            (
                Node::plain("env"),
                Node::mapping([
                    (Node::plain("debug"), Node::quoted("yes")),
                    (
                        Node::plain("level"),
                        Node::Scalar(Scalar::new("high", ScalarStyle::SingleQuoted))
                    ),
                ])
            ),
        ]))]
    );
}

#[test]
fn round_trip() {
    let docs = load(CONFIG).unwrap();
    let yaml = dump(&docs).unwrap();
    assert_eq!(yaml, CONFIG);
    assert_eq!(load(&yaml).unwrap(), docs);
}

#[test]
fn redump_is_stable() {
    let inputs = [
        "[a, {b: c}, 'd']\n",
        "%YAML 1.1\n--- !!str foo\n...\n",
        "key: |\n  line one\n  line two\n",
        "- &anchor value\n- *anchor\n",
        "! a\n",
        "",
    ];
    for input in inputs {
        let first = dump(&load(input).unwrap()).unwrap();
        let second = dump(&load(&first).unwrap()).unwrap();
        assert_eq!(first, second, "input: {input:?}");
    }
}

#[test]
fn deep_nesting_is_rejected() {
    let depth = 20_000;
    let yaml = "[".repeat(depth) + &"]".repeat(depth);
    let err = load(&yaml).unwrap_err();
    assert_eq!(err, GrammarError::TooDeep { limit: MAX_DEPTH });

    let yaml = "[".repeat(MAX_DEPTH) + &"]".repeat(MAX_DEPTH);
    let docs = load(&yaml).unwrap();
    assert_eq!(load(&dump(&docs).unwrap()).unwrap(), docs);

    let mut root = Node::plain("x");
    for _ in 0..=MAX_DEPTH {
        root = Node::seq([root]);
    }
    let err = dump(&[Document::new(root)]).unwrap_err();
    assert!(matches!(
        err,
        Error::Structure(StructuralError::Node {
            reason: "nesting too deep",
            ..
        })
    ));
}

#[test]
fn multiple_documents() {
    let docs = load("a\n---\nb\n").unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].root, Node::plain("a"));
    assert_eq!(docs[1].root, Node::plain("b"));
    assert!(docs[0].start_implicit);
    assert!(!docs[1].start_implicit);

    let yaml = dump(&docs).unwrap();
    assert!(yaml.contains("---"));
    assert_eq!(load(&yaml).unwrap(), docs);
}

#[test]
fn anchors_and_aliases() {
    let docs = load("&x foo").unwrap();
    assert_eq!(docs[0].root, Node::plain("foo").with_anchor("x"));

    let docs = load("[&x foo, *x]").unwrap();
    assert_eq!(
        docs[0].root,
        Node::seq([Node::plain("foo").with_anchor("x"), Node::alias("x")])
            .with_style(CollectionStyle::Flow)
    );

    let yaml = dump(&docs).unwrap();
    assert!(yaml.contains("&x"));
    assert!(yaml.contains("*x"));
    assert_eq!(load(&yaml).unwrap(), docs);
}

#[test]
fn tags_and_sentinels() {
    let docs = load("- foo\n- \"foo\"\n- !custom bar\n- !!int 3\n- ! a\n").unwrap();
    let Node::Sequence(seq) = &docs[0].root else {
        panic!("expected a sequence, got {:?}", docs[0].root);
    };
    let tags: Vec<_> = seq.items.iter().map(Node::tag).collect();
    assert_eq!(
        tags,
        [
            Some("?"),
            Some("!"),
            Some("!custom"),
            Some("tag:yaml.org,2002:int"),
            Some("!")
        ]
    );
    assert_eq!(
        seq.items[2].as_scalar().map(|s| s.implicit),
        Some(ScalarImplicit::None)
    );

    let yaml = dump(&docs).unwrap();
    assert!(yaml.contains("!custom bar"));
    assert!(yaml.contains("- ! a"));
    assert!(!yaml.contains("!\"foo\""));
    assert_eq!(load(&yaml).unwrap(), docs);
}

#[test]
fn empty_flow_values_come_back_quoted() {
    let docs = load("{? a, b: }\n").unwrap();
    let Node::Mapping(map) = &docs[0].root else {
        panic!("expected a mapping, got {:?}", docs[0].root);
    };
    assert_eq!(map.pairs[0].1, Node::plain(""));
    assert_eq!(map.pairs[1].1, Node::plain(""));

    let reloaded = load(&dump(&docs).unwrap()).unwrap();
    let Node::Mapping(map) = &reloaded[0].root else {
        panic!("expected a mapping, got {:?}", reloaded[0].root);
    };
    for (_, value) in &map.pairs {
        let scalar = value.as_scalar().unwrap();
        assert_eq!(scalar.value, "");
        assert_eq!(scalar.tag.as_deref(), Some("!"));
        assert_eq!(scalar.style, ScalarStyle::SingleQuoted);
    }
}

#[test]
fn directives_survive() {
    let docs = load("%YAML 1.1\n%TAG !e! tag:example.com,2000:\n--- !e!thing x\n").unwrap();
    assert_eq!(docs[0].version, Some(VersionDirective { major: 1, minor: 1 }));
    assert_eq!(
        docs[0].tag_directives,
        [TagDirective::new("!e!", "tag:example.com,2000:")]
    );
    assert!(!docs[0].start_implicit);
    assert_eq!(docs[0].root.tag(), Some("tag:example.com,2000:thing"));

    let reloaded = load(&dump(&docs).unwrap()).unwrap();
    assert_eq!(reloaded[0].version, docs[0].version);
    assert_eq!(reloaded[0].tag_directives, docs[0].tag_directives);
    assert_eq!(reloaded[0].root, docs[0].root);
}

#[test]
fn empty_stream() {
    assert!(load("").unwrap().is_empty());
    assert!(load("# only a comment\n").unwrap().is_empty());
    let yaml = dump(&[]).unwrap();
    assert!(yaml.trim().is_empty());
    assert!(load(&yaml).unwrap().is_empty());
}

#[test]
fn nul_in_scalar() {
    let docs = [Document::new(Node::seq([
        Node::quoted("a\0b"),
        Node::quoted("\0"),
    ]))];
    let yaml = dump(&docs).unwrap();
    assert_eq!(load(&yaml).unwrap(), docs);
}

#[test]
fn parse_error_is_reported() {
    let err = load("key: [unclosed\n").unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "{err:?}");

    let err = load("- a\nb: c\n").unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "{err:?}");
}

#[test]
fn malformed_mapping_is_rejected() {
    let mut raw = RawDocument::from(&Document::new(Node::mapping([(
        Node::plain("a"),
        Node::plain("b"),
    )])));
    if let Some(RawValue::Nodes(children)) = raw.root.as_mut().and_then(|r| r.value.as_mut()) {
        children.pop();
    }

    let err = dump_raw(vec![raw], &DumpOptions::default()).unwrap_err();
    let Error::Structure(err) = err else {
        panic!("expected a structural error, got {err:?}");
    };
    assert_eq!(err.part(), StructuralPart::Node);
    assert!(err.to_string().contains("mapping"), "{err}");
}

#[test]
fn failed_dump_returns_nothing() {
    let docs = [
        Document::new(Node::plain("fine")),
        Document::new(Node::seq([Node::alias("")])),
    ];
    let err = dump(&docs).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid alias node at root[0] in document 1: alias without anchor"
    );
}

#[test]
fn raw_dump_collects_warnings() {
    let mut raw = RawDocument::from(&Document::new(Node::seq([Node::plain("a")])));
    raw.start_implicit = None;
    if let Some(root) = raw.root.as_mut() {
        root.style = Some("sideways".to_owned());
    }

    let dumped = dump_raw(vec![raw], &DumpOptions::default()).unwrap();
    assert_eq!(
        dumped
            .warnings
            .iter()
            .map(|w| w.kind)
            .collect::<Vec<_>>(),
        [WarningKind::StartImplicit, WarningKind::NodeStyle]
    );
    assert_eq!(
        load(&dumped.yaml).unwrap()[0].root,
        Node::seq([Node::plain("a")])
    );
}

#[test]
fn canonical_output() {
    let docs = load("a: b\n").unwrap();
    let yaml = dump_with(
        &docs,
        &DumpOptions {
            canonical: true,
            ..DumpOptions::default()
        },
    )
    .unwrap();
    assert!(yaml.contains("---"));
    let reloaded = load(&yaml).unwrap();
    let Node::Mapping(map) = &reloaded[0].root else {
        panic!("expected a mapping, got {:?}", reloaded[0].root);
    };
    assert_eq!(map.pairs.len(), 1);
    assert_eq!(map.pairs[0].0.as_scalar().map(|s| s.value.as_str()), Some("a"));
}

#[test]
fn reader_input() {
    let mut reader = std::io::BufReader::new(CONFIG.as_bytes());
    assert_eq!(load_from_reader(&mut reader).unwrap(), load(CONFIG).unwrap());
}

#[test]
fn event_level_round_trip() {
    let docs = load(CONFIG).unwrap();
    let mut dumper = Dumper::new(Vec::new());
    dumper.dump(&docs).unwrap();
    let events = dumper.into_inner();
    assert_eq!(events.first(), Some(&Event::StreamStart));
    assert_eq!(events.last(), Some(&Event::StreamEnd));

    let loaded = Loader::new(std::collections::VecDeque::from(events))
        .load()
        .unwrap();
    assert_eq!(loaded, docs);
}
