/// Tag given to an untagged plain scalar: its type is resolved implicitly.
pub const PLAIN_TAG: &str = "?";

/// Tag given to an untagged non-plain scalar: the non-specific tag.
pub const NON_SPECIFIC_TAG: &str = "!";

/// A string-like leaf of the document tree.
///
/// The value is the raw text content, with escapes already interpreted by the
/// parser. Embedded NUL characters are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scalar {
    pub value: String,
    /// The explicit tag, or one of the sentinels [`PLAIN_TAG`] and
    /// [`NON_SPECIFIC_TAG`] when the source had none.
    pub tag: Option<String>,
    pub implicit: ScalarImplicit,
    pub anchor: Option<String>,
    /// For a loaded scalar, the style it was written in. When dumping, the
    /// emitter treats this as the preferred style and may fall back to
    /// another one if the value cannot be written in it.
    pub style: ScalarStyle,
}

/// Whether the tag of a scalar may be omitted, and for which styles.
///
/// The parser reports this as two flags that are never both set; they are
/// collapsed here into one value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScalarImplicit {
    /// The tag must be written.
    #[default]
    None,
    /// The tag may be omitted when the scalar is written plain.
    Plain,
    /// The tag may be omitted when the scalar is written in any non-plain
    /// style.
    Quoted,
}

impl ScalarImplicit {
    #[inline]
    pub fn from_flags(plain_implicit: bool, quoted_implicit: bool) -> Self {
        if plain_implicit {
            ScalarImplicit::Plain
        } else if quoted_implicit {
            ScalarImplicit::Quoted
        } else {
            ScalarImplicit::None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScalarImplicit::None => "none",
            ScalarImplicit::Plain => "plain",
            ScalarImplicit::Quoted => "quoted",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "none" => ScalarImplicit::None,
            "plain" => ScalarImplicit::Plain,
            "quoted" => ScalarImplicit::Quoted,
            _ => return None,
        })
    }

    /// Returns the `(plain_implicit, quoted_implicit)` pair.
    #[inline]
    pub fn flags(self) -> (bool, bool) {
        match self {
            ScalarImplicit::None => (false, false),
            ScalarImplicit::Plain => (true, false),
            ScalarImplicit::Quoted => (false, true),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarStyle {
    /// Let the emitter choose.
    #[default]
    Any,
    Plain,
    SingleQuoted,
    DoubleQuoted,
    /// Block scalar introduced by `|`.
    Literal,
    /// Block scalar introduced by `>`.
    Folded,
}

impl ScalarStyle {
    pub fn name(self) -> &'static str {
        match self {
            ScalarStyle::Any => "any",
            ScalarStyle::Plain => "plain",
            ScalarStyle::SingleQuoted => "single-quoted",
            ScalarStyle::DoubleQuoted => "double-quoted",
            ScalarStyle::Literal => "literal",
            ScalarStyle::Folded => "folded",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "any" => ScalarStyle::Any,
            "plain" => ScalarStyle::Plain,
            "single-quoted" => ScalarStyle::SingleQuoted,
            "double-quoted" => ScalarStyle::DoubleQuoted,
            "literal" => ScalarStyle::Literal,
            "folded" => ScalarStyle::Folded,
            _ => return None,
        })
    }
}

impl Scalar {
    /// A scalar as the parser reports it for `value` written in `style`
    /// without a tag.
    pub fn new(value: impl Into<String>, style: ScalarStyle) -> Self {
        let implicit = if style == ScalarStyle::Plain {
            ScalarImplicit::Plain
        } else {
            ScalarImplicit::Quoted
        };
        Self {
            value: value.into(),
            tag: Some(Self::default_tag(style).to_owned()),
            implicit,
            anchor: None,
            style,
        }
    }

    #[inline]
    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(value, ScalarStyle::Plain)
    }

    #[inline]
    pub fn quoted(value: impl Into<String>) -> Self {
        Self::new(value, ScalarStyle::DoubleQuoted)
    }

    #[inline]
    pub fn with_anchor(self, anchor: impl Into<String>) -> Self {
        Self {
            anchor: Some(anchor.into()),
            ..self
        }
    }

    /// Give the scalar an explicit tag. An explicit tag is always written, so
    /// this also clears the implicit flag.
    #[inline]
    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            implicit: ScalarImplicit::None,
            ..self
        }
    }

    /// Tag for an untagged scalar event, following the sentinel convention.
    pub(crate) fn default_tag(style: ScalarStyle) -> &'static str {
        if style == ScalarStyle::Plain {
            PLAIN_TAG
        } else {
            NON_SPECIFIC_TAG
        }
    }
}

impl std::ops::Deref for Scalar {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl AsRef<str> for Scalar {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_flags() {
        assert_eq!(ScalarImplicit::from_flags(true, false), ScalarImplicit::Plain);
        assert_eq!(ScalarImplicit::from_flags(false, true), ScalarImplicit::Quoted);
        assert_eq!(ScalarImplicit::from_flags(false, false), ScalarImplicit::None);
        assert_eq!(ScalarImplicit::Quoted.flags(), (false, true));
    }

    #[test]
    fn sentinel_tags() {
        assert_eq!(Scalar::plain("foo").tag.as_deref(), Some("?"));
        assert_eq!(Scalar::quoted("foo").tag.as_deref(), Some("!"));
        let tagged = Scalar::plain("1").with_tag("tag:yaml.org,2002:int");
        assert_eq!(tagged.implicit, ScalarImplicit::None);
    }

    #[test]
    fn style_names() {
        for style in [
            ScalarStyle::Any,
            ScalarStyle::Plain,
            ScalarStyle::SingleQuoted,
            ScalarStyle::DoubleQuoted,
            ScalarStyle::Literal,
            ScalarStyle::Folded,
        ] {
            assert_eq!(ScalarStyle::from_name(style.name()), Some(style));
        }
        assert_eq!(ScalarStyle::from_name("quoted"), None);
    }
}
