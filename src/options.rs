/// Emitter settings for a single dump.
///
/// The defaults are those of the underlying emitter, which is what the
/// round-trip guarantees are stated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Write the fully explicit canonical form.
    pub canonical: bool,
    /// Indentation step, between 2 and 9. `None` keeps the emitter default.
    pub indent: Option<i32>,
    /// Preferred line width. `None` keeps the emitter default, a negative
    /// value means unlimited.
    pub width: Option<i32>,
    /// Write non-ASCII characters as-is instead of escaping them.
    pub unicode: bool,
}

impl DumpOptions {
    pub(crate) fn configure(&self, emitter: &mut libyaml_safer::Emitter<'_>) {
        emitter.set_canonical(self.canonical);
        if let Some(indent) = self.indent {
            emitter.set_indent(indent);
        }
        if let Some(width) = self.width {
            emitter.set_width(width);
        }
        emitter.set_unicode(self.unicode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_emitter_settings() {
        let options = DumpOptions::default();
        assert!(!options.canonical);
        assert!(!options.unicode);
        assert_eq!(options.indent, None);
        assert_eq!(options.width, None);

        let docs = [crate::Document::new(crate::Node::plain("a"))];
        let yaml = crate::dump_with(&docs, &options).unwrap();
        assert_eq!(crate::load(&yaml).unwrap(), docs);
    }
}
