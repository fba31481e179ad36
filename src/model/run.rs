use std::ops::Range;

/// Formatting attributes of a run (`w:rPr`), kept as the verbatim XML.
///
/// The editing core treats this as an opaque value: it is captured when the
/// run is parsed and written back unchanged. Nothing here interprets fonts,
/// weights, or styles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunProperties(String);

impl RunProperties {
    pub fn from_xml(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    pub fn as_xml(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A run of text sharing one set of formatting attributes.
#[derive(Debug, Clone)]
pub struct Run {
    /// The `<w:r ...>` start tag, attributes included.
    start_tag: String,
    properties: RunProperties,
    text: String,
    /// Byte range of the whole `w:r` element in the source part.
    source: Option<Range<usize>>,
    /// Byte ranges of the text-bearing children (`w:t`, `w:tab`, `w:br`, ...).
    text_sources: Vec<Range<usize>>,
    /// Offset of the closing `</w:r>`; `None` for a self-closing run.
    content_end: Option<usize>,
    modified: bool,
}

impl Run {
    /// Create an in-memory run with no formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_properties(RunProperties::default(), text)
    }

    /// Create an in-memory run carrying the given formatting.
    pub fn with_properties(properties: RunProperties, text: impl Into<String>) -> Self {
        Self {
            start_tag: "<w:r>".to_string(),
            properties,
            text: text.into(),
            source: None,
            text_sources: Vec::new(),
            content_end: None,
            modified: false,
        }
    }

    pub(crate) fn parsed(
        start_tag: String,
        properties: RunProperties,
        text: String,
        source: Range<usize>,
        text_sources: Vec<Range<usize>>,
        content_end: Option<usize>,
    ) -> Self {
        Self {
            start_tag,
            properties,
            text,
            source: Some(source),
            text_sources,
            content_end,
            modified: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the run's entire text content. Formatting is untouched.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.modified = true;
    }

    pub fn properties(&self) -> &RunProperties {
        &self.properties
    }

    pub fn start_tag(&self) -> &str {
        &self.start_tag
    }

    /// True once [`Run::set_text`] has been called.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub(crate) fn source(&self) -> Option<Range<usize>> {
        self.source.clone()
    }

    pub(crate) fn text_sources(&self) -> &[Range<usize>] {
        &self.text_sources
    }

    pub(crate) fn content_end(&self) -> Option<usize> {
        self.content_end
    }
}
