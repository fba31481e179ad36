//! Parse the main document part into the paragraph model.
//!
//! Only the paragraphs directly under `w:body` form the document's paragraph
//! sequence. Runs are collected from the paragraph itself and from the inline
//! wrappers Word places around runs (hyperlinks, smart tags, insertions and
//! similar). Byte offsets of every run are kept so that the writer can splice
//! edits into the original part without re-serializing anything else.

use std::ops::Range;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, Run, RunProperties};
use crate::util::{local_name, resolve_entity};

/// Elements that may sit between a paragraph and its runs.
const RUN_WRAPPERS: &[&[u8]] = &[
    b"hyperlink",
    b"smartTag",
    b"ins",
    b"fldSimple",
    b"customXml",
    b"sdt",
    b"sdtContent",
];

/// A run while its element is still open.
struct OpenRun {
    start: usize,
    start_tag: String,
    /// Depth of the stack once the `w:r` element is pushed.
    depth: usize,
    properties: Option<RunProperties>,
    properties_start: Option<usize>,
    text: String,
    /// Start offset of the `w:t` currently open, if any.
    text_start: Option<usize>,
    text_sources: Vec<Range<usize>>,
}

/// A paragraph while its element is still open.
struct OpenParagraph {
    depth: usize,
    runs: Vec<Run>,
}

/// Parse the XML of a main document part.
pub fn parse_document(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut paragraph: Option<OpenParagraph> = None;
    let mut run: Option<OpenRun> = None;

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event()?;
        let end = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                let qname = e.name();
                let name = local_name(qname.as_ref());
                let parent_is_body = stack.last().is_some_and(|n| n == b"body");
                stack.push(name.to_vec());
                let depth = stack.len();

                if let Some(open) = run.as_mut() {
                    if depth == open.depth + 1 {
                        match name {
                            b"rPr" => open.properties_start = Some(start),
                            b"t" => open.text_start = Some(start),
                            _ => {}
                        }
                    }
                } else if let Some(para) = paragraph.as_ref() {
                    if name == b"r" && is_run_parent(para.depth, depth, &stack) {
                        run = Some(OpenRun::new(start, &xml[start..end], depth));
                    }
                } else if name == b"p" && parent_is_body {
                    paragraph = Some(OpenParagraph {
                        depth,
                        runs: Vec::new(),
                    });
                }
            }
            Event::Empty(e) => {
                let qname = e.name();
                let name = local_name(qname.as_ref());
                let depth = stack.len() + 1;

                if let Some(open) = run.as_mut() {
                    if depth == open.depth + 1 {
                        match name {
                            b"rPr" => {
                                open.properties = Some(RunProperties::from_xml(&xml[start..end]))
                            }
                            b"t" => open.text_sources.push(start..end),
                            b"tab" => open.push_child('\t', start..end),
                            b"br" | b"cr" => open.push_child('\n', start..end),
                            b"noBreakHyphen" => open.push_child('-', start..end),
                            _ => {}
                        }
                    }
                } else if let Some(para) = paragraph.as_mut() {
                    if name == b"r" && is_run_parent(para.depth, depth, &stack) {
                        para.runs.push(Run::parsed(
                            empty_run_start_tag(&xml[start..end]),
                            RunProperties::default(),
                            String::new(),
                            start..end,
                            Vec::new(),
                            None,
                        ));
                    }
                } else if name == b"p" && stack.last().is_some_and(|n| n == b"body") {
                    paragraphs.push(Paragraph::new(Vec::new()));
                }
            }
            Event::Text(e) => {
                if let Some(open) = run.as_mut()
                    && open.text_start.is_some()
                {
                    open.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::CData(e) => {
                if let Some(open) = run.as_mut()
                    && open.text_start.is_some()
                {
                    open.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::GeneralRef(e) => {
                if let Some(open) = run.as_mut()
                    && open.text_start.is_some()
                {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    let resolved = resolve_entity(&entity).ok_or_else(|| {
                        Error::Malformed(format!("unknown entity &{entity};"))
                    })?;
                    open.text.push(resolved);
                }
            }
            Event::End(_) => {
                let depth = stack.len();
                let name = stack.pop().unwrap_or_default();

                match run.as_ref().map(|r| r.depth) {
                    Some(run_depth) if depth == run_depth => {
                        if let (Some(open), Some(para)) = (run.take(), paragraph.as_mut()) {
                            para.runs.push(open.finish(start, end));
                        }
                    }
                    Some(run_depth) if depth == run_depth + 1 => {
                        if let Some(open) = run.as_mut() {
                            match name.as_slice() {
                                b"rPr" => {
                                    if let Some(rpr_start) = open.properties_start.take() {
                                        open.properties =
                                            Some(RunProperties::from_xml(&xml[rpr_start..end]));
                                    }
                                }
                                b"t" => {
                                    if let Some(text_start) = open.text_start.take() {
                                        open.text_sources.push(text_start..end);
                                    }
                                }
                                _ => {}
                            }
                        }
                    }
                    Some(_) => {}
                    None => {
                        if paragraph.as_ref().is_some_and(|p| p.depth == depth)
                            && let Some(para) = paragraph.take()
                        {
                            paragraphs.push(Paragraph::new(para.runs));
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if run.is_some() || paragraph.is_some() {
        return Err(Error::Malformed(
            "document ended inside an open paragraph".to_string(),
        ));
    }

    Ok(Document::new(paragraphs))
}

impl OpenRun {
    fn new(start: usize, start_tag: &str, depth: usize) -> Self {
        Self {
            start,
            start_tag: start_tag.to_string(),
            depth,
            properties: None,
            properties_start: None,
            text: String::new(),
            text_start: None,
            text_sources: Vec::new(),
        }
    }

    fn push_child(&mut self, c: char, source: Range<usize>) {
        self.text.push(c);
        self.text_sources.push(source);
    }

    /// Close the run; `content_end` is where its end tag begins.
    fn finish(self, content_end: usize, end: usize) -> Run {
        Run::parsed(
            self.start_tag,
            self.properties.unwrap_or_default(),
            self.text,
            self.start..end,
            self.text_sources,
            Some(content_end),
        )
    }
}

/// Whether a `w:r` at `depth` belongs to the paragraph opened at `para_depth`.
///
/// The run must be a direct child of the paragraph, or reachable from it only
/// through [`RUN_WRAPPERS`].
fn is_run_parent(para_depth: usize, depth: usize, stack: &[Vec<u8>]) -> bool {
    if depth <= para_depth {
        return false;
    }
    // Elements strictly between the paragraph and the run.
    stack[para_depth..depth - 1]
        .iter()
        .all(|name| RUN_WRAPPERS.contains(&name.as_slice()))
}

/// Turn `<w:r .../>` into the matching open tag `<w:r ...>`.
fn empty_run_start_tag(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('>').trim_end_matches('/').trim_end();
    format!("{trimmed}>")
}
