//! Write an edited paragraph model back into its source part.
//!
//! Serialization is a splice over the original XML: every byte outside an
//! edited or removed run is copied unchanged, so section properties, styles
//! references, bookmarks, and everything else the model does not represent
//! survive untouched. Inside an edited run only the text-bearing children are
//! replaced; drawings, field characters, footnote references and the like
//! stay where they were.

use std::borrow::Cow;
use std::ops::Range;

use crate::model::{Document, Run};
use crate::util::escape_xml;

/// Produce the updated XML of a main document part.
///
/// `source` must be the exact text the document was parsed from.
pub fn serialize_document(source: &str, document: &Document) -> String {
    let mut splices: Vec<(Range<usize>, Cow<'_, str>)> = Vec::new();

    for paragraph in document.paragraphs() {
        for removed in paragraph.removed_sources() {
            splices.push((removed.clone(), Cow::Borrowed("")));
        }
        for run in paragraph.runs() {
            if run.is_modified()
                && let Some(range) = run.source()
            {
                push_run_splices(&mut splices, run, range);
            }
        }
    }

    if splices.is_empty() {
        return source.to_string();
    }

    splices.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (range, replacement) in splices {
        if range.start < cursor {
            // Overlapping splice; the earlier one already covers it.
            continue;
        }
        out.push_str(&source[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Splices that give a parsed run its new text.
///
/// The new text takes the place of the first text-bearing child and the other
/// text-bearing children are dropped. A run without any gets the text just
/// before its end tag; a self-closing run is rendered whole.
fn push_run_splices<'a>(
    splices: &mut Vec<(Range<usize>, Cow<'a, str>)>,
    run: &Run,
    range: Range<usize>,
) {
    let Some(content_end) = run.content_end() else {
        splices.push((range, Cow::Owned(render_run(run))));
        return;
    };

    let prefix = element_prefix(run.start_tag());
    match run.text_sources() {
        [] => splices.push((
            content_end..content_end,
            Cow::Owned(render_text(prefix, run.text())),
        )),
        [first, rest @ ..] => {
            splices.push((first.clone(), Cow::Owned(render_text(prefix, run.text()))));
            for other in rest {
                splices.push((other.clone(), Cow::Borrowed("")));
            }
        }
    }
}

/// Render a run as XML: its start tag, its properties, then the text.
pub fn render_run(run: &Run) -> String {
    let start_tag = run.start_tag();
    let prefix = element_prefix(start_tag);

    let mut xml = String::with_capacity(start_tag.len() + run.text().len() + 64);
    xml.push_str(start_tag);
    xml.push_str(run.properties().as_xml());
    xml.push_str(&render_text(prefix, run.text()));
    xml.push_str(&format!("</{prefix}r>"));
    xml
}

/// Render run text as `w:t` chunks separated by break and tab elements.
///
/// Tabs become `w:tab` and line feeds `w:br`, so the text reads back the same.
/// A vertical tab (Word's soft line break) also becomes `w:br` and a form feed
/// becomes a page break. Carriage returns are kept as `&#13;` inside `w:t`.
fn render_text(prefix: &str, text: &str) -> String {
    let mut xml = String::with_capacity(text.len() + 32);
    let mut chunk_start = 0;

    for (i, c) in text.char_indices() {
        let element = match c {
            '\t' => format!("<{prefix}tab/>"),
            '\n' | '\u{b}' => format!("<{prefix}br/>"),
            '\u{c}' => format!("<{prefix}br {prefix}type=\"page\"/>"),
            _ => continue,
        };
        push_text(&mut xml, prefix, &text[chunk_start..i]);
        xml.push_str(&element);
        chunk_start = i + c.len_utf8();
    }
    push_text(&mut xml, prefix, &text[chunk_start..]);

    xml
}

fn push_text(xml: &mut String, prefix: &str, text: &str) {
    let escaped = escape_xml(text);
    if escaped.is_empty() {
        return;
    }
    xml.push_str(&format!(
        "<{prefix}t xml:space=\"preserve\">{escaped}</{prefix}t>"
    ));
}

/// Namespace prefix of an element's start tag, including the colon (`"w:"`).
fn element_prefix(start_tag: &str) -> &str {
    let name_end = start_tag
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(start_tag.len());
    let name = start_tag.get(1..name_end).unwrap_or("");
    match name.rfind(':') {
        Some(i) => &name[..=i],
        None => "",
    }
}
