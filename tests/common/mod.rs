//! In-memory DOCX fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

pub const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

pub const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/></w:style></w:styles>"#;

/// A run in a fixture paragraph: text plus optional raw `w:rPr` XML.
pub struct FixtureRun {
    pub text: &'static str,
    pub props: &'static str,
}

pub fn plain(text: &'static str) -> FixtureRun {
    FixtureRun { text, props: "" }
}

pub fn bold(text: &'static str) -> FixtureRun {
    FixtureRun {
        text,
        props: "<w:rPr><w:b/></w:rPr>",
    }
}

pub fn italic(text: &'static str) -> FixtureRun {
    FixtureRun {
        text,
        props: "<w:rPr><w:i/></w:rPr>",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Wrap body XML in a `w:document`.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{body}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr></w:body></w:document>"#
    )
}

/// Body XML for paragraphs made of the given runs, styled as list bullets.
pub fn paragraphs_xml(paragraphs: &[Vec<FixtureRun>]) -> String {
    let mut body = String::new();
    for runs in paragraphs {
        body.push_str(r#"<w:p><w:pPr><w:pStyle w:val="ListBullet"/></w:pPr>"#);
        for run in runs {
            body.push_str(&format!(
                r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
                run.props,
                escape(run.text)
            ));
        }
        body.push_str("</w:p>");
    }
    body
}

/// Package a main document part into DOCX bytes.
pub fn docx_from_document_xml(document_xml: &str) -> Vec<u8> {
    docx_from_document_bytes(document_xml.as_bytes())
}

/// Package raw main part bytes, in whatever encoding, into DOCX bytes.
pub fn docx_from_document_bytes(document: &[u8]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, data) in [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", RELS.as_bytes()),
        ("word/document.xml", document),
        ("word/styles.xml", STYLES.as_bytes()),
    ] {
        zip.start_file(name, deflated).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Build DOCX bytes from paragraphs of runs.
pub fn docx(paragraphs: &[Vec<FixtureRun>]) -> Vec<u8> {
    docx_from_document_xml(&document_xml(&paragraphs_xml(paragraphs)))
}

/// Build DOCX bytes with one plain run per paragraph.
pub fn docx_from_texts(texts: &[&'static str]) -> Vec<u8> {
    let paragraphs: Vec<Vec<FixtureRun>> = texts.iter().map(|t| vec![plain(*t)]).collect();
    docx(&paragraphs)
}

/// Read one part of a DOCX as a string.
pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

/// Names of all entries in a DOCX, in archive order.
pub fn part_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}
