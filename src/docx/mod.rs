//! DOCX reading and writing.
//!
//! A [`Docx`] owns everything loaded from one input: the zip package, the
//! text of its main document part, and the [`Document`] paragraph model parsed
//! from that part. Nothing is shared between two `Docx` values, so separate
//! documents can be processed on separate threads.

mod package;
mod parser;
mod writer;

pub use package::{DEFAULT_MAIN_PART, DocxPackage, WriteConfig, ZIP_SIGNATURE, check_signature};
pub use parser::parse_document;
pub use writer::{render_run, serialize_document};

use std::io::{self, Read, Seek, Write};
use std::path::Path;

use crate::error::Result;
use crate::model::Document;
use crate::util::{declare_utf8, decode_text, sniff_xml_encoding};

/// A loaded DOCX file.
#[derive(Debug, Clone)]
pub struct Docx {
    package: DocxPackage,
    main_part: String,
    source: String,
    /// The main part was not UTF-8 and its declaration must be rewritten.
    transcoded: bool,
    document: Document,
}

impl Docx {
    /// Load a DOCX from raw bytes.
    ///
    /// Fails with [`crate::Error::InvalidFormat`] before any parsing if the
    /// bytes do not start with the zip signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let package = DocxPackage::from_bytes(bytes)?;
        Self::from_package(package)
    }

    /// Load a DOCX from any [`Read`] + [`Seek`] source.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_package(package: DocxPackage) -> Result<Self> {
        let main_part = package.main_part_name()?;
        let raw = package
            .part(&main_part)
            .ok_or_else(|| crate::Error::MissingPart(main_part.clone()))?;

        let hint = sniff_xml_encoding(raw);
        let (source, transcoded) = decode_text(raw, hint.as_deref())?;
        let source = source.into_owned();
        let document = parse_document(&source)?;

        Ok(Self {
            package,
            main_part,
            source,
            transcoded,
            document,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Name of the part holding the document body (usually `word/document.xml`).
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    pub fn package(&self) -> &DocxPackage {
        &self.package
    }

    /// The main part's XML with all edits applied.
    pub fn main_part_xml(&self) -> String {
        let xml = serialize_document(&self.source, &self.document);
        if self.transcoded {
            declare_utf8(&xml).into_owned()
        } else {
            xml
        }
    }

    /// Serialize to DOCX bytes with default settings.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with_config(&WriteConfig::default())
    }

    pub fn to_bytes_with_config(&self, config: &WriteConfig) -> Result<Vec<u8>> {
        let mut cursor = io::Cursor::new(Vec::new());
        self.write_to(&mut cursor, config)?;
        Ok(cursor.into_inner())
    }

    /// Write to any [`Write`] + [`Seek`] destination.
    pub fn write_to<W: Write + Seek>(&self, writer: W, config: &WriteConfig) -> Result<()> {
        let mut package = self.package.clone();
        package.set_part(&self.main_part, self.main_part_xml().into_bytes());
        package.write_to(writer, config)
    }
}

/// Read a DOCX file from disk.
///
/// # Example
///
/// ```no_run
/// use redline::read_docx;
///
/// let docx = read_docx("resume.docx")?;
/// for text in docx.document().texts() {
///     println!("{text}");
/// }
/// # Ok::<(), redline::Error>(())
/// ```
pub fn read_docx<P: AsRef<Path>>(path: P) -> Result<Docx> {
    let bytes = std::fs::read(path)?;
    Docx::from_bytes(&bytes)
}

/// Write a DOCX file to disk.
pub fn write_docx<P: AsRef<Path>>(docx: &Docx, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    docx.write_to(file, &WriteConfig::default())
}
