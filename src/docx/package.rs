//! The zip container that carries a DOCX document's parts.

use std::io::{Cursor, Read, Seek, Write};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};
use crate::util::local_name;

/// Local file header signature that every zip container starts with.
pub const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Part holding the body when `[Content_Types].xml` does not name one.
pub const DEFAULT_MAIN_PART: &str = "word/document.xml";

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Content types that identify the main document part.
const MAIN_CONTENT_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml",
    "application/vnd.ms-word.document.macroEnabled.main+xml",
    "application/vnd.ms-word.template.macroEnabledTemplate.main+xml",
];

/// Reject input that is not a zip container before any parsing happens.
pub fn check_signature(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Err(Error::InvalidFormat(
            "Document content is empty".to_string(),
        ));
    }
    if bytes.len() < ZIP_SIGNATURE.len() || bytes[..4] != ZIP_SIGNATURE {
        return Err(Error::InvalidFormat(
            "File must be a valid .docx document".to_string(),
        ));
    }
    Ok(())
}

/// Configuration for writing a package back out.
#[derive(Debug, Clone, Default)]
pub struct WriteConfig {
    /// Compression level for deflated entries (0-9, default 6).
    pub compression_level: Option<u32>,
}

/// One archive entry, held in memory.
#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    is_dir: bool,
}

/// All entries of a DOCX zip container, in archive order.
#[derive(Debug, Clone)]
pub struct DocxPackage {
    entries: Vec<PackageEntry>,
}

impl DocxPackage {
    /// Read every entry of the container into memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_signature(bytes)?;
        Self::from_reader(Cursor::new(bytes))
    }

    /// Read every entry from any [`Read`] + [`Seek`] source.
    ///
    /// No signature check is done here; callers holding raw bytes should use
    /// [`DocxPackage::from_bytes`].
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let mut data = Vec::new();
            if !file.is_dir() {
                file.read_to_end(&mut data)?;
            }
            entries.push(PackageEntry {
                name: file.name().to_string(),
                data,
                compression: file.compression(),
                is_dir: file.is_dir(),
            });
        }

        Ok(Self { entries })
    }

    /// Raw bytes of the named part, if present.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| !e.is_dir && e.name == name)
            .map(|e| e.data.as_slice())
    }

    /// Replace the bytes of an existing part, or append a new deflated part.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.data = data,
            None => self.entries.push(PackageEntry {
                name: name.to_string(),
                data,
                compression: CompressionMethod::Deflated,
                is_dir: false,
            }),
        }
    }

    /// Names of all entries, in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Locate the main document part via `[Content_Types].xml`.
    pub fn main_part_name(&self) -> Result<String> {
        if let Some(types) = self.part(CONTENT_TYPES_PART)
            && let Some(name) = find_main_override(types)?
            && self.part(&name).is_some()
        {
            return Ok(name);
        }

        if self.part(DEFAULT_MAIN_PART).is_some() {
            return Ok(DEFAULT_MAIN_PART.to_string());
        }

        Err(Error::MissingPart(DEFAULT_MAIN_PART.to_string()))
    }

    /// Write the package to any [`Write`] + [`Seek`] destination.
    ///
    /// Entries keep their archive order and stored/deflated choice.
    pub fn write_to<W: Write + Seek>(&self, writer: W, config: &WriteConfig) -> Result<()> {
        let mut zip = ZipWriter::new(writer);

        let compression_level = config.compression_level.unwrap_or(6).min(9);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level as i64));

        for entry in &self.entries {
            let options = if entry.compression == CompressionMethod::Stored {
                stored
            } else {
                deflated
            };

            if entry.is_dir {
                zip.add_directory(entry.name.as_str(), options)?;
            } else {
                zip.start_file(entry.name.as_str(), options)?;
                zip.write_all(&entry.data)?;
            }
        }

        zip.finish()?;
        Ok(())
    }

    pub fn to_bytes(&self, config: &WriteConfig) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor, config)?;
        Ok(cursor.into_inner())
    }
}

/// Find the `PartName` of the main document override, without leading `/`.
fn find_main_override(types: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(types);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if local_name(e.name().as_ref()) == b"Override" => {
                let mut part_name = None;
                let mut content_type = None;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"PartName" => {
                            part_name = Some(String::from_utf8(attr.value.to_vec())?)
                        }
                        b"ContentType" => {
                            content_type = Some(String::from_utf8(attr.value.to_vec())?)
                        }
                        _ => {}
                    }
                }

                if let (Some(name), Some(ct)) = (part_name, content_type)
                    && MAIN_CONTENT_TYPES.contains(&ct.as_str())
                {
                    return Ok(Some(name.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(None)
}
