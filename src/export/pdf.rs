//! Fixed-layout page export.
//!
//! Produces a single-page PDF with a heading and one line of body text. The
//! page does not reflect the document's content; it stands in for a real
//! layout conversion.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::ZlibEncoder;

/// Configuration for the placeholder page.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    /// Heading line, set in 16pt Helvetica-Bold.
    pub heading: String,
    /// Body line, set in 12pt Helvetica.
    pub body: String,
    /// Page width and height in points (US Letter by default).
    pub page_size: (u32, u32),
    /// Flate-compress the content stream.
    pub compress: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            heading: "Optimized CV".to_string(),
            body: "This is an optimized version of your CV".to_string(),
            page_size: (612, 792),
            compress: true,
        }
    }
}

/// Writes the placeholder page.
///
/// # Example
///
/// ```
/// use redline::export::PdfExporter;
///
/// let pdf = PdfExporter::new().render().unwrap();
/// assert!(pdf.starts_with(b"%PDF-1.4"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    config: PdfConfig,
}

impl PdfExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }

    pub fn render(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        self.export(&mut out)?;
        Ok(out)
    }

    /// Write the PDF to `writer`.
    pub fn export<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let content = self.content_stream();
        let (stream, filter) = if self.config.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&content)?;
            (encoder.finish()?, " /Filter /FlateDecode")
        } else {
            (content, "")
        };

        let (width, height) = self.config.page_size;
        let objects: Vec<Vec<u8>> = vec![
            b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
            b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width} {height}] \
                 /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> /Contents 6 0 R >>"
            )
            .into_bytes(),
            font_dict("Helvetica-Bold"),
            font_dict("Helvetica"),
            stream_object(&stream, filter),
        ];

        let mut pdf = Vec::with_capacity(1024 + stream.len());
        pdf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            pdf.extend_from_slice(body);
            pdf.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );

        writer.write_all(&pdf)
    }

    fn content_stream(&self) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(b"BT\n/F1 16 Tf\n100 700 Td\n");
        content.extend_from_slice(&pdf_string(&self.config.heading));
        content.extend_from_slice(b" Tj\nET\nBT\n/F2 12 Tf\n100 650 Td\n");
        content.extend_from_slice(&pdf_string(&self.config.body));
        content.extend_from_slice(b" Tj\nET\n");
        content
    }
}

fn font_dict(base_font: &str) -> Vec<u8> {
    format!("<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} /Encoding /WinAnsiEncoding >>")
        .into_bytes()
}

fn stream_object(data: &[u8], filter: &str) -> Vec<u8> {
    let mut obj = format!("<< /Length {}{filter} >>\nstream\n", data.len()).into_bytes();
    obj.extend_from_slice(data);
    obj.extend_from_slice(b"\nendstream");
    obj
}

/// Encode text as a PDF literal string for a WinAnsi Type1 font.
///
/// Characters outside Latin-1 are replaced with `?`.
fn pdf_string(text: &str) -> Vec<u8> {
    let mut out = vec![b'('];
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            ' '..='~' => out.push(c as u8),
            '\u{a0}'..='\u{ff}' => out.extend_from_slice(format!("\\{:03o}", c as u32).as_bytes()),
            _ => out.push(b'?'),
        }
    }
    out.push(b')');
    out
}
