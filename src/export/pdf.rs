// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document exporters
//!
//! PDF output is feature-gated on printpdf. HTML and JSON are always
//! available.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use super::document::{Block, ExportDocument};
use crate::config::ExportConfig;
use crate::error::{Error, Result};

lazy_static! {
    static ref UNSAFE_FILE_CHARS: Regex = Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap();
}

/// Page layout in millimetres
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    /// Base font size in points
    pub font_size: f32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageOptions {
    /// A4 portrait
    pub fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 15.0,
            font_size: 10.0,
        }
    }

    /// US Letter portrait
    pub fn letter() -> Self {
        Self {
            width_mm: 215.9,
            height_mm: 279.4,
            ..Self::a4()
        }
    }

    /// Set margins uniformly
    pub fn margins(mut self, margin_mm: f32) -> Self {
        self.margin_mm = margin_mm;
        self
    }
}

impl FromStr for PageOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::a4()),
            "letter" => Ok(Self::letter()),
            other => Err(Error::Config(format!("Unknown page size '{}'", other))),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// PDF document (requires the `pdf` feature)
    Pdf,
    /// HTML page
    Html,
    /// JSON data export
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::Config(format!("Unknown export format '{}'", other))),
        }
    }
}

/// Renders documents and writes them to disk
pub trait DocumentExporter: Send + Sync {
    /// Format produced by this exporter
    fn format(&self) -> ReportFormat;

    /// Directory files are written to
    fn out_dir(&self) -> &Path;

    /// Render a document to bytes
    fn render(&self, document: &ExportDocument) -> Result<Vec<u8>>;

    /// Render and write `<out_dir>/<file_stem>.<ext>`
    fn export(&self, document: &ExportDocument, file_stem: &str) -> Result<PathBuf> {
        let data = self.render(document)?;
        fs::create_dir_all(self.out_dir())?;
        let path = self.out_dir().join(format!(
            "{}.{}",
            sanitize_file_stem(file_stem),
            self.format().extension()
        ));
        fs::write(&path, data)?;
        tracing::info!(path = %path.display(), sections = document.sections.len(), "Document exported");
        Ok(path)
    }
}

/// Replace path separators and control characters with `_`
pub fn sanitize_file_stem(stem: &str) -> String {
    let cleaned = UNSAFE_FILE_CHARS.replace_all(stem.trim(), "_");
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "export".to_string()
    } else {
        cleaned.into_owned()
    }
}

/// HTML exporter
pub struct HtmlExporter {
    out_dir: PathBuf,
}

impl HtmlExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl DocumentExporter for HtmlExporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }

    fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn render(&self, document: &ExportDocument) -> Result<Vec<u8>> {
        Ok(document.to_html().into_bytes())
    }
}

/// JSON exporter
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl DocumentExporter for JsonExporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn render(&self, document: &ExportDocument) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(document)?)
    }
}

const PT_PER_MM: f32 = 2.834_646;
// Average glyph width as a fraction of the font size
const HELVETICA_WIDTH: f32 = 0.5;
const COURIER_WIDTH: f32 = 0.6;

/// Font faces used by the PDF layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Mono,
}

/// One line of text at its final position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub face: FontFace,
    /// Font size in points
    pub size: f32,
    pub color: (u8, u8, u8),
    /// Baseline, millimetres from the bottom edge
    pub y_mm: f32,
}

/// Lay a document out on pages. Always returns at least one page.
pub fn layout(document: &ExportDocument, page: &PageOptions) -> Vec<Vec<PlacedLine>> {
    let text_width_pt = (page.width_mm - 2.0 * page.margin_mm) * PT_PER_MM;
    let top = page.height_mm - page.margin_mm;
    let bottom = page.margin_mm;
    let base = page.font_size;

    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = top;

    for block in document.to_blocks() {
        let (text, face, size, color) = match block {
            Block::Title(text) => (text, FontFace::Bold, base * 1.8, (37, 99, 235)),
            Block::Heading(text) => (text, FontFace::Bold, base * 1.4, (30, 64, 175)),
            Block::Subheading(text) => (text, FontFace::Bold, base * 1.2, (51, 51, 51)),
            Block::Note(text) => (text, FontFace::Regular, base * 0.8, (107, 114, 128)),
            Block::Field(label, value) if value.is_empty() => {
                (format!("{}:", label), FontFace::Bold, base, (51, 51, 51))
            }
            Block::Field(label, value) => {
                (format!("{}: {}", label, value), FontFace::Regular, base, (51, 51, 51))
            }
            Block::Code(text) => (text, FontFace::Mono, base * 0.9, (30, 41, 59)),
            Block::Status { text, class } => (text, FontFace::Bold, base, class.color()),
            Block::Spacer => {
                y -= base * 0.6 / PT_PER_MM;
                continue;
            }
            Block::Rule => {
                let width = chars_per_line(text_width_pt, base, COURIER_WIDTH);
                ("_".repeat(width), FontFace::Mono, base, (229, 231, 235))
            }
        };

        let glyph = if face == FontFace::Mono { COURIER_WIDTH } else { HELVETICA_WIDTH };
        let line_height = size * 1.35 / PT_PER_MM;

        for line in wrap(&text, chars_per_line(text_width_pt, size, glyph)) {
            if y - line_height < bottom {
                pages.push(Vec::new());
                y = top;
            }
            y -= line_height;
            if !line.is_empty() {
                if let Some(current) = pages.last_mut() {
                    current.push(PlacedLine {
                        text: line,
                        face,
                        size,
                        color,
                        y_mm: y,
                    });
                }
            }
        }
    }

    pages
}

fn chars_per_line(width_pt: f32, font_size: f32, glyph_width: f32) -> usize {
    ((width_pt / (font_size * glyph_width)).floor() as usize).max(1)
}

/// Wrap text to `max` characters per line, breaking at spaces when
/// possible. Builtin PDF fonts only cover ASCII; anything else becomes `?`.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.lines() {
        let line: String = raw
            .replace('\t', "    ")
            .chars()
            .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
            .collect();

        let mut rest = line.as_str();
        while rest.len() > max {
            let cut = rest[..max].rfind(' ').filter(|&i| i > 0).unwrap_or(max);
            out.push(rest[..cut].to_string());
            rest = rest[cut..].strip_prefix(' ').unwrap_or(&rest[cut..]);
        }
        out.push(rest.to_string());
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Text-layout PDF exporter using printpdf
#[cfg(feature = "pdf")]
pub struct PdfExporter {
    out_dir: PathBuf,
    page: PageOptions,
}

#[cfg(feature = "pdf")]
impl PdfExporter {
    pub fn new(out_dir: impl Into<PathBuf>, page: PageOptions) -> Self {
        Self {
            out_dir: out_dir.into(),
            page,
        }
    }
}

#[cfg(feature = "pdf")]
impl DocumentExporter for PdfExporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn render(&self, document: &ExportDocument) -> Result<Vec<u8>> {
        use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rgb};

        let page = &self.page;
        let (pdf_doc, page1, layer1) = PdfDocument::new(
            document.title.as_str(),
            Mm(page.width_mm),
            Mm(page.height_mm),
            "Layer 1",
        );

        let regular = pdf_doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::pdf(format!("Font error: {:?}", e)))?;
        let bold = pdf_doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::pdf(format!("Font error: {:?}", e)))?;
        let mono = pdf_doc
            .add_builtin_font(BuiltinFont::Courier)
            .map_err(|e| Error::pdf(format!("Font error: {:?}", e)))?;

        for (index, lines) in layout(document, page).into_iter().enumerate() {
            let layer = if index == 0 {
                pdf_doc.get_page(page1).get_layer(layer1)
            } else {
                let (next_page, next_layer) =
                    pdf_doc.add_page(Mm(page.width_mm), Mm(page.height_mm), "Layer 1");
                pdf_doc.get_page(next_page).get_layer(next_layer)
            };

            for line in lines {
                let font = match line.face {
                    FontFace::Regular => &regular,
                    FontFace::Bold => &bold,
                    FontFace::Mono => &mono,
                };
                let (r, g, b) = line.color;
                layer.set_fill_color(Color::Rgb(Rgb::new(
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                    None,
                )));
                layer.use_text(line.text, line.size, Mm(page.margin_mm), Mm(line.y_mm), font);
            }
        }

        let mut buffer = Vec::new();
        pdf_doc
            .save(&mut std::io::BufWriter::new(&mut buffer))
            .map_err(|e| Error::pdf(format!("PDF save error: {:?}", e)))?;

        Ok(buffer)
    }
}

/// Exporter used when the requested format is not compiled in
pub struct NullExporter {
    out_dir: PathBuf,
}

impl NullExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl DocumentExporter for NullExporter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn render(&self, _document: &ExportDocument) -> Result<Vec<u8>> {
        Err(Error::Config(
            "PDF export is disabled. Enable the 'pdf' feature.".into(),
        ))
    }
}

/// Create the exporter for the configured format
pub fn create_exporter(config: &ExportConfig) -> Box<dyn DocumentExporter> {
    match config.format {
        ReportFormat::Html => Box::new(HtmlExporter::new(config.out_dir.clone())),
        ReportFormat::Json => Box::new(JsonExporter::new(config.out_dir.clone())),
        ReportFormat::Pdf => {
            #[cfg(feature = "pdf")]
            {
                Box::new(PdfExporter::new(config.out_dir.clone(), config.page.clone()))
            }

            #[cfg(not(feature = "pdf"))]
            {
                Box::new(NullExporter::new(config.out_dir.clone()))
            }
        }
    }
}
