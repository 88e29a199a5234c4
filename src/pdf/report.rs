//! Branded PDF report of all articles
//!
//! The report is an A3 portrait document: a colored header band with logo,
//! organisation name, report title, address and contact lines on the first
//! page, followed by the article table (see [`super::table`]) and a
//! "Page X of Y" footer on every page.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::{debug, info};

use crate::error::Result;
use crate::layout::{content_bottom, content_width, Length, Margins, PageDimensions};
use crate::record::Article;
use super::fonts::{add_standard_fonts, encode_win_ansi, StandardFont};
use super::logo::{LogoImage, LogoSource};
use super::table::{
    layout_table, report_rows, PlacedRow, Rgb, TableGeometry, TableLayout, TableStyle,
    REPORT_COLUMNS,
};

/// File name used when no output path is given
pub const DEFAULT_REPORT_FILENAME: &str = "article_report.pdf";

const LOGO_RESOURCE: &str = "Logo";

const HEADER_BAND_TOP_MM: f64 = 15.0;
const HEADER_BAND_HEIGHT_MM: f64 = 50.0;
const LOGO_SIZE_MM: f64 = 40.0;
const RULE_OFFSET_MM: f64 = 55.0;
const TABLE_OFFSET_MM: f64 = 56.0;
const FOOTER_FROM_BOTTOM_MM: f64 = 10.0;

const BAND_FILL: Rgb = Rgb(128, 0, 128);
const YELLOW: Rgb = Rgb(255, 255, 0);
const FOOTER_GRAY: Rgb = Rgb(128, 128, 128);

/// Fixed text printed in the header band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub organisation: String,
    pub report_title: String,
    pub address: String,
    pub phone: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            organisation: "Tenet Health".to_string(),
            report_title: "Article Report".to_string(),
            address: "139 Srimath Anagarika Dharmapala Mawatha, Colombo 07".to_string(),
            phone: "0114 700 700".to_string(),
        }
    }
}

impl Branding {
    /// Contact line as printed in the PDF header band
    pub fn report_contact_line(&self) -> String {
        format!("Contact - {}", self.phone)
    }

    /// Contact line as shown above the on-screen table
    pub fn screen_contact_line(&self) -> String {
        format!("Contact: {}", self.phone)
    }
}

/// Options for exporting the report
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub branding: Branding,
    pub logo: LogoSource,
    /// Where the finished PDF is saved
    pub output_path: PathBuf,
    pub page: PageDimensions,
    pub margins: Margins,
    pub table_style: TableStyle,
    /// Timeout for downloading the logo
    pub http_timeout: Duration,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            branding: Branding::default(),
            logo: LogoSource::default(),
            output_path: PathBuf::from(DEFAULT_REPORT_FILENAME),
            page: PageDimensions::a3(),
            margins: Margins::report(),
            table_style: TableStyle::default(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

/// Build the report and save it to `options.output_path`
///
/// The whole document is assembled in memory first, so nothing is written
/// when the logo or layout fails.
///
/// # Example
///
/// ```no_run
/// use article_report::pdf::{export_report, ReportOptions};
/// use article_report::Article;
///
/// let articles = vec![Article {
///     title: Some("Heart Health".to_string()),
///     ..Default::default()
/// }];
/// export_report(&articles, &ReportOptions::default()).expect("Failed to export report");
/// ```
pub fn export_report(articles: &[Article], options: &ReportOptions) -> Result<PathBuf> {
    let logo = LogoImage::load(&options.logo, options.http_timeout)?;
    let mut doc = build_report(articles, logo.as_ref(), options)?;

    save_document(&mut doc, &options.output_path)?;
    info!(
        path = %options.output_path.display(),
        records = articles.len(),
        "saved report"
    );
    Ok(options.output_path.clone())
}

fn save_document(doc: &mut Document, path: &Path) -> Result<()> {
    doc.compress();
    doc.save(path)?;
    Ok(())
}

/// Assemble the report document in memory
pub fn build_report(
    articles: &[Article],
    logo: Option<&LogoImage>,
    options: &ReportOptions,
) -> Result<Document> {
    let page = options.page;
    let margins = options.margins;
    let style = &options.table_style;

    let geometry = TableGeometry {
        left: margins.left,
        width: content_width(&page, &margins),
        first_page_top: Length::from_mm(HEADER_BAND_TOP_MM + TABLE_OFFSET_MM),
        continuation_top: margins.top,
        bottom: content_bottom(&page, &margins),
    };
    let rows = report_rows(articles);
    let table = layout_table(&REPORT_COLUMNS, &rows, &geometry, style);
    let total_pages = table.pages.len();
    debug!(records = articles.len(), pages = total_pages, "laid out report table");

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(add_standard_fonts(&mut doc)));
    if let Some(logo) = logo {
        let logo_id = logo.add_to_document(&mut doc);
        let mut xobjects = Dictionary::new();
        xobjects.set(LOGO_RESOURCE, Object::Reference(logo_id));
        resources.set("XObject", Object::Dictionary(xobjects));
    }
    let resources_id = doc.add_object(Object::Dictionary(resources));

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(total_pages);
    for (index, table_page) in table.pages.iter().enumerate() {
        let mut painter = Painter::new(page);

        if index == 0 {
            draw_header_band(&mut painter, &options.branding, logo.is_some(), &margins);
        }
        for row in &table_page.rows {
            draw_row(&mut painter, &table, row, &geometry, style);
        }
        draw_footer(&mut painter, index + 1, total_pages, &margins);

        let content = Content { operations: painter.finish() };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_id));
        page_dict.set("Contents", Object::Reference(content_id));
        page_ids.push(doc.add_object(Object::Dictionary(page_dict)));
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Kids", Object::Array(page_ids.iter().map(|&id| Object::Reference(id)).collect()));
    pages.set("Count", Object::Integer(page_ids.len() as i64));
    pages.set("Resources", Object::Reference(resources_id));
    pages.set("MediaBox", Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(page.width.pt() as f32),
        Object::Real(page.height.pt() as f32),
    ]));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(Object::Dictionary(info_dictionary(&options.branding)));
    doc.trailer.set("Info", Object::Reference(info_id));

    Ok(doc)
}

fn info_dictionary(branding: &Branding) -> Dictionary {
    let created = Local::now().format("D:%Y%m%d%H%M%S").to_string();

    let mut info = Dictionary::new();
    info.set("Title", Object::string_literal(branding.report_title.as_str()));
    info.set("Author", Object::string_literal(branding.organisation.as_str()));
    info.set("Producer", Object::string_literal(concat!(
        env!("CARGO_PKG_NAME"),
        " ",
        env!("CARGO_PKG_VERSION")
    )));
    info.set("CreationDate", Object::string_literal(created));
    info
}

/// Horizontal alignment of a text run relative to its anchor x
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Center,
    Right,
}

/// Collects content stream operations using top-left millimeter coordinates
struct Painter {
    page: PageDimensions,
    ops: Vec<Operation>,
}

impl Painter {
    fn new(page: PageDimensions) -> Self {
        Self { page, ops: Vec::new() }
    }

    fn finish(self) -> Vec<Operation> {
        self.ops
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    fn fill_color(&mut self, color: Rgb) {
        self.op("rg", reals(&color.components()));
    }

    fn stroke_color(&mut self, color: Rgb) {
        self.op("RG", reals(&color.components()));
    }

    /// Rectangle with its top-left corner at (x, y)
    fn rect(&mut self, x: Length, y: Length, width: Length, height: Length, operator: &str) {
        let bottom = self.page.pdf_y(Length::from_mm(y.mm() + height.mm()));
        self.op("re", reals(&[x.pt() as f32, bottom as f32, width.pt() as f32, height.pt() as f32]));
        self.op(operator, vec![]);
    }

    fn line(&mut self, from: (Length, Length), to: (Length, Length), width: Length) {
        self.op("w", reals(&[width.pt() as f32]));
        self.op("m", reals(&[from.0.pt() as f32, self.page.pdf_y(from.1) as f32]));
        self.op("l", reals(&[to.0.pt() as f32, self.page.pdf_y(to.1) as f32]));
        self.op("S", vec![]);
    }

    /// Text run whose baseline sits `baseline` below the page top
    fn text(&mut self, text: &str, font: StandardFont, size: f64, x: Length, baseline: Length, align: Align) {
        let width = font.text_width(text, size);
        let x = match align {
            Align::Center => x.pt() - width / 2.0,
            Align::Right => x.pt() - width,
        };

        self.op("BT", vec![]);
        self.op("Tf", vec![
            Object::Name(font.resource_name().as_bytes().to_vec()),
            Object::Real(size as f32),
        ]);
        self.op("Td", reals(&[x as f32, self.page.pdf_y(baseline) as f32]));
        self.op("Tj", vec![Object::String(encode_win_ansi(text), StringFormat::Literal)]);
        self.op("ET", vec![]);
    }

    fn image(&mut self, name: &str, x: Length, y: Length, width: Length, height: Length) {
        let bottom = self.page.pdf_y(Length::from_mm(y.mm() + height.mm()));
        self.op("q", vec![]);
        self.op("cm", reals(&[width.pt() as f32, 0.0, 0.0, height.pt() as f32, x.pt() as f32, bottom as f32]));
        self.op("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.op("Q", vec![]);
    }
}

fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().map(|&v| Object::Real(v)).collect()
}

fn draw_header_band(painter: &mut Painter, branding: &Branding, with_logo: bool, margins: &Margins) {
    let top = HEADER_BAND_TOP_MM;
    let width = content_width(&painter.page, margins);
    let center = Length::from_mm(painter.page.width.mm() / 2.0);

    painter.fill_color(BAND_FILL);
    painter.rect(margins.left, Length::from_mm(top), width, Length::from_mm(HEADER_BAND_HEIGHT_MM), "f");

    if with_logo {
        let size = Length::from_mm(LOGO_SIZE_MM);
        painter.image(LOGO_RESOURCE, margins.left, Length::from_mm(top), size, size);
    }

    let contact = branding.report_contact_line();
    let lines = [
        (branding.organisation.as_str(), StandardFont::CourierBold, 22.0, YELLOW, 15.0),
        (branding.report_title.as_str(), StandardFont::CourierBold, 17.0, YELLOW, 25.0),
        (branding.address.as_str(), StandardFont::CourierBold, 12.0, Rgb::WHITE, 35.0),
        (contact.as_str(), StandardFont::CourierBold, 12.0, YELLOW, 45.0),
    ];
    for (text, font, size, color, offset) in lines {
        painter.fill_color(color);
        painter.text(text, font, size, center, Length::from_mm(top + offset), Align::Center);
    }

    painter.stroke_color(Rgb::WHITE);
    painter.line(
        (margins.left, Length::from_mm(top + RULE_OFFSET_MM)),
        (Length::from_mm(painter.page.width.mm() - margins.right.mm()), Length::from_mm(top + RULE_OFFSET_MM)),
        Length::from_mm(0.5),
    );
}

fn draw_row(painter: &mut Painter, table: &TableLayout, row: &PlacedRow, geometry: &TableGeometry, style: &TableStyle) {
    let (fill, text_color, font) = if row.is_header {
        (style.head_fill, style.head_text, StandardFont::HelveticaBold)
    } else {
        (style.body_fill, style.body_text, StandardFont::Helvetica)
    };
    let line_height = style.line_height().mm();
    let cap_height = Length::from_pt(style.font_size * 0.718).mm();

    for (column, lines) in row.cells.iter().enumerate() {
        let x = Length::from_mm(geometry.left.mm() + table.column_offset(column).mm());
        let width = table.column_widths[column];

        painter.fill_color(fill);
        painter.rect(x, row.top, width, row.height, "f");
        if !row.is_header {
            painter.stroke_color(style.grid_color);
            painter.op("w", reals(&[style.grid_width.pt() as f32]));
            painter.rect(x, row.top, width, row.height, "S");
        }

        // Vertically centered block of lines, each line centered horizontally
        let block = lines.len() as f64 * line_height;
        let block_top = row.top.mm() + (row.height.mm() - block) / 2.0;
        let center = Length::from_mm(x.mm() + width.mm() / 2.0);

        painter.fill_color(text_color);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = block_top + i as f64 * line_height + (line_height + cap_height) / 2.0;
            painter.text(line, font, style.font_size, center, Length::from_mm(baseline), Align::Center);
        }
    }
}

fn draw_footer(painter: &mut Painter, page_number: usize, total_pages: usize, margins: &Margins) {
    let text = format!("Page {} of {}", page_number, total_pages);
    let x = Length::from_mm(painter.page.width.mm() - margins.right.mm());
    let baseline = Length::from_mm(painter.page.height.mm() - FOOTER_FROM_BOTTOM_MM);

    painter.fill_color(FOOTER_GRAY);
    painter.text(&text, StandardFont::Helvetica, 10.0, x, baseline, Align::Right);
}
