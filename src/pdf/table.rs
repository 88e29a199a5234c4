//! Table layout with automatic pagination
//!
//! Turns rows of cell text into positioned rows spread over as many pages as
//! needed. Nothing here touches lopdf; [`super::report`] draws the result.

use crate::layout::Length;
use crate::record::Article;
use super::fonts::StandardFont;

/// Column headers of the report table
pub const REPORT_COLUMNS: [&str; 5] = ["Title", "Category", "Author", "Publish Date", "Content"];

/// RGB color with 0-255 components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Components scaled to the 0.0-1.0 range PDF color operators take
    pub fn components(&self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

/// Visual style of the table
#[derive(Debug, Clone)]
pub struct TableStyle {
    /// Font size in points
    pub font_size: f64,
    /// Multiplier of the font size giving the distance between baselines
    pub line_height_factor: f64,
    pub cell_padding: Length,
    pub head_fill: Rgb,
    pub head_text: Rgb,
    pub body_fill: Rgb,
    pub body_text: Rgb,
    pub grid_color: Rgb,
    pub grid_width: Length,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            line_height_factor: 1.15,
            cell_padding: Length::from_mm(4.0),
            head_fill: Rgb(255, 68, 51),
            head_text: Rgb::WHITE,
            body_fill: Rgb::WHITE,
            body_text: Rgb::BLACK,
            grid_color: Rgb(200, 200, 200),
            grid_width: Length::from_mm(0.1),
        }
    }
}

impl TableStyle {
    /// Distance between baselines
    pub fn line_height(&self) -> Length {
        Length::from_pt(self.font_size * self.line_height_factor)
    }

    fn row_height(&self, lines: usize) -> Length {
        Length::from_mm(lines.max(1) as f64 * self.line_height().mm() + 2.0 * self.cell_padding.mm())
    }
}

/// Where the table may be placed on each page (all values from the page top)
#[derive(Debug, Clone, Copy)]
pub struct TableGeometry {
    /// Left edge of the table
    pub left: Length,
    /// Total table width
    pub width: Length,
    /// Top of the table on the first page (below the header band)
    pub first_page_top: Length,
    /// Top of the table on continuation pages
    pub continuation_top: Length,
    /// Lowest point any row may reach
    pub bottom: Length,
}

/// One row placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub top: Length,
    pub height: Length,
    /// Wrapped lines of each cell
    pub cells: Vec<Vec<String>>,
    pub is_header: bool,
}

/// Rows that land on one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TablePage {
    pub rows: Vec<PlacedRow>,
}

impl TablePage {
    pub fn body_rows(&self) -> impl Iterator<Item = &PlacedRow> {
        self.rows.iter().filter(|r| !r.is_header)
    }
}

/// Complete table layout
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub column_widths: Vec<Length>,
    pub pages: Vec<TablePage>,
}

impl TableLayout {
    /// X offset of column `index` measured from the table's left edge
    pub fn column_offset(&self, index: usize) -> Length {
        Length::from_mm(self.column_widths[..index].iter().map(Length::mm).sum())
    }
}

/// Cell text for the five report columns
///
/// Content is the full text here; only the on-screen table truncates it.
pub fn report_rows(articles: &[Article]) -> Vec<Vec<String>> {
    articles
        .iter()
        .map(|a| {
            vec![
                a.title_or_default().to_string(),
                a.category_or_default().to_string(),
                a.author_or_default().to_string(),
                a.publish_date_display().to_string(),
                a.content_or_default().to_string(),
            ]
        })
        .collect()
}

/// Lay out `headers` and `rows` over as many pages as needed
///
/// The header row repeats at the top of every page. A row that does not fit
/// below the previous one moves to the next page; a row taller than a whole
/// page is split by lines.
pub fn layout_table(
    headers: &[&str],
    rows: &[Vec<String>],
    geometry: &TableGeometry,
    style: &TableStyle,
) -> TableLayout {
    let column_widths = column_widths(headers, rows, geometry.width, style);
    let text_widths: Vec<f64> = column_widths
        .iter()
        .map(|w| (w.pt() - 2.0 * style.cell_padding.pt()).max(1.0))
        .collect();

    let header_cells: Vec<Vec<String>> = headers
        .iter()
        .zip(&text_widths)
        .map(|(h, w)| wrap_text(h, StandardFont::HelveticaBold, style.font_size, *w))
        .collect();
    let header_height = style.row_height(max_lines(&header_cells));

    let mut pages = Vec::new();
    let mut page = TablePage::default();
    let mut y = place_header(&mut page, &header_cells, header_height, geometry.first_page_top);

    let fresh_page_space = geometry.bottom.mm() - geometry.continuation_top.mm() - header_height.mm();
    let line_mm = style.line_height().mm();
    let padding_mm = style.cell_padding.mm();

    for row in rows {
        let mut remaining: Vec<Vec<String>> = row
            .iter()
            .zip(&text_widths)
            .map(|(text, w)| wrap_text(text, StandardFont::Helvetica, style.font_size, *w))
            .collect();

        loop {
            let height = style.row_height(max_lines(&remaining));
            if y + height.mm() <= geometry.bottom.mm() + 1e-9 {
                page.rows.push(PlacedRow {
                    top: Length::from_mm(y),
                    height,
                    cells: remaining,
                    is_header: false,
                });
                y += height.mm();
                break;
            }

            if height.mm() <= fresh_page_space {
                pages.push(std::mem::take(&mut page));
                y = place_header(&mut page, &header_cells, header_height, geometry.continuation_top);
                continue;
            }

            // Taller than a whole page: fill what is left here, carry the rest
            let space = geometry.bottom.mm() - y - 2.0 * padding_mm;
            let lines_fit = if space > 0.0 { (space / line_mm).floor() as usize } else { 0 };
            if lines_fit > 0 {
                let (head, tail) = split_lines(remaining, lines_fit);
                let chunk_height = style.row_height(max_lines(&head));
                page.rows.push(PlacedRow {
                    top: Length::from_mm(y),
                    height: chunk_height,
                    cells: head,
                    is_header: false,
                });
                y += chunk_height.mm();
                if tail.iter().all(Vec::is_empty) {
                    break;
                }
                remaining = tail;
            }
            pages.push(std::mem::take(&mut page));
            y = place_header(&mut page, &header_cells, header_height, geometry.continuation_top);
        }
    }
    pages.push(page);

    TableLayout { column_widths, pages }
}

fn place_header(page: &mut TablePage, cells: &[Vec<String>], height: Length, top: Length) -> f64 {
    page.rows.push(PlacedRow {
        top,
        height,
        cells: cells.to_vec(),
        is_header: true,
    });
    top.mm() + height.mm()
}

fn max_lines(cells: &[Vec<String>]) -> usize {
    cells.iter().map(Vec::len).max().unwrap_or(1)
}

/// Split every cell after `n` lines
fn split_lines(cells: Vec<Vec<String>>, n: usize) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    cells
        .into_iter()
        .map(|mut lines| {
            let tail = if lines.len() > n { lines.split_off(n) } else { Vec::new() };
            (lines, tail)
        })
        .unzip()
}

/// Distribute `available` width over the columns
///
/// Columns whose text fits on one line within an even share get exactly
/// what they need; the rest share what is left in proportion to their
/// natural width. If everything fits on one line the surplus is spread
/// proportionally so the table spans the full width.
pub fn column_widths(
    headers: &[&str],
    rows: &[Vec<String>],
    available: Length,
    style: &TableStyle,
) -> Vec<Length> {
    let padding = 2.0 * style.cell_padding.mm();
    let natural: Vec<f64> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let head = Length::from_pt(StandardFont::HelveticaBold.text_width(header, style.font_size));
            let body = rows
                .iter()
                .filter_map(|row| row.get(i))
                .flat_map(|cell| cell.lines())
                .map(|line| Length::from_pt(StandardFont::Helvetica.text_width(line, style.font_size)).mm())
                .fold(0.0_f64, f64::max);
            head.mm().max(body) + padding
        })
        .collect();

    let total: f64 = natural.iter().sum();
    if total <= available.mm() || total == 0.0 {
        let scale = if total > 0.0 { available.mm() / total } else { 0.0 };
        return natural.iter().map(|w| Length::from_mm(w * scale)).collect();
    }

    let mut widths: Vec<Option<f64>> = vec![None; natural.len()];
    let mut remaining = available.mm();
    loop {
        let open: Vec<usize> = (0..natural.len()).filter(|&i| widths[i].is_none()).collect();
        if open.is_empty() {
            break;
        }
        let share = remaining / open.len() as f64;
        let settled: Vec<usize> = open.iter().copied().filter(|&i| natural[i] <= share).collect();
        if settled.is_empty() {
            let open_total: f64 = open.iter().map(|&i| natural[i]).sum();
            for &i in &open {
                widths[i] = Some(remaining * natural[i] / open_total);
            }
            break;
        }
        for i in settled {
            widths[i] = Some(natural[i]);
            remaining -= natural[i];
        }
    }

    widths
        .into_iter()
        .map(|w| Length::from_mm(w.unwrap_or(0.0)))
        .collect()
}

/// Wrap text into lines no wider than `max_width` points
///
/// Breaks at whitespace; a single word wider than the line is broken between
/// characters. Explicit newlines are kept. Always returns at least one line.
pub fn wrap_text(text: &str, font: StandardFont, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if font.text_width(&candidate, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if font.text_width(word, size) <= max_width {
                current = word.to_string();
            } else {
                for c in word.chars() {
                    let mut next = current.clone();
                    next.push(c);
                    if !current.is_empty() && font.text_width(&next, size) > max_width {
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    } else {
                        current = next;
                    }
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
