//! Paginated plain-text table of the loaded articles

use unicode_width::UnicodeWidthStr;

use crate::fetch::ViewState;
use crate::pdf::Branding;
use crate::record::{Article, NOT_AVAILABLE};

/// Page sizes offered to the user
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

pub const LOADING_MESSAGE: &str = "Loading...";

const HEADERS: [&str; 6] = ["Image", "Title", "Category", "Author", "Publish Date", "Content"];

/// Current page index and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub rows_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: ROWS_PER_PAGE_OPTIONS[0],
        }
    }
}

impl Pagination {
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the page size; always returns to the first page
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page;
        self.page = 0;
    }

    fn start(&self) -> usize {
        self.page.saturating_mul(self.rows_per_page)
    }
}

/// Slice `records[page*size .. page*size+size]`, clamped to the list
pub fn page_window<'a>(records: &'a [Article], pagination: &Pagination) -> &'a [Article] {
    let start = pagination.start().min(records.len());
    let end = start.saturating_add(pagination.rows_per_page).min(records.len());
    &records[start..end]
}

/// Number of pages needed to show `total` records
pub fn page_count(total: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 0;
    }
    total.div_ceil(rows_per_page)
}

/// Summary such as `6–10 of 12`
///
/// `from` is not clamped, so a page past the end reads e.g. `26–12 of 12`.
pub fn range_label(total: usize, pagination: &Pagination) -> String {
    if total == 0 {
        return "0–0 of 0".to_string();
    }
    let from = pagination.start().saturating_add(1);
    let to = pagination.start().saturating_add(pagination.rows_per_page).min(total);
    format!("{}–{} of {}", from, to, total)
}

/// Display cells for one table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub image: String,
    pub title: String,
    pub category: String,
    pub author: String,
    pub publish_date: String,
    pub content: String,
}

impl TableRow {
    pub fn from_article(article: &Article) -> Self {
        Self {
            image: if article.has_image() { "[image]" } else { NOT_AVAILABLE }.to_string(),
            title: article.title_or_default().to_string(),
            category: article.category_or_default().to_string(),
            author: article.author_or_default().to_string(),
            publish_date: article.publish_date_display().to_string(),
            content: article.content_preview().to_string(),
        }
    }

    fn cells(&self) -> [&str; 6] {
        [
            &self.image,
            &self.title,
            &self.category,
            &self.author,
            &self.publish_date,
            &self.content,
        ]
    }
}

/// Render the whole view for the current state
///
/// While loading only the loading notice is shown; after a failed fetch only
/// the error text is shown and the table is never drawn.
pub fn render_view(state: &ViewState, pagination: &Pagination, branding: &Branding) -> String {
    if state.loading {
        return LOADING_MESSAGE.to_string();
    }
    if let Some(ref error) = state.error {
        return error.clone();
    }

    let mut out = String::new();
    out.push_str(&branding.organisation);
    out.push('\n');
    out.push_str(&branding.address);
    out.push('\n');
    out.push_str(&branding.screen_contact_line());
    out.push('\n');
    out.push_str(&branding.report_title);
    out.push_str("\n\n");

    let rows: Vec<TableRow> = page_window(&state.articles, pagination)
        .iter()
        .map(TableRow::from_article)
        .collect();
    out.push_str(&render_table(&rows));
    out.push('\n');

    out.push_str(&format!(
        "Rows per page: {}  {}",
        pagination.rows_per_page,
        range_label(state.articles.len(), pagination)
    ));
    out
}

/// Render rows as an aligned text table with a header line
pub fn render_table(rows: &[TableRow]) -> String {
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.width()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(single_line(cell).width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule_refs: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule_refs, &widths);

    for row in rows {
        let cells: Vec<String> = row.cells().iter().map(|c| single_line(c)).collect();
        let cell_refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        push_line(&mut out, &cell_refs, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

/// Collapse line breaks so each record stays on one line
fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: Some(format!("Article {}", i)),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_window_sizes() {
        let records = articles(12);
        let mut pagination = Pagination::default();
        assert_eq!(page_window(&records, &pagination).len(), 5);

        pagination.set_page(2);
        let window = page_window(&records, &pagination);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].title.as_deref(), Some("Article 10"));

        pagination.set_page(3);
        assert!(page_window(&records, &pagination).is_empty());
    }

    #[test]
    fn test_window_matches_formula() {
        let records = articles(23);
        for &size in &ROWS_PER_PAGE_OPTIONS {
            for page in 0..6 {
                let pagination = Pagination { page, rows_per_page: size };
                let expected = size.min(23usize.saturating_sub(page * size));
                assert_eq!(page_window(&records, &pagination).len(), expected);
            }
        }
    }

    #[test]
    fn test_changing_rows_per_page_resets_page() {
        let mut pagination = Pagination { page: 3, rows_per_page: 5 };
        pagination.set_rows_per_page(10);
        assert_eq!(pagination, Pagination { page: 0, rows_per_page: 10 });

        pagination.set_page(1);
        pagination.set_rows_per_page(10);
        assert_eq!(pagination.page, 0);
    }

    #[test]
    fn test_page_count_and_range_label() {
        assert_eq!(page_count(12, 5), 3);
        assert_eq!(page_count(10, 5), 2);
        assert_eq!(page_count(0, 5), 0);

        let pagination = Pagination { page: 1, rows_per_page: 5 };
        assert_eq!(range_label(12, &pagination), "6–10 of 12");
        assert_eq!(range_label(0, &Pagination::default()), "0–0 of 0");
        let last = Pagination { page: 2, rows_per_page: 5 };
        assert_eq!(range_label(12, &last), "11–12 of 12");
    }

    #[test]
    fn test_range_label_past_last_page() {
        let records = articles(12);
        let pagination = Pagination { page: 5, rows_per_page: 5 };
        assert!(page_window(&records, &pagination).is_empty());
        assert_eq!(range_label(12, &pagination), "26–12 of 12");
    }

    #[test]
    fn test_row_fallbacks() {
        let row = TableRow::from_article(&Article::default());
        assert_eq!(row.image, "N/A");
        assert_eq!(row.title, "Untitled");
        assert_eq!(row.category, "Unknown");
        assert_eq!(row.author, "Anonymous");
        assert_eq!(row.publish_date, "N/A");
        assert_eq!(row.content, "No Content");
    }

    #[test]
    fn test_loading_and_error_views() {
        let branding = Branding::default();
        let pagination = Pagination::default();
        assert_eq!(render_view(&ViewState::default(), &pagination, &branding), "Loading...");

        let failed = render_view(&ViewState::failed(), &pagination, &branding);
        assert_eq!(failed, "Failed to load articles.");
        assert!(!failed.contains("Title"));
    }

    #[test]
    fn test_loaded_view_shows_window_and_summary() {
        let state = ViewState::loaded(articles(7));
        let view = render_view(&state, &Pagination::default(), &Branding::default());

        assert!(view.starts_with("Tenet Health"));
        assert!(view.contains("Contact: 0114 700 700"));
        assert!(!view.contains("Contact - "));
        assert!(view.contains("Article Report"));
        assert!(view.contains("Article 4"));
        assert!(!view.contains("Article 5"));
        assert!(view.ends_with("Rows per page: 5  1–5 of 7"));
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![TableRow::from_article(&Article {
            title: Some("A much longer title".to_string()),
            content: Some("line one\nline two".to_string()),
            ..Default::default()
        })];
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].find("| Category"), lines[2].find("| Unknown"));
        assert!(lines[2].contains("line one line two"));
    }
}
