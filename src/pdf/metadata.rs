//! Reading back a saved report

use std::path::Path;
use lopdf::{Document, Object};
use crate::error::{Error, Result};

/// Count pages by reading the Count field from the Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog = doc.catalog()?;

    let pages_id = match catalog.get(b"Pages") {
        Ok(Object::Reference(id)) => *id,
        Ok(_) => return Err(Error::General("Pages is not a reference".to_string())),
        Err(_) => return Err(Error::General("No Pages in catalog".to_string())),
    };

    let pages_dict = doc.get_dictionary(pages_id)?;

    match pages_dict.get(b"Count") {
        Ok(Object::Integer(n)) if *n >= 0 => Ok(*n as usize),
        Ok(_) => Err(Error::General("Count is not a valid integer".to_string())),
        Err(_) => Err(Error::General("No Count in Pages".to_string())),
    }
}

/// Summary of a report PDF
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Document author (if present)
    pub author: Option<String>,
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<ReportMetadata> {
    let doc = load_existing(path)?;
    let page_count = count_pages_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).ok(),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    };
    let info_string = |key: &[u8]| {
        info.and_then(|dict| dict.get(key).ok())
            .and_then(|obj| obj.as_str().ok())
            .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
    };

    Ok(ReportMetadata {
        page_count,
        title: info_string(b"Title"),
        author: info_string(b"Author"),
    })
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<usize> {
    let doc = load_existing(path)?;
    let page_count = count_pages_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}

fn load_existing(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    Ok(Document::load(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{build_report, ReportOptions};
    use tempfile::TempDir;

    #[test]
    fn test_count_pages_nonexistent_file() {
        let result = count_pages(Path::new("nonexistent.pdf"));
        assert!(matches!(result.unwrap_err(), Error::FileNotFound(_)));
    }

    #[test]
    fn test_extract_metadata_nonexistent_file() {
        let result = extract_metadata(Path::new("nonexistent.pdf"));
        assert!(matches!(result.unwrap_err(), Error::FileNotFound(_)));
    }

    #[test]
    fn test_metadata_of_saved_report() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("report.pdf");

        let mut doc = build_report(&[], None, &ReportOptions::default()).expect("build");
        doc.compress();
        doc.save(&path).expect("save");

        let metadata = extract_metadata(&path).expect("metadata");
        assert_eq!(metadata.page_count, 1);
        assert_eq!(metadata.title.as_deref(), Some("Article Report"));
        assert_eq!(metadata.author.as_deref(), Some("Tenet Health"));
        assert_eq!(count_pages(&path).expect("count"), 1);
    }
}
