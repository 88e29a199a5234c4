//! PDF report module

pub mod fonts;
pub mod logo;
pub mod metadata;
pub mod report;
pub mod table;

// Re-export commonly used items
pub use logo::{LogoImage, LogoSource, DEFAULT_LOGO_URL};
pub use metadata::{count_pages, extract_metadata, ReportMetadata};
pub use report::{build_report, export_report, Branding, ReportOptions, DEFAULT_REPORT_FILENAME};
pub use table::{Rgb, TableStyle};
