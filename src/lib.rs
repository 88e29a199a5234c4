//! Article Report Library
//!
//! Fetches article records from a listing API and presents them two ways:
//! - A paginated plain-text table (one page window at a time)
//! - A branded A3 PDF report of every record, with page-numbered footers
//!
//! # Example
//!
//! ```no_run
//! use article_report::fetch::{load, LoaderConfig, ResourceClient};
//! use article_report::pdf::{export_report, LogoSource, ReportOptions};
//!
//! let client = ResourceClient::new(&LoaderConfig::default()).expect("client");
//! let articles = client.fetch_articles().expect("fetch");
//!
//! let options = ReportOptions {
//!     logo: LogoSource::None,
//!     ..Default::default()
//! };
//! export_report(&articles, &options).expect("Failed to export report");
//! ```

pub mod error;
pub mod fetch;
pub mod layout;
pub mod pdf;
pub mod record;
pub mod view;

// Re-export commonly used items
pub use error::{Error, Result};
pub use record::Article;
