//! Article Report CLI tool
//!
//! A command-line tool for browsing article records and exporting them to a
//! branded PDF report.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use article_report::fetch::{load, LoaderConfig, ResourceClient, DEFAULT_ENDPOINT};
use article_report::pdf::{
    export_report, extract_metadata, Branding, LogoSource, ReportOptions, DEFAULT_LOGO_URL,
    DEFAULT_REPORT_FILENAME,
};
use article_report::view::{page_count, render_view, Pagination, ROWS_PER_PAGE_OPTIONS};

/// Article Report - Browse articles and export a PDF report
#[derive(Parser)]
#[command(name = "article-report")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Show the first five articles
    article-report list

    # Show the third page, ten rows per page
    article-report list --rows-per-page 10 --page 2

    # Export every article to article_report.pdf
    article-report export

    # Export without the logo and open the result
    article-report export --no-logo --open -o report.pdf")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Listing endpoint returning a JSON array of articles
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the article table
    List {
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Rows per page (5, 10 or 25)
        #[arg(long, default_value_t = ROWS_PER_PAGE_OPTIONS[0], value_parser = parse_rows_per_page)]
        rows_per_page: usize,
    },

    /// Export all articles to a PDF report
    Export {
        /// Output PDF file path
        #[arg(short, long, default_value = DEFAULT_REPORT_FILENAME)]
        output: PathBuf,

        /// Logo image URL
        #[arg(long, conflicts_with_all = ["logo_file", "no_logo"])]
        logo_url: Option<String>,

        /// Local logo image (PNG or JPEG)
        #[arg(long, conflicts_with = "no_logo")]
        logo_file: Option<PathBuf>,

        /// Leave the logo out of the header
        #[arg(long)]
        no_logo: bool,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show information about a generated report
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let result = match cli.command {
        Commands::List { page, rows_per_page } => cmd_list(&cli.global, page, rows_per_page),
        Commands::Export { output, logo_url, logo_file, no_logo, open } => {
            let logo = logo_source(logo_url, logo_file, no_logo);
            cmd_export(&cli.global, output, logo, open)
        }
        Commands::Info { input } => cmd_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_rows_per_page(raw: &str) -> Result<usize, String> {
    let value: usize = raw.parse().map_err(|_| format!("'{}' is not a number", raw))?;
    if ROWS_PER_PAGE_OPTIONS.contains(&value) {
        Ok(value)
    } else {
        Err(format!("rows per page must be one of {:?}", ROWS_PER_PAGE_OPTIONS))
    }
}

fn logo_source(url: Option<String>, file: Option<PathBuf>, no_logo: bool) -> LogoSource {
    match (url, file) {
        _ if no_logo => LogoSource::None,
        (Some(url), _) => LogoSource::Url(url),
        (None, Some(file)) => LogoSource::File(file),
        (None, None) => LogoSource::Url(DEFAULT_LOGO_URL.to_string()),
    }
}

fn loader_config(global: &GlobalArgs) -> LoaderConfig {
    LoaderConfig {
        endpoint: global.endpoint.clone(),
        timeout: Duration::from_secs(global.timeout_secs),
    }
}

/// Open a file with the system default application
fn open_file(path: &PathBuf) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Fetch once and print the requested page window
///
/// A failed fetch still renders: the view shows the fixed error text.
fn cmd_list(global: &GlobalArgs, page: usize, rows_per_page: usize) -> Result<()> {
    let client = ResourceClient::new(&loader_config(global))?;

    let mut pagination = Pagination::default();
    pagination.set_rows_per_page(rows_per_page);
    pagination.set_page(page);

    eprintln!("Loading...");
    let state = load(&client);

    let pages = page_count(state.articles.len(), pagination.rows_per_page);
    if state.error.is_none() && pages > 0 && pagination.page >= pages {
        warn!(page, pages, "page index is past the last page");
    }

    println!("{}", render_view(&state, &pagination, &Branding::default()));
    Ok(())
}

/// Fetch once and export every record to a PDF
fn cmd_export(global: &GlobalArgs, output: PathBuf, logo: LogoSource, open: bool) -> Result<()> {
    let config = loader_config(global);
    let client = ResourceClient::new(&config)?;

    eprintln!("Loading articles from {}...", client.endpoint());
    let articles = match client.fetch_articles() {
        Ok(articles) => articles,
        Err(e) => {
            error!(error = %e, "error fetching articles");
            bail!("Failed to load articles.");
        }
    };

    let options = ReportOptions {
        logo,
        output_path: output.clone(),
        http_timeout: config.timeout,
        ..Default::default()
    };

    eprintln!("Generating report for {} articles...", articles.len());
    if let Err(e) = export_report(&articles, &options) {
        error!(error = %e, "error generating PDF");
        bail!("Report was not generated");
    }

    eprintln!("Output: {}", output.display());

    if open {
        open_file(&output)?;
    }

    Ok(())
}

/// Show information about a report PDF
fn cmd_info(input: PathBuf) -> Result<()> {
    let metadata = extract_metadata(&input)
        .with_context(|| format!("reading {}", input.display()))?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }

    Ok(())
}
