pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod results;
pub mod sink;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{CrawlRequest, CrawlerConfig, SearchQuery};
pub use crawlers::Renderer;
pub use crawlers::listing::{CrawlSettings, crawl, crawl_session};
pub use error::{Error, Result};
pub use results::ArticleRecord;
pub use sink::{CsvSink, RecordSink};

use std::future::Future;
use std::path::PathBuf;

/// Validates the raw arguments, crawls every requested listing page and
/// writes the articles to `sink`
///
/// `open` is only called once the arguments and configuration are valid, so
/// bad input never reaches the browser. Nothing is written unless every page
/// was crawled successfully.
pub async fn run<R, F, Fut, S>(
    search: Option<&str>,
    total_pages: Option<&str>,
    config: &CrawlerConfig,
    open: F,
    sink: &mut S,
) -> Result<PathBuf>
where
    R: Renderer,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R>>,
    S: RecordSink,
{
    let request = CrawlRequest::from_args(search, total_pages)?;
    let settings = CrawlSettings::from_config(config)?;

    ::log::info!(
        "[scraping] crawling {} pages to collect articles related to {}...",
        request.total_pages,
        request.query
    );

    let renderer = open().await?;
    let articles = crawl_session(renderer, &settings, &request).await?;

    let saved_to = sink.write(&request, &articles)?;
    ::log::info!("[scraping] all articles saved at: {}", saved_to.display());

    Ok(saved_to)
}
