use crate::config::{CrawlRequest, CrawlerConfig, SearchQuery};
use crate::crawlers::Renderer;
use crate::error::{Error, Result};
use crate::parsers::ArticleExtractor;
use crate::results::ArticleRecord;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// Everything a crawl needs besides the renderer and the request
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub site: Url,
    pub extractor: ArticleExtractor,
    pub navigation_timeout: Duration,
    pub wait_timeout: Duration,
}

impl CrawlSettings {
    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            site: Url::parse(&config.site_url)?,
            extractor: ArticleExtractor::new(config.selectors.clone())?,
            navigation_timeout: config.navigation_timeout(),
            wait_timeout: config.wait_timeout(),
        })
    }
}

/// Builds the search listing URL for one page: `<site>/search/?query=<query>&page=<page>`
///
/// Any path in `site` is kept as a prefix, so `http://host/mirror` lists
/// from `http://host/mirror/search/`.
pub fn listing_url(site: &Url, query: &SearchQuery, page: u32) -> Result<Url> {
    // Join against a directory base so the site path is not replaced
    let mut base = site.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base.join("search/")?;
    url.query_pairs_mut()
        .clear()
        .append_pair("query", query.as_str())
        .append_pair("page", &page.to_string());
    Ok(url)
}

/// Loads a single listing page and extracts its articles
pub async fn extract_page<R: Renderer>(
    renderer: &mut R,
    settings: &CrawlSettings,
    url: &Url,
) -> Result<Vec<ArticleRecord>> {
    let marker = settings.extractor.marker();

    // Navigate, then wait for the article list to render
    bounded(
        settings.navigation_timeout,
        "loading",
        url.as_str(),
        renderer.goto(url.as_str()),
    )
    .await?;
    bounded(
        settings.wait_timeout,
        "waiting for articles on",
        url.as_str(),
        renderer.wait_for(marker, settings.wait_timeout),
    )
    .await?;

    // Extract from the rendered document, not the raw response
    let html = renderer.source().await?;
    settings.extractor.extract(&html, url.as_str())
}

/// Crawls pages `1..=total_pages` in order and aggregates their articles
///
/// The first failing page aborts the crawl and everything collected so far
/// is dropped.
pub async fn crawl<R: Renderer>(
    renderer: &mut R,
    settings: &CrawlSettings,
    request: &CrawlRequest,
) -> Result<Vec<ArticleRecord>> {
    let mut articles = Vec::new();

    for page in 1..=request.total_pages {
        let url = listing_url(&settings.site, &request.query, page)?;
        // Any page failure ends the crawl here
        let from_page = extract_page(renderer, settings, &url).await?;

        ::log::info!("[scraping] total articles from page {}: {}", page, from_page.len());
        articles.extend(from_page);
    }

    Ok(articles)
}

/// Runs [`crawl`] inside a renderer session that is closed whether or not
/// the crawl succeeds
pub async fn crawl_session<R: Renderer>(
    mut renderer: R,
    settings: &CrawlSettings,
    request: &CrawlRequest,
) -> Result<Vec<ArticleRecord>> {
    let result = crawl(&mut renderer, settings, request).await;

    // Close on every path, bounded so a stuck browser can't hold the run
    let closed = bounded(
        settings.navigation_timeout,
        "closing the session for",
        settings.site.as_str(),
        renderer.close(),
    )
    .await;

    match (result, closed) {
        (Ok(articles), Ok(())) => Ok(articles),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), closed) => {
            if let Err(close_error) = closed {
                ::log::warn!("Failed to close renderer session: {}", close_error);
            }
            Err(e)
        }
    }
}

async fn bounded<F>(limit: Duration, what: &'static str, url: &str, step: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    match timeout(limit, step).await {
        Ok(result) => result,
        Err(_) => {
            ::log::error!("Timeout {} {}", what, url);
            Err(Error::Timeout {
                what,
                url: url.to_string(),
                secs: limit.as_secs(),
            })
        }
    }
}
