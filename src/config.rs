use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for an article crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Base URL of the site whose search listing is crawled
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Whether the browser is started without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Directory the CSV output is written to (created if absent)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Upper bound for a single page navigation, in seconds
    #[serde(default = "default_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// Upper bound for the listing marker to appear, in seconds
    #[serde(default = "default_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// CSS selectors used to pull articles out of a listing page
    #[serde(default)]
    pub selectors: ExtractorConfig,
}

/// CSS selectors describing where articles live in a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Matches one anchor per article. Also the marker waited for after navigation.
    #[serde(default = "default_article_selector")]
    pub article: String,

    /// Matches the heading inside an article anchor
    #[serde(default = "default_title_selector")]
    pub title: String,

    /// Matches the category label inside an article anchor
    #[serde(default = "default_category_selector")]
    pub category: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            article: default_article_selector(),
            title: default_title_selector(),
            category: default_category_selector(),
        }
    }
}

fn default_site_url() -> String {
    "https://www.cnnindonesia.com".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

/// Matches Puppeteer's navigation and selector-wait defaults
fn default_timeout_secs() -> u64 {
    30
}

fn default_article_selector() -> String {
    r#"[data-name="cnn-id"] article a"#.to_string()
}

fn default_title_selector() -> String {
    "h2".to_string()
}

fn default_category_selector() -> String {
    "span.text-xs.text-cnn_red".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            output_dir: default_output_dir(),
            navigation_timeout_secs: default_timeout_secs(),
            wait_timeout_secs: default_timeout_secs(),
            selectors: ExtractorConfig::default(),
        }
    }
}

impl CrawlerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply the `WEBDRIVER_URL` environment variable, if set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

/// Free-text search term, guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Result<Self> {
        let query = query.into();
        if query.is_empty() {
            return Err(Error::MissingSearch);
        }
        Ok(Self(query))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated crawl request: what to search for and how many listing pages to visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    pub query: SearchQuery,
    pub total_pages: u32,
}

impl CrawlRequest {
    pub fn new(query: SearchQuery, total_pages: u32) -> Result<Self> {
        if total_pages == 0 {
            return Err(Error::InvalidTotalPages(total_pages.to_string()));
        }
        Ok(Self { query, total_pages })
    }

    /// Build a request from raw command-line text
    ///
    /// Both values are required. `total_pages` must be a positive whole
    /// number; surrounding whitespace is ignored.
    pub fn from_args(search: Option<&str>, total_pages: Option<&str>) -> Result<Self> {
        let query = SearchQuery::new(search.ok_or(Error::MissingSearch)?)?;
        let raw_pages = total_pages.ok_or(Error::MissingTotalPages)?;
        if raw_pages.trim().is_empty() {
            return Err(Error::MissingTotalPages);
        }

        let total_pages = raw_pages
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::InvalidTotalPages(raw_pages.to_string()))?;

        Self::new(query, total_pages)
    }
}
