use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("please input SEARCH argument")]
    MissingSearch,

    #[error("please input TOTAL_PAGES argument")]
    MissingTotalPages,

    #[error("TOTAL_PAGES only accept a positive whole number, got {0:?}")]
    InvalidTotalPages(String),

    #[error("Couldn't open a WebDriver session at {url}: {reason}")]
    Session { url: String, reason: String },

    #[error("Failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Timed out after {secs}s while {what} {url}")]
    Timeout {
        what: &'static str,
        url: String,
        secs: u64,
    },

    #[error(
        "The selector you are trying to scrape for is missing. Selector: {selector} (article #{index} on {url})"
    )]
    MissingSelector {
        selector: String,
        index: usize,
        url: String,
    },

    #[error("Invalid CSS selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No articles were collected, nothing to write")]
    EmptyCollection,

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Config Error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
}
