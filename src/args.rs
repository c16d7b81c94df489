use article_crawl::CrawlerConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "article-crawl")]
#[command(about = "Collects article titles and categories from a paginated search listing into a CSV file")]
#[command(version)]
pub struct Args {
    /// Search term, used as the listing query
    pub search: Option<String>,

    /// Number of listing pages to crawl, starting from page 1
    #[arg(allow_hyphen_values = true)]
    pub total_pages: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver server URL (overrides config and WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Directory the CSV file is written to
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Navigation and selector-wait timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

impl Args {
    /// Layer command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: CrawlerConfig) -> CrawlerConfig {
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }
        if let Some(dir) = &self.out_dir {
            config.output_dir = dir.clone();
        }
        if let Some(secs) = self.timeout {
            config.navigation_timeout_secs = secs;
            config.wait_timeout_secs = secs;
        }
        config
    }
}
