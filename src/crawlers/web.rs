use crate::config::CrawlerConfig;
use crate::crawlers::Renderer;
use crate::error::{Error, Result};
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Common WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// A [`Renderer`] backed by a WebDriver browser session
pub struct WebDriverRenderer {
    client: Client,
    current_url: String,
}

impl WebDriverRenderer {
    /// Opens a browser session through the configured WebDriver server,
    /// falling back to well-known local endpoints
    pub async fn connect(config: &CrawlerConfig) -> Result<Self> {
        let capabilities = session_capabilities(config.headless);

        let first_error = match open_session(&config.webdriver_url, &capabilities).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", config.webdriver_url);
                return Self::with_session_timeouts(client, &config.webdriver_url, config).await;
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == config.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = open_session(url, &capabilities).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Self::with_session_timeouts(client, url, config).await;
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(first_error)
    }

    /// Makes the browser itself enforce the navigation bound, so an abandoned
    /// navigation can't keep the session busy past it
    async fn with_session_timeouts(
        client: Client,
        webdriver_url: &str,
        config: &CrawlerConfig,
    ) -> Result<Self> {
        let timeouts = session_timeouts(config);
        if let Err(e) = client.update_timeouts(timeouts).await {
            // The session is already open, release it before giving up
            if let Err(close_error) = client.close().await {
                ::log::warn!("Failed to close WebDriver session: {}", close_error);
            }
            return Err(Error::Session {
                url: webdriver_url.to_string(),
                reason: format!("couldn't set session timeouts: {}", e),
            });
        }

        Ok(Self {
            client,
            current_url: String::new(),
        })
    }
}

/// Page-load and script bounds for the WebDriver session
fn session_timeouts(config: &CrawlerConfig) -> TimeoutConfiguration {
    TimeoutConfiguration::new(
        Some(config.wait_timeout()),
        Some(config.navigation_timeout()),
        None,
    )
}

async fn open_session(url: &str, capabilities: &Map<String, Value>) -> Result<Client> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities.clone());
    builder.connect(url).await.map_err(|e| Error::Session {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Browser capabilities for a new session
fn session_capabilities(headless: bool) -> Map<String, Value> {
    let mut capabilities = Map::new();
    if headless {
        capabilities.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": ["--headless=new", "--disable-gpu", "--no-sandbox"] }),
        );
        capabilities.insert(
            "moz:firefoxOptions".to_string(),
            json!({ "args": ["-headless"] }),
        );
    }
    capabilities
}

impl Renderer for WebDriverRenderer {
    async fn goto(&mut self, url: &str) -> Result<()> {
        ::log::debug!("GOTO: {}", url);
        self.current_url = url.to_string();
        self.client
            .goto(url)
            .await
            .map_err(|e| navigation_error(e, url))
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .map(|_| ())
            .map_err(|e| navigation_error(e, &self.current_url))
    }

    async fn source(&mut self) -> Result<String> {
        self.client
            .source()
            .await
            .map_err(|e| navigation_error(e, &self.current_url))
    }

    async fn close(self) -> Result<()> {
        let url = self.current_url;
        self.client
            .close()
            .await
            .map_err(|e| navigation_error(e, &url))
    }
}

fn navigation_error(error: fantoccini::error::CmdError, url: &str) -> Error {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost WebDriver session while on {}", url);
    }
    Error::Navigation {
        url: url.to_string(),
        reason: error.to_string(),
    }
}
