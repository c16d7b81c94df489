pub mod listing;
pub mod web;


use crate::error::Result;
use std::time::Duration;

/// A browser session that can load a page and expose the rendered document
///
/// One session is driven sequentially for a whole crawl; implementations do
/// not need to be shareable across tasks.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    /// Navigate to `url` and wait for the load to complete
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Suspend until `selector` matches an element in the current document.
    /// `timeout` is a hint for the renderer's own polling bound.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Source of the current document, after scripts have run
    async fn source(&mut self) -> Result<String>;

    /// End the session and release the browser
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
