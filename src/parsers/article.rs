use crate::config::ExtractorConfig;
use crate::error::{Error, Result};
use crate::results::ArticleRecord;
use scraper::{ElementRef, Html, Selector};

/// Pulls article records out of a rendered listing page
///
/// Selectors are parsed once, so a single extractor is reused across every
/// page of a crawl.
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    config: ExtractorConfig,
    article: Selector,
    title: Selector,
    category: Selector,
}

impl ArticleExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        Ok(Self {
            article: parse_selector(&config.article)?,
            title: parse_selector(&config.title)?,
            category: parse_selector(&config.category)?,
            config,
        })
    }

    /// The selector whose presence marks a listing page as ready to extract
    pub fn marker(&self) -> &str {
        &self.config.article
    }

    /// Extracts every article from `html` in document order
    ///
    /// Text is taken verbatim. An article anchor without a title or category
    /// descendant fails the whole page; `url` is only used in that error.
    pub fn extract(&self, html: &str, url: &str) -> Result<Vec<ArticleRecord>> {
        let doc = Html::parse_document(html);

        // One record per article anchor, title and category from its descendants
        let records = doc
            .select(&self.article)
            .enumerate()
            .map(|(index, anchor)| {
                let title =
                    self.descendant_text(anchor, &self.title, &self.config.title, index, url)?;
                let category = self.descendant_text(
                    anchor,
                    &self.category,
                    &self.config.category,
                    index,
                    url,
                )?;
                Ok(ArticleRecord { title, category })
            })
            .collect::<Result<Vec<_>>>()?;

        ::log::debug!("Article extractor found {} articles in {}", records.len(), url);
        Ok(records)
    }

    fn descendant_text(
        &self,
        anchor: ElementRef<'_>,
        selector: &Selector,
        selector_src: &str,
        index: usize,
        url: &str,
    ) -> Result<String> {
        // First match only, no fallback when absent
        anchor
            .select(selector)
            .next()
            .map(|element| element.text().collect::<String>())
            .ok_or_else(|| Error::MissingSelector {
                selector: selector_src.to_string(),
                index,
                url: url.to_string(),
            })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
