use async_trait::async_trait;
use nt_core::{Candidate, Result};

pub mod korea;
use korea::nate::NateScraper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMetadata {
    pub name: &'static str,
    pub emoji: &'static str,
    pub region: Region,
}

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns metadata about the news source
    fn source_metadata(&self) -> SourceMetadata;

    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Returns up to `limit` ranked entries from the ranking page, in page order.
    async fn get_candidates(&self, limit: usize) -> Result<Vec<Candidate>>;

    /// Downloads a detail page and returns its cleaned body text.
    ///
    /// `Ok(None)` means the page loaded but has no body container.
    async fn scrape_article(&self, url: &str) -> Result<Option<String>>;

    /// Returns a list of CLI shorthand names for this scraper
    fn cli_names(&self) -> Vec<&str> {
        vec![]
    }
}

pub type ScraperFactory = Box<dyn Fn() -> Box<dyn Scraper> + Send + Sync>;

pub fn get_scraper_factories() -> Vec<ScraperFactory> {
    vec![Box::new(|| Box::new(NateScraper::new()))]
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use nt_core::{Error, Result};
    use scraper::{ElementRef, Html, Selector};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector {}: {:?}", selector, e)))
    }

    /// Protocol-relative links get `https:`; absolute links pass through;
    /// anything else is resolved against `base`.
    pub fn normalize_link(href: &str, base: &Url) -> Result<String> {
        let href = href.trim();
        if let Some(rest) = href.strip_prefix("//") {
            return Ok(format!("https://{}", rest));
        }
        if Url::parse(href).is_ok() {
            return Ok(href.to_string());
        }
        base.join(href)
            .map(String::from)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", href, e)))
    }

    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Whitespace-normalized text of every descendant text node.
    pub fn element_text(element: &ElementRef) -> String {
        element
            .text()
            .map(collapse_whitespace)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Finds the first `container`, detaches every descendant matching `prune`,
    /// and returns the remaining text. `None` when there is no container.
    pub fn pruned_text(html: &str, container: &Selector, prune: &Selector) -> Option<String> {
        let mut document = Html::parse_document(html);
        let container_id = document.select(container).next()?.id();

        let doomed: Vec<_> = {
            let root = ElementRef::wrap(document.tree.get(container_id)?)?;
            root.select(prune)
                .map(|el| el.id())
                .filter(|id| *id != container_id)
                .collect()
        };
        for id in doomed {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }

        let root = ElementRef::wrap(document.tree.get(container_id)?)?;
        Some(element_text(&root))
    }
}
