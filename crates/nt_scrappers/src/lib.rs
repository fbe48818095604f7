pub mod scrapers;
pub mod cli;
pub mod logging;
pub mod manager;

pub use manager::{CrawlConfig, ScraperManager, NO_BODY_PLACEHOLDER};

pub use cli::{ScraperArgs, ScraperCommands, handle_command};
pub use logging::init_logging;
pub use scrapers::Scraper;
pub use scrapers::korea::NateScraper;

pub mod prelude {
    pub use super::scrapers::Scraper;
    pub use super::manager::{CrawlConfig, ScraperManager};
    pub use nt_core::{ArticleRecord, Candidate, Result, Error};
}
