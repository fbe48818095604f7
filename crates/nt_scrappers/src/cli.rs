use clap::{Args, Subcommand};
use nt_core::Result;
use crate::manager::ScraperManager;
use crate::scrapers::{get_scraper_factories, Scraper};

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Crawl the top ranked articles and print them without summarizing
    Top {
        /// Print the records as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Extract the cleaned body of a single article page
    Url {
        url: String,
    },
    /// List available scrapers
    List,
}

/// One `list` line: region flag, region/shorthand, then the source itself.
fn describe(scraper: &dyn Scraper) -> String {
    let meta = scraper.source_metadata();
    format!(
        "  {} {}/{} {} ({})",
        meta.region.emoji,
        meta.region.name,
        scraper.cli_names().first().copied().unwrap_or(meta.name),
        meta.emoji,
        meta.name
    )
}

pub async fn handle_command(args: ScraperArgs, manager: &ScraperManager) -> Result<()> {
    match args.command {
        ScraperCommands::Top { json } => {
            let articles = manager.crawl_top().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&articles)?);
            } else if articles.is_empty() {
                eprintln!("Crawling failed or there was nothing to collect.");
            } else {
                for article in &articles {
                    println!("[{}] {}", article.rank, article.title);
                    println!("  - link: {}", article.link);
                    println!("  - body: {}\n", article.content);
                }
            }
        }
        ScraperCommands::Url { url } => {
            if !manager.scraper().can_handle(&url) {
                eprintln!(
                    "Warning: {} is not a {} page, selectors may not match",
                    url,
                    manager.scraper().source_metadata().name
                );
            }
            let content = manager.scrape_url(&url).await?;
            println!("{}", content);
        }
        ScraperCommands::List => {
            println!("Available scrapers:");
            for factory in get_scraper_factories() {
                println!("{}", describe(factory().as_ref()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::korea::NateScraper;

    #[test]
    fn test_describe_shows_region_and_source() {
        let line = describe(&NateScraper::new());
        assert_eq!(line, "  🇰🇷 korea/nate 🏟️ (Nate Sports)");
    }
}
