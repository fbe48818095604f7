use std::sync::Arc;
use std::time::Duration;
use anyhow::{anyhow, Context};
use clap::Parser;
use nt_core::SummaryResults;
use nt_inference::{create_model, Config};
use nt_scrappers::{handle_command, init_logging, CrawlConfig, NateScraper, ScraperArgs, ScraperManager};
use nt_web::client::{fetch_summarized_news, render_html, render_text, NewsResponse};
use nt_web::{create_app, AppState};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Crawl and summarize the top ranked sports news", long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "perplexity", help = "Model to use for inference. Available models: perplexity (default), dummy")]
    model: String,
    /// Ranking page to crawl
    #[arg(long, default_value = NateScraper::RANKING_URL)]
    ranking_url: String,
    /// Number of ranked articles to crawl
    #[arg(long, default_value_t = 3)]
    top_k: usize,
    /// Characters of body text kept per article
    #[arg(long, default_value_t = 500)]
    max_chars: usize,
    /// Pause after each extracted article, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the summary API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: String,
    },
    /// Crawl and summarize once, printing the API response as JSON
    Summarize,
    /// Crawl without summarizing
    Scrape(ScraperArgs),
    /// Ask a running API for summaries and display them
    Client {
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        api_url: String,
        /// Render the simple HTML markup instead of plain text
        #[arg(long)]
        html: bool,
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
}

fn build_manager(cli: &Cli) -> anyhow::Result<ScraperManager> {
    let config = Config::from_env();
    if config.api_key.is_none() && cli.model != "dummy" {
        warn!("⚠️ PPLX_API_KEY is not set; the provider will reject summary requests");
    }
    let inference = create_model(&cli.model, config).context("Failed to initialize inference model")?;
    info!("🧠 Inference model initialized (using {})", inference.name());

    let scraper = NateScraper::new().with_ranking_url(cli.ranking_url.clone());
    let crawl = CrawlConfig {
        top_k: cli.top_k,
        max_content_chars: cli.max_chars,
        courtesy_delay: Duration::from_millis(cli.delay_ms),
    };
    info!("🦗 Crawling {} (top {})", scraper.ranking_url(), crawl.top_k);
    Ok(ScraperManager::new(Arc::new(scraper), inference, crawl))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match &cli.command {
        Commands::Serve { bind } => {
            let manager = build_manager(&cli)?;
            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            info!("🚀 News summary API listening on http://{}", listener.local_addr()?);
            axum::serve(listener, create_app(AppState::new(manager)))
                .await
                .context("Server error")?;
        }
        Commands::Summarize => {
            let manager = build_manager(&cli)?;
            let results = manager.summarize_top().await?;
            println!("{}", serde_json::to_string_pretty(&SummaryResults { results })?);
        }
        Commands::Scrape(args) => {
            let manager = build_manager(&cli)?;
            handle_command(args.clone(), &manager).await?;
        }
        Commands::Client { api_url, html, timeout_secs } => {
            eprintln!("Loading the latest news...");
            let response = fetch_summarized_news(api_url, Duration::from_secs(*timeout_secs)).await;
            if let NewsResponse::Error(_) = response {
                return Err(anyhow!(render_text(&response)));
            }
            if *html {
                println!("{}", render_html(&response));
            } else {
                println!("{}", render_text(&response));
            }
        }
    }

    Ok(())
}
