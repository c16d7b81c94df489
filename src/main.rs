use article_crawl::crawlers::web::WebDriverRenderer;
use article_crawl::{CrawlerConfig, CsvSink};
use clap::Parser;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging, showing progress unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match scrape(&args).await {
        Ok(()) => {
            ::log::info!("[scraping] done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn scrape(args: &Args) -> article_crawl::Result<()> {
    let config = match &args.config {
        Some(path) => CrawlerConfig::from_file(path)?,
        None => CrawlerConfig::default(),
    };
    let config = args.apply(config.with_env_overrides());

    ::log::debug!("Using WebDriver at {}", config.webdriver_url);

    let mut sink = CsvSink::new(&config.output_dir);
    article_crawl::run(
        args.search.as_deref(),
        args.total_pages.as_deref(),
        &config,
        || WebDriverRenderer::connect(&config),
        &mut sink,
    )
    .await?;

    Ok(())
}
