use std::time::Duration;

use clap::Parser;
use vitrine::{Config, DEFAULT_PROVIDER, PageOptions, loader};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Render a searchable gallery of projects")]
struct Args {
    /// Project feed, a JSON file path or an http(s) URL.
    #[arg(long, default_value = vitrine::feed::DEFAULT_FEED)]
    feed: String,

    /// Base address of the repository statistics API.
    #[arg(long, default_value = DEFAULT_PROVIDER)]
    provider: String,

    /// Base address for profile and fallback repository links.
    #[arg(long, default_value = vitrine::render::DEFAULT_WEB_BASE)]
    web_base: String,

    /// Output directory, cleared before writing.
    #[arg(long, default_value = "dist")]
    out: String,

    /// Seconds to wait for a single repository lookup.
    #[arg(long, default_value_t = loader::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Maximum number of concurrent repository lookups.
    #[arg(long, default_value_t = loader::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Page title.
    #[arg(long, default_value = "Projects")]
    title: String,

    /// Stylesheet linked from the page.
    #[arg(long)]
    stylesheet: Option<String>,
}

#[cfg(feature = "logging")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vitrine=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    #[cfg(feature = "logging")]
    init_logging();

    let page = PageOptions {
        title: args.title,
        stylesheet: args.stylesheet.or(PageOptions::default().stylesheet),
    };

    Config::new()
        .feed(&args.feed)
        .provider(args.provider)
        .web_base(args.web_base)
        .out_dir(args.out)
        .timeout(Duration::from_secs(args.timeout))
        .concurrency(args.concurrency)
        .page(page)
        .progress(true)
        .build()?;

    Ok(())
}
