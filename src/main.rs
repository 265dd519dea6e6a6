mod notion;
mod shared;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use notion::config::{Config, API_URL_ENV, NOTION_VERSION_ENV};

#[derive(Parser)]
#[command(name = "notion-inspect")]
#[command(about = "Print the metadata of a Notion database", long_about = None)]
struct Cli {
    /// Notion API base URL
    #[arg(long, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Notion-Version header sent with the request
    #[arg(long, env = NOTION_VERSION_ENV)]
    notion_version: Option<String>,

    /// Also write logs to a file in this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables take precedence
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _guard = shared::logging::init_logging(cli.log_dir.as_deref(), "notion-inspect")?;

    let config = Config::from_env()?.with_overrides(cli.api_url, cli.notion_version);
    tracing::debug!("Loaded configuration: {:?}", config);

    let stdout = std::io::stdout();
    notion::run(&config, &mut stdout.lock()).await?;

    Ok(())
}
