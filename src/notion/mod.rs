pub mod api;
pub mod config;
pub mod error;
pub mod models;

use std::io::Write;

use api::NotionClient;
use config::Config;
use error::Result;
use models::DatabaseSummary;

/// Fetch the configured database and write it to `out` as pretty JSON.
///
/// Nothing is written unless the request succeeds.
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    tracing::info!("Connecting to Notion API: {}", config.api_url);

    let client = NotionClient::new(config)?;
    let database = client.retrieve_database(&config.database_id).await?;

    let summary = DatabaseSummary::from_value(&database);
    tracing::info!(
        "Retrieved database {} ({:?}) with {} properties",
        summary.id.as_deref().unwrap_or(&config.database_id),
        summary.title.unwrap_or_default(),
        summary.property_count
    );

    let rendered = serde_json::to_string_pretty(&database)?;
    writeln!(out, "{rendered}")?;
    out.flush()?;

    Ok(())
}
