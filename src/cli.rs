use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config;
use crate::destination;
use crate::export;
use crate::migrate;
use crate::upload;

#[derive(Debug, Parser)]
#[command(name = "jira2ch")]
#[command(about = "Migrate a Jira export into Clubhouse")]
#[command(version)]
pub struct Cli {
    /// Jira export to migrate (`.xml` RSS export, otherwise JSON)
    pub export: PathBuf,

    /// Config file with the Clubhouse token and user/project mappings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Build the Clubhouse payload and print it instead of uploading
    #[arg(long)]
    pub dry_run: bool,

    /// Pretty-print JSON output (with --dry-run)
    #[arg(long)]
    pub pretty: bool,
}

/// Load the export and mappings, build the bundle, then upload or print it.
pub async fn handle_migrate(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let config = config::load_config(&config_path)?;
    let items = export::load_export(&cli.export)?;
    tracing::info!(items = items.len(), export = %cli.export.display(), "loaded export");

    let data = migrate::build_bundle(&items, &config.mappings())
        .context("Failed to assemble Clubhouse data")?;

    if cli.dry_run {
        let json = if cli.pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };
        println!("{json}");
        return Ok(());
    }

    let destination = destination::create_destination(&config)?;
    tracing::info!(destination = destination.name(), "uploading");
    let report = upload::upload(
        data,
        destination.as_ref(),
        config.attachments_dir.as_deref(),
    )
    .await?;

    println!(
        "Migrated {} epics and {} stories ({} files); skipped {} stories",
        report.epics, report.stories, report.files, report.skipped
    );
    Ok(())
}
