//! Main entry point for the zipdoc CLI application.
//!
//! A thin front end over the library: list entries, print one entry, or
//! pack files from disk into a new archive.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

use zipdoc::cli::Command;
use zipdoc::{Archive, ArchiveOptions, Cli, Compression, LocalFs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::List { zip } => list(&zip).await,
        Command::Cat { zip, path, json } => cat(&zip, &path, json).await,
        Command::Pack {
            out,
            files,
            root,
            store,
        } => pack(&out, &files, root.as_deref(), store).await,
    }
}

async fn list(zip: &Path) -> Result<()> {
    let archive = Archive::open(&LocalFs, zip)
        .await
        .with_context(|| format!("cannot open {}", zip.display()))?;

    for path in archive.list() {
        println!("{path}");
    }
    Ok(())
}

async fn cat(zip: &Path, path: &str, json: bool) -> Result<()> {
    let archive = Archive::open(&LocalFs, zip)
        .await
        .with_context(|| format!("cannot open {}", zip.display()))?;

    let mut stdout = tokio::io::stdout();
    if json {
        let value = archive.read_json(path, None).await?.document;
        let mut text = serde_json::to_string_pretty(&value)?;
        text.push('\n');
        stdout.write_all(text.as_bytes()).await?;
    } else {
        let document = archive.read_buffer(path, None).await?.document;
        stdout.write_all(&document).await?;
    }
    stdout.flush().await?;
    Ok(())
}

async fn pack(out: &Path, files: &[std::path::PathBuf], root: Option<&Path>, store: bool) -> Result<()> {
    let compression = if store {
        Compression::Stored
    } else {
        Compression::default()
    };
    let mut archive = Archive::new().with_options(ArchiveOptions { compression });

    archive.add_all(&LocalFs, files, root).await?;
    archive
        .save(&LocalFs, out)
        .await
        .with_context(|| format!("cannot write {}", out.display()))?;

    tracing::info!(entries = archive.len(), out = %out.display(), "packed");
    Ok(())
}
