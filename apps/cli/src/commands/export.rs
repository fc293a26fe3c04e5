use std::path::PathBuf;

use anyhow::Context;
use tracing::warn;

use avquote_core::price_project;
use avquote_export::ProposalRenderer;

use crate::cli::ExportArgs;

/// Prices the project and writes the workbook. Returns the written path.
pub async fn run(args: &ExportArgs) -> anyhow::Result<PathBuf> {
    let prepared = super::prepare(&args.pricing).await?;
    let priced = price_project(&prepared.project, &prepared.context);

    if priced.rooms.is_empty() {
        warn!("No room has line items; writing a proposal without room sheets");
    }

    let dir = args
        .output
        .clone()
        .unwrap_or_else(|| prepared.config.output.dir.clone());

    let renderer =
        ProposalRenderer::new(&prepared.currency).company_name(prepared.config.company.name.clone());

    renderer
        .save(&priced, &dir)
        .with_context(|| format!("Failed to write proposal into {}", dir.display()))
}

pub async fn execute(args: ExportArgs) -> anyhow::Result<()> {
    let path = run(&args).await?;
    println!("{}", path.display());
    Ok(())
}
