//! Build-from-commons command implementation.

use crate::cli::CommonsArgs;
use crate::commands::build::build_record;
use crate::commands::validate::{check_record, into_verdict, load_shapes};
use crate::config::{Config, Paths};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use echolot_catalog::{AssetCatalog, CommonsClient};
use echolot_domain::{ProvenanceRecord, SourceRecord};
use echolot_gatekeeper::{ShapeConstraintSet, ValidationConfig, ValidationResult};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Everything one ingestion run produced.
#[derive(Debug)]
pub struct IngestOutcome {
    /// Source as mapped from the catalog
    pub source: SourceRecord,
    /// Record written to `paths.record`
    pub record: ProvenanceRecord,
    /// Where the asset was stored, if it was downloaded
    pub asset: Option<PathBuf>,
    /// Conformance of the written record
    pub validation: ValidationResult,
}

/// Execute the build-from-commons command.
pub async fn execute_build_from_commons(
    args: CommonsArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let client = CommonsClient::new(config.catalog.clone())?;
    let shapes = load_shapes(config.paths.shapes.as_deref())?;

    let outcome = ingest(
        &client,
        &args.title,
        &config.paths,
        !args.skip_download,
        &shapes,
        config.validation,
    )
    .await?;

    println!("{}", formatter.info(&format!("Source written to {}", config.paths.source.display())));
    if let Some(asset) = &outcome.asset {
        println!("{}", formatter.info(&format!("Asset written to {}", asset.display())));
    }
    println!("{}", formatter.format_record(&outcome.record, &config.paths.record)?);
    println!("{}", formatter.format_validation(&outcome.validation)?);

    into_verdict(&outcome.validation)
}

/// Fetch a title from the catalog and run the whole pipeline on it.
///
/// Writes the source file, optionally the asset binary, and the record.
/// A non-conforming record is still written; the verdict is in the outcome.
#[instrument(skip(catalog, paths, shapes, validation))]
pub async fn ingest<C: AssetCatalog>(
    catalog: &C,
    title: &str,
    paths: &Paths,
    download: bool,
    shapes: &ShapeConstraintSet,
    validation: ValidationConfig,
) -> Result<IngestOutcome> {
    let source = catalog.fetch_source(title).await?;
    echolot_store::write_source(&paths.source, &source)?;
    info!(source = %paths.source.display(), "Source metadata written");

    let asset = if download {
        let url = source.content_url.as_deref().ok_or_else(|| {
            CliError::InvalidInput(format!("Catalog entry '{}' has no content URL", title))
        })?;
        let bytes = catalog.download_asset(url).await?;
        echolot_store::write_bytes(&paths.asset, &bytes)?;
        info!(asset = %paths.asset.display(), bytes = bytes.len(), "Asset downloaded");
        Some(paths.asset.clone())
    } else {
        None
    };

    let record = build_record(&paths.source, &paths.record)?;
    let validation = check_record(&paths.record, shapes, validation)?;

    Ok(IngestOutcome {
        source,
        record,
        asset,
        validation,
    })
}
