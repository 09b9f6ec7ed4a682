//! Build command implementation.

use crate::cli::BuildArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use echolot_domain::ProvenanceRecord;
use std::path::Path;
use tracing::info;

/// Execute the build command.
pub async fn execute_build(args: BuildArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let source = args.source.unwrap_or_else(|| config.paths.source.clone());
    let out = args.out.unwrap_or_else(|| config.paths.record.clone());

    let record = build_record(&source, &out)?;
    println!("{}", formatter.format_record(&record, &out)?);

    Ok(())
}

/// Read the source file, normalize, construct and write the record.
///
/// Nothing is written when construction fails.
pub fn build_record(source: &Path, out: &Path) -> Result<ProvenanceRecord> {
    let raw = echolot_store::read_source(source)?;
    let normalized = echolot_normalizer::normalize(raw);
    let record = echolot_builder::construct(normalized)?;

    echolot_store::write_record(out, &record)?;
    info!(source = %source.display(), record = %out.display(), id = %record.id, "Record built");

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;

    const SOURCE: &str = "\
identifier: https://example.org/asset/1
title: <b>Harbour at dawn</b>
creator: Jane Doe
date: 2019-03-14 09:26:53
license_url: //creativecommons.org/licenses/by/4.0
format: image/jpeg
content_url: https://example.org/files/harbour.jpg
provenance_agent_id: https://example.org/agents/archive
provenance_agent_label: Example Archive
generated_at: 2024-05-01T12:00:00Z
";

    #[test]
    fn test_build_record_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.yml");
        let out = dir.path().join("out").join("record.jsonld");
        fs::write(&source, SOURCE).unwrap();

        let record = build_record(&source, &out).unwrap();
        assert_eq!(record.title, "Harbour at dawn");
        assert_eq!(record.date, "2019-03-14T09:26:53Z");
        assert_eq!(record.rights, "CC BY 4.0");

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["@id"], "https://example.org/asset/1");
        assert_eq!(written["schema:license"]["@id"], "https://creativecommons.org/licenses/by/4.0/");
    }

    #[test]
    fn test_missing_field_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.yml");
        let out = dir.path().join("record.jsonld");
        fs::write(&source, SOURCE.replace("format: image/jpeg\n", "")).unwrap();

        let err = build_record(&source, &out).unwrap_err();
        assert!(matches!(err, CliError::Build(_)));
        assert!(!out.exists());
    }
}
