//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use echolot_gatekeeper::{Gatekeeper, ShapeConstraintSet, ValidationConfig, ValidationResult};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Execute the validate command.
///
/// Prints the result in the selected format and fails with
/// [`CliError::NonConformant`] when the record does not conform.
pub async fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let record = args.record.unwrap_or_else(|| config.paths.record.clone());
    let shapes_path = args.shapes.or_else(|| config.paths.shapes.clone());

    let mut validation = config.validation;
    if args.no_inference {
        validation.class_inference = false;
    }

    let shapes = load_shapes(shapes_path.as_deref())?;
    let result = check_record(&record, &shapes, validation)?;
    println!("{}", formatter.format_validation(&result)?);

    into_verdict(&result)
}

/// Load a shape schema from disk, or the bundled schema when no path is given.
pub fn load_shapes(path: Option<&Path>) -> Result<ShapeConstraintSet> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => CliError::AssetNotFound {
                    path: path.to_path_buf(),
                },
                _ => CliError::Io(err),
            })?;
            Ok(ShapeConstraintSet::from_json(&json)?)
        }
        None => Ok(ShapeConstraintSet::bundled()?),
    }
}

/// Read a record document and check it against the shapes.
///
/// A document that is not JSON is an error; a document that is JSON but
/// not a valid graph yields a failing result.
pub fn check_record(
    record: &Path,
    shapes: &ShapeConstraintSet,
    validation: ValidationConfig,
) -> Result<ValidationResult> {
    let document = echolot_store::read_document(record)?;
    Ok(Gatekeeper::new(validation).validate_document(&document, shapes))
}

/// Turn a non-conforming result into an error.
pub(crate) fn into_verdict(result: &ValidationResult) -> Result<()> {
    if result.conforms {
        Ok(())
    } else {
        warn!(violations = result.diagnostics.len(), "Record is non-conformant");
        Err(CliError::NonConformant {
            violations: result.diagnostics.len(),
            first: result
                .diagnostics
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "no diagnostics reported".to_string()),
        })
    }
}
