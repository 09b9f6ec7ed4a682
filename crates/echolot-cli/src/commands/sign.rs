//! Sign command implementation.

use crate::cli::SignArgs;
use crate::commands::validate::{check_record, into_verdict, load_shapes};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::external::{ExternalTool, ToolOutput};
use crate::output::Formatter;
use echolot_gatekeeper::{ShapeConstraintSet, ValidationConfig};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files handed to the signing tool.
#[derive(Debug, Clone)]
pub struct SignPlan {
    /// Asset to sign
    pub asset: PathBuf,
    /// Manifest describing the claim
    pub manifest: PathBuf,
    /// Signed output
    pub output: PathBuf,
}

impl SignPlan {
    fn arguments(&self) -> [&OsStr; 6] {
        [
            self.asset.as_os_str(),
            OsStr::new("--manifest"),
            self.manifest.as_os_str(),
            OsStr::new("--output"),
            self.output.as_os_str(),
            OsStr::new("--force"),
        ]
    }
}

/// Execute the sign command.
pub async fn execute_sign(args: SignArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let record = args.record.unwrap_or_else(|| config.paths.record.clone());
    let plan = SignPlan {
        asset: args.asset.unwrap_or_else(|| config.paths.asset.clone()),
        manifest: config.signer.manifest.clone(),
        output: args.output.unwrap_or_else(|| config.paths.signed_asset.clone()),
    };

    let shapes = load_shapes(config.paths.shapes.as_deref())?;
    let tool = ExternalTool::new(&config.signer.program);

    let result = check_record(&record, &shapes, config.validation)?;
    if !result.conforms {
        println!("{}", formatter.format_validation(&result)?);
    }
    into_verdict(&result)?;

    run_signer(&tool, &plan)?;
    println!("{}", formatter.success(&format!("Signed asset written to {}", plan.output.display())));

    Ok(())
}

/// Sign an asset once its record has passed the conformance check.
///
/// # Errors
///
/// Checked in order, nothing runs after the first failure:
/// - [`CliError::NonConformant`] if the record does not conform
/// - [`CliError::AssetNotFound`] if the asset or the manifest is missing
/// - [`CliError::UnavailableExternalTool`] if the tool cannot be started
/// - [`CliError::ExternalToolFailed`] if the tool reports failure
pub fn sign_asset(
    tool: &ExternalTool,
    record: &Path,
    shapes: &ShapeConstraintSet,
    validation: ValidationConfig,
    plan: &SignPlan,
) -> Result<ToolOutput> {
    let result = check_record(record, shapes, validation)?;
    into_verdict(&result)?;
    run_signer(tool, plan)
}

/// Run the signing tool on a plan whose record has already been checked.
fn run_signer(tool: &ExternalTool, plan: &SignPlan) -> Result<ToolOutput> {
    for path in [&plan.asset, &plan.manifest] {
        if !path.exists() {
            return Err(CliError::AssetNotFound { path: path.clone() });
        }
    }

    let output = tool.run(plan.arguments())?;
    info!(asset = %plan.asset.display(), output = %plan.output.display(), "Asset signed");
    Ok(output)
}
