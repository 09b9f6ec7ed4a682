//! Info command implementation.

use crate::cli::InfoArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::external::{ExternalTool, ToolOutput};
use crate::output::Formatter;
use std::ffi::OsStr;
use std::path::Path;

/// Execute the info command.
pub async fn execute_info(args: InfoArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let asset = args.asset.unwrap_or_else(|| config.paths.signed_asset.clone());
    let tool = ExternalTool::new(&config.signer.program);

    let output = manifest_info(&tool, &asset)?;
    if formatter.format() != crate::config::OutputFormat::Quiet {
        println!("{}", formatter.info(&format!("Manifest of {}", asset.display())));
    }
    print!("{}", output.stdout);

    Ok(())
}

/// Ask the signing tool to describe the manifest embedded in `asset`.
pub fn manifest_info(tool: &ExternalTool, asset: &Path) -> Result<ToolOutput> {
    if !asset.exists() {
        return Err(CliError::AssetNotFound {
            path: asset.to_path_buf(),
        });
    }
    tool.run([asset.as_os_str(), OsStr::new("--info")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_signed_asset() {
        let tool = ExternalTool::new("c2patool");
        let err = manifest_info(&tool, Path::new("/nonexistent/image.c2pa.jpg")).unwrap_err();
        assert!(matches!(err, CliError::AssetNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_info_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let asset = dir.path().join("image.c2pa.jpg");
        std::fs::write(&asset, b"signed").unwrap();

        let tool = ExternalTool::new("echo");
        let output = manifest_info(&tool, &asset).unwrap();
        assert_eq!(output.stdout.trim(), format!("{} --info", asset.display()));
    }
}
