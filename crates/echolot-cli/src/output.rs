//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use echolot_domain::ProvenanceRecord;
use echolot_gatekeeper::ValidationResult;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a conformance result.
    pub fn format_validation(&self, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_validation_table(result)),
            OutputFormat::Quiet => Ok(if result.conforms {
                "conforms".to_string()
            } else {
                "non-conformant".to_string()
            }),
        }
    }

    fn format_validation_table(&self, result: &ValidationResult) -> String {
        if result.conforms {
            return self.success("Record conforms to the shape schema");
        }

        let mut builder = Builder::default();
        builder.push_record(["Constraint", "Shape", "Focus node", "Path", "Message"]);

        for violation in &result.diagnostics {
            builder.push_record([
                violation.constraint.to_string(),
                violation.shape.clone(),
                violation.focus_node.clone(),
                violation.path.clone().unwrap_or_else(|| "-".to_string()),
                violation.message.clone(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!(
            "{}\n{}",
            table,
            self.error(&format!(
                "Record is non-conformant ({} violation(s))",
                result.diagnostics.len()
            ))
        )
    }

    /// Format a freshly written record.
    pub fn format_record(&self, record: &ProvenanceRecord, path: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(path.display().to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["@id", record.id.as_str()]);
                builder.push_record(["dc:title", record.title.as_str()]);
                builder.push_record(["dc:creator", record.creator.as_str()]);
                builder.push_record(["dc:date", record.date.as_str()]);
                builder.push_record(["dc:rights", record.rights.as_str()]);
                builder.push_record([
                    "schema:license",
                    record.license.as_ref().map(|l| l.id.as_str()).unwrap_or("-"),
                ]);
                builder.push_record(["dc:format", record.format.as_str()]);
                builder.push_record(["schema:contentUrl", record.content_url.as_str()]);
                builder.push_record(["prov:wasAttributedTo", record.attributed_to.name.as_str()]);
                builder.push_record(["prov:generatedAtTime", record.generated_at.value.as_str()]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!(
                    "{}\n{}",
                    table,
                    self.success(&format!("Record written to {}", path.display()))
                ))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
