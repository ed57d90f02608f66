//! Writing user-supplied text to CSV or JSON files.
//!
//! CSV export writes the text verbatim; no field splitting or header row is
//! produced. JSON export wraps the text as `{"data":"..."}`, escaping it so
//! the document is always well formed.

use anyhow::{Context, Result};
use serde_json::json;
use std::{fmt, fs, path::Path};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File contents for `data` in the given format.
pub fn render(format: ExportFormat, data: &str) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(data.to_string()),
        ExportFormat::Json => serde_json::to_string(&json!({ "data": data }))
            .context("Failed to serialize export data to JSON"),
    }
}

/// Write `data` to `path` in `format`, truncating any existing file.
pub fn export(format: ExportFormat, data: &str, path: &Path) -> Result<()> {
    let contents = render(format, data)?;

    fs::write(path, &contents)
        .with_context(|| format!("Failed to write {format} export to {}", path.display()))?;

    debug!(%format, path = %path.display(), bytes = contents.len(), "export written");
    Ok(())
}

pub fn export_to_csv(data: &str, path: &Path) -> Result<()> {
    export(ExportFormat::Csv, data, path)
}

pub fn export_to_json(data: &str, path: &Path) -> Result<()> {
    export(ExportFormat::Json, data, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_export_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        export_to_csv("a,b,c", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b,c");
    }

    #[test]
    fn csv_export_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "a much longer previous content").unwrap();

        export_to_csv("x", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn json_export_wraps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        export_to_json("hello", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"data":"hello"}"#);
    }

    #[test]
    fn json_export_escapes_quotes_and_backslashes() {
        let rendered = render(ExportFormat::Json, r#"say "hi" \ bye"#).unwrap();
        assert_eq!(rendered, r#"{"data":"say \"hi\" \\ bye"}"#);

        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["data"], r#"say "hi" \ bye"#);
    }

    #[test]
    fn export_to_missing_directory_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");

        let err = export_to_csv("a", &path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Failed to write CSV export"));
        assert!(msg.contains("no-such-dir"));
    }
}
