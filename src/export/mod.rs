//! Read-only exports of the current ledger.

pub mod csv;
pub mod json;
pub mod report;

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    core::utils::ensure_dir,
    currency::LocaleConfig,
    errors::{LedgerError, Result},
    ledger::LedgerState,
    storage::json_backend::{tmp_path, write_atomic},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Pdf];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// `budget-<date>.csv|json` or `budget-report-<date>.pdf`.
    pub fn file_name(&self, today: NaiveDate) -> String {
        let date = today.format("%Y-%m-%d");
        match self {
            ExportFormat::Pdf => format!("budget-report-{date}.pdf"),
            other => format!("budget-{date}.{}", other.as_str()),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "pdf" | "report" => Ok(ExportFormat::Pdf),
            other => Err(LedgerError::validation(format!(
                "unknown export format `{other}` (expected csv, json or pdf)"
            ))),
        }
    }
}

/// Produces the export payload without touching the filesystem.
pub fn render(
    format: ExportFormat,
    state: &LedgerState,
    locale: &LocaleConfig,
    updated_at: DateTime<Utc>,
) -> Result<Vec<u8>> {
    Ok(match format {
        ExportFormat::Csv => csv::render(&state.records).into_bytes(),
        ExportFormat::Json => json::render(state, updated_at)?.into_bytes(),
        ExportFormat::Pdf => report::render(state, locale),
    })
}

/// Writes the export into `dir` (created if needed) and returns the file path.
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    state: &LedgerState,
    locale: &LocaleConfig,
    today: NaiveDate,
    updated_at: DateTime<Utc>,
) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let bytes = render(format, state, locale, updated_at)?;
    let path = dir.join(format.file_name(today));
    let tmp = tmp_path(&path);
    write_atomic(&tmp, &bytes)?;
    fs::rename(&tmp, &path)?;
    tracing::info!(path = %path.display(), %format, "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_format() {
        let day = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
        assert_eq!(ExportFormat::Csv.file_name(day), "budget-2025-10-14.csv");
        assert_eq!(ExportFormat::Json.file_name(day), "budget-2025-10-14.json");
        assert_eq!(
            ExportFormat::Pdf.file_name(day),
            "budget-report-2025-10-14.pdf"
        );
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("report".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
