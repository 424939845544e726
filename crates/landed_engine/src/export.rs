use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local};
use engine_logging::engine_info;
use landed_core::Listing;
use tempfile::NamedTempFile;

pub const CSV_HEADER: &str =
    "Title,Company,Location,Salary Min,Salary Max,Category,Date Posted,URL";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_filename: String,
    /// chrono `strftime` pattern for the Date Posted column.
    pub date_format: String,
    /// Offset used for Date Posted; `None` means the machine's local zone.
    pub utc_offset: Option<FixedOffset>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_filename: "getlanded_jobs.csv".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            utc_offset: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub row_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Renders the header plus one row per listing. Rows are joined with `\n`
/// and there is no trailing newline.
pub fn render_csv(listings: &[Listing], options: &ExportOptions) -> String {
    let mut out = String::from(CSV_HEADER);
    for listing in listings {
        out.push('\n');
        out.push_str(&quoted(&listing.title));
        out.push(',');
        out.push_str(&quoted(&listing.company));
        out.push(',');
        out.push_str(&quoted(&listing.location));
        out.push(',');
        out.push_str(&salary_cell(listing.salary_min));
        out.push(',');
        out.push_str(&salary_cell(listing.salary_max));
        out.push(',');
        out.push_str(&quoted(&listing.category));
        out.push(',');
        out.push_str(&quoted_if_needed(date_cell(&listing.created, options)));
        out.push(',');
        out.push_str(&quoted_if_needed(listing.url.clone()));
    }
    out
}

/// Writes the rendered CSV to `{dir}/{output_filename}`, replacing any
/// previous export.
pub fn write_csv_export(
    dir: &Path,
    listings: &[Listing],
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let content = render_csv(listings, options);
    let output_path = write_atomically(dir, &options.output_filename, &content)?;
    engine_info!(
        "Exported {} listings to {}",
        listings.len(),
        output_path.display()
    );
    Ok(ExportSummary {
        row_count: listings.len(),
        output_path,
    })
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

// Bare columns are quoted only when a delimiter, quote or line break would
// otherwise split the row.
fn quoted_if_needed(value: String) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(&value)
    } else {
        value
    }
}

// f64 Display already drops the fraction of integral values.
fn salary_cell(value: Option<f64>) -> String {
    match value {
        Some(amount) => amount.to_string(),
        None => "N/A".to_string(),
    }
}

fn date_cell(created: &str, options: &ExportOptions) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(created) else {
        return created.to_string();
    };
    // An invalid pattern makes chrono's formatter fail; keep the raw value then.
    let mut cell = String::new();
    let written = match options.utc_offset {
        Some(offset) => write!(
            cell,
            "{}",
            parsed.with_timezone(&offset).format(&options.date_format)
        ),
        None => write!(
            cell,
            "{}",
            parsed.with_timezone(&Local).format(&options.date_format)
        ),
    };
    match written {
        Ok(()) => cell,
        Err(_) => created.to_string(),
    }
}

fn ensure_output_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ExportError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

fn write_atomically(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, ExportError> {
    ensure_output_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| ExportError::Io(e.error))?;
    Ok(target)
}
