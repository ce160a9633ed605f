//! Spreadsheet upload handling: validation, storage and sheet parsing

use crate::error::MatchError;
use crate::types::{FieldValue, Profile};
use calamine::{open_workbook_auto, DataType, Range, Reader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

pub const CANDIDATES_SHEET: &str = "Candidates";
pub const PROFESSORS_SHEET: &str = "Professors";
const ALLOWED_EXTENSION: &str = ".xlsx";

static UPLOAD_SEQ: AtomicU64 = AtomicU64::new(0);

/// Candidate and professor rows of one uploaded workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub candidates: Vec<Profile>,
    pub professors: Vec<Profile>,
}

/// Reject empty or non-`.xlsx` filenames
pub fn validate_upload(filename: Option<&str>) -> Result<&str, MatchError> {
    let name = match filename {
        Some(name) if !name.is_empty() => name,
        _ => return Err(MatchError::InvalidUpload("No file selected.".to_string())),
    };
    if !name.ends_with(ALLOWED_EXTENSION) {
        return Err(MatchError::InvalidUpload(
            "Invalid file format. Only .xlsx files are allowed.".to_string(),
        ));
    }
    Ok(name)
}

/// Write the upload into `dir` under a name unique to this process and request.
///
/// Only the last path component of `filename` is kept, behind a
/// `<pid>-<seq>-` prefix so concurrent uploads of the same file never collide.
pub async fn save_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, MatchError> {
    let base = Path::new(filename)
        .file_name()
        .ok_or_else(|| MatchError::InvalidUpload("No file selected.".to_string()))?
        .to_string_lossy();
    let seq = UPLOAD_SEQ.fetch_add(1, Ordering::Relaxed);
    let path = dir.join(format!("{}-{}-{}", std::process::id(), seq, base));

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, bytes).await?;
    info!("File saved at {}", path.display());

    Ok(path)
}

/// Delete a saved upload once it has been parsed
pub async fn remove_upload(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove upload {}: {}", path.display(), e);
    }
}

/// Read both sheets from a workbook on disk. Blocking.
pub fn load_workbook(path: &Path) -> Result<Workbook, MatchError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| MatchError::Workbook(format!("Unable to open the workbook: {err}")))?;

    let mut read_sheet = |sheet: &str| -> Result<Vec<Profile>, MatchError> {
        let range = workbook
            .worksheet_range(sheet)
            .ok_or_else(|| MatchError::Workbook(format!("Unable to read the worksheet named '{sheet}'.")))?
            .map_err(|err| MatchError::Workbook(format!("Unable to read the worksheet data: {err}")))?;
        let profiles = profiles_from_range(&range);
        debug!("Read {} rows from sheet '{}'", profiles.len(), sheet);
        Ok(profiles)
    };

    let candidates = read_sheet(CANDIDATES_SHEET)?;
    let professors = read_sheet(PROFESSORS_SHEET)?;

    Ok(Workbook {
        candidates,
        professors,
    })
}

/// First row is the header; each later row with any value becomes a profile
pub fn profiles_from_range(range: &Range<DataType>) -> Vec<Profile> {
    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(header_name).collect(),
        None => return Vec::new(),
    };

    rows.filter(|row| row.iter().any(|cell| !matches!(cell, DataType::Empty)))
        .map(|row| {
            header
                .iter()
                .zip(row.iter())
                .filter(|(column, _)| !column.is_empty())
                .map(|(column, cell)| (column.clone(), cell_value(cell)))
                .collect()
        })
        .collect()
}

fn header_name(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        _ => cell.to_string().trim().to_string(),
    }
}

fn cell_value(cell: &DataType) -> FieldValue {
    match cell {
        DataType::Empty => FieldValue::Missing,
        DataType::String(s) => FieldValue::Text(s.clone()),
        DataType::Int(i) => FieldValue::Number(*i as f64),
        DataType::Float(f) => FieldValue::Number(*f),
        other => FieldValue::Text(other.to_string()),
    }
}
