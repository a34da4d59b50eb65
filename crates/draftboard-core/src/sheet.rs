// Workbook loading: one CSV file per category, parsed into candidate rows.
//
// A workbook is a directory. Every `*.csv` file inside is a sheet whose
// category name is the file stem (`QB.csv` -> "QB"). The name and rank
// columns are located by header; every other column is carried as payload.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ColumnConfig;
use crate::draft::{Candidate, DraftError, RankedList};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("unknown category '{category}'")]
    UnknownCategory { category: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path}: missing column '{column}'")]
    MissingColumn { path: String, column: String },

    #[error("{path}: line {line}: empty player name")]
    EmptyName { path: String, line: u64 },

    #[error("{path}: line {line}: invalid rank '{value}' for '{name}'")]
    InvalidRank {
        path: String,
        line: u64,
        name: String,
        value: String,
    },

    #[error("{path}: {source}")]
    Draft { path: String, source: DraftError },
}

// ---------------------------------------------------------------------------
// Sheet
// ---------------------------------------------------------------------------

/// A loaded category: headers, rows in file order, and the rank ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub category: String,
    pub columns: Vec<String>,
    /// Candidates in the order they appear in the source.
    pub candidates: Vec<Candidate>,
    ranked: RankedList,
}

impl Sheet {
    /// Build a sheet, deriving the rank ordering and validating names.
    pub fn new(
        category: impl Into<String>,
        columns: Vec<String>,
        candidates: Vec<Candidate>,
    ) -> Result<Self, DraftError> {
        let ranked = RankedList::new(&candidates)?;
        Ok(Sheet {
            category: category.into(),
            columns,
            candidates,
            ranked,
        })
    }

    pub fn ranked(&self) -> &RankedList {
        &self.ranked
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Data source seam
// ---------------------------------------------------------------------------

/// Supplies category names and loads a category's rows on demand.
pub trait SheetSource {
    /// Category names in display order.
    fn categories(&self) -> &[String];

    /// Load one category. Called on every category switch.
    fn load(&self, category: &str) -> Result<Sheet, SheetError>;
}

/// A directory of CSV sheets.
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    dir: PathBuf,
    columns: ColumnConfig,
    categories: Vec<String>,
    paths: HashMap<String, PathBuf>,
}

impl CsvWorkbook {
    /// Scan `dir` for `*.csv` sheets.
    ///
    /// `default_category` is listed first when present; the remaining
    /// categories are sorted alphabetically.
    pub fn open(
        dir: &Path,
        columns: ColumnConfig,
        default_category: &str,
    ) -> Result<Self, SheetError> {
        let io_err = |source| SheetError::Io {
            path: dir.display().to_string(),
            source,
        };

        let mut paths = HashMap::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                paths.insert(stem.to_string(), path.clone());
            }
        }

        let mut categories: Vec<String> = paths.keys().cloned().collect();
        categories.sort_by(|a, b| {
            (a != default_category)
                .cmp(&(b != default_category))
                .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        });

        info!(
            "Opened workbook {} with {} sheets",
            dir.display(),
            categories.len()
        );

        Ok(CsvWorkbook {
            dir: dir.to_path_buf(),
            columns,
            categories,
            paths,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SheetSource for CsvWorkbook {
    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn load(&self, category: &str) -> Result<Sheet, SheetError> {
        let path = self
            .paths
            .get(category)
            .ok_or_else(|| SheetError::UnknownCategory {
                category: category.to_string(),
            })?;
        let label = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|source| SheetError::Io {
            path: label.clone(),
            source,
        })?;
        let sheet = read_sheet(category, file, &self.columns, &label)?;
        debug!("Loaded sheet '{}' ({} rows)", category, sheet.len());
        Ok(sheet)
    }
}

// ---------------------------------------------------------------------------
// Reader-based parsing (testable without files)
// ---------------------------------------------------------------------------

/// Parse CSV text into a sheet.
///
/// `label` names the source in error messages.
pub fn read_sheet<R: Read>(
    category: &str,
    rdr: R,
    columns: &ColumnConfig,
    label: &str,
) -> Result<Sheet, SheetError> {
    let csv_err = |source| SheetError::Csv {
        path: label.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    let name_idx = find_column(&headers, &columns.name, label)?;
    let rank_idx = find_column(&headers, &columns.rank, label)?;

    let mut candidates = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let name = record.get(name_idx).unwrap_or("").to_string();
        if name.is_empty() {
            return Err(SheetError::EmptyName {
                path: label.to_string(),
                line,
            });
        }

        let raw_rank = record.get(rank_idx).unwrap_or("");
        let rank = parse_rank(raw_rank).ok_or_else(|| SheetError::InvalidRank {
            path: label.to_string(),
            line,
            name: name.clone(),
            value: raw_rank.to_string(),
        })?;

        let fields = record.iter().map(str::to_string).collect();
        candidates.push(Candidate::with_fields(name, rank, fields));
    }

    Sheet::new(category, headers, candidates).map_err(|source| SheetError::Draft {
        path: label.to_string(),
        source,
    })
}

/// Index of the header matching `wanted`, ignoring case and padding.
fn find_column(headers: &[String], wanted: &str, label: &str) -> Result<usize, SheetError> {
    let wanted = wanted.trim();
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| SheetError::MissingColumn {
            path: label.to_string(),
            column: wanted.to_string(),
        })
}

fn parse_rank(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
