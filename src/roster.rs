// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn the HR spreadsheet (xlsx workbook or CSV export) into the team roster JSON used by the capitalization workbook
// role: roster/transform
// inputs: First worksheet (or CSV) with a header row containing Name and Department; allowed department set; project keys
// outputs: RosterDocument {timestamp, jira_projects, team[]} written as pretty JSON
// side_effects: Reads the input file (reader chosen by extension: .csv is CSV, anything else a workbook); writes the output file
// invariants:
// - Departments are trimmed and upper-cased before matching
// - Rows outside the allowed set are dropped entirely
// - "Last, First" becomes "First Last"; names without exactly one comma are kept as-is
// errors: RosterError with file path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader};
use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use serde::Serialize;
use thiserror::Error;

pub const NAME_COLUMN: &str = "Name";
pub const DEPARTMENT_COLUMN: &str = "Department";

pub const DEFAULT_DEPARTMENTS: [&str; 5] = [
  "DEVELOPMENT",
  "DEV OPS",
  "PRODUCT TEAM",
  "QUALITY ASSURANCE",
  "RCM PRODUCT",
];

/// Used when no DEFAULT_JIRA_PROJECTS are configured.
pub const FALLBACK_PROJECTS: [&str; 10] = ["PF", "EMR", "CRM", "ECAL", "KCI", "AO", "INN", "KPUI", "KCOM", "ANA"];

#[derive(Debug, Error)]
pub enum RosterError {
  #[error("reading {}: {source}", path.display())]
  Read { path: PathBuf, source: csv::Error },
  #[error("reading {}: {source}", path.display())]
  Workbook { path: PathBuf, source: calamine::Error },
  #[error("{} has no worksheet with a header row", path.display())]
  EmptyWorkbook { path: PathBuf },
  #[error("{} has no {column:?} column", path.display())]
  MissingColumn { path: PathBuf, column: &'static str },
  #[error("writing {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
  pub name: String,
  pub department: String,
  pub pod: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterDocument {
  pub timestamp: String,
  pub jira_projects: Vec<String>,
  pub team: Vec<RosterEntry>,
}

/// "Smith, Jane" → "Jane Smith". Anything else comes back unchanged.
pub fn flip_name(name: &str) -> String {
  let parts: Vec<&str> = name.split(',').map(str::trim).collect();
  match parts.as_slice() {
    [last, first] => format!("{first} {last}"),
    _ => name.to_string(),
  }
}

pub fn normalize_department(raw: &str) -> String {
  raw.trim().to_uppercase()
}

/// `2025-08-15 09:05 AM ET`, always in New York time.
pub fn eastern_timestamp(now: DateTime<Utc>) -> String {
  format!("{} ET", now.with_timezone(&New_York).format("%Y-%m-%d %I:%M %p"))
}

/// How the roster input is stored, judged by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
  Csv,
  /// xlsx/xlsm/xlsb/xls/ods; the first worksheet is read.
  Workbook,
}

impl InputFormat {
  pub fn for_path(path: &Path) -> Self {
    match path.extension().and_then(|e| e.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
      _ => InputFormat::Workbook,
    }
  }
}

/// Read roster rows from CSV, keeping only allowed departments.
pub fn read_entries<R: Read>(input: R, source: &Path, allowed: &[String]) -> Result<Vec<RosterEntry>, RosterError> {
  let read_err = |e: csv::Error| RosterError::Read {
    path: source.to_path_buf(),
    source: e,
  };

  let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(input);
  let headers: Vec<String> = rdr.headers().map_err(read_err)?.iter().map(str::to_string).collect();
  let mut rows = Vec::new();
  for record in rdr.records() {
    rows.push(record.map_err(read_err)?.iter().map(str::to_string).collect());
  }

  select_entries(source, &headers, rows, allowed)
}

/// Read roster rows from the first worksheet of a workbook, keeping only allowed departments.
pub fn read_workbook(path: &Path, allowed: &[String]) -> Result<Vec<RosterEntry>, RosterError> {
  let wb_err = |e: calamine::Error| RosterError::Workbook {
    path: path.to_path_buf(),
    source: e,
  };
  let empty = || RosterError::EmptyWorkbook {
    path: path.to_path_buf(),
  };

  let mut workbook = calamine::open_workbook_auto(path).map_err(wb_err)?;
  let range = workbook.worksheet_range_at(0).ok_or_else(empty)?.map_err(wb_err)?;

  let mut rows = range.rows().map(|r| r.iter().map(cell_text).collect::<Vec<String>>());
  let headers = rows.next().ok_or_else(empty)?;

  select_entries(path, &headers, rows, allowed)
}

fn cell_text(cell: &Data) -> String {
  match cell {
    Data::String(s) => s.clone(),
    Data::Empty => String::new(),
    other => other.to_string(),
  }
}

fn select_entries<I>(source: &Path, headers: &[String], rows: I, allowed: &[String]) -> Result<Vec<RosterEntry>, RosterError>
where
  I: IntoIterator<Item = Vec<String>>,
{
  let column = |name: &'static str| {
    headers
      .iter()
      .position(|h| h.trim() == name)
      .ok_or_else(|| RosterError::MissingColumn {
        path: source.to_path_buf(),
        column: name,
      })
  };
  let name_idx = column(NAME_COLUMN)?;
  let dept_idx = column(DEPARTMENT_COLUMN)?;

  let mut out = Vec::new();
  for row in rows {
    let department = normalize_department(row.get(dept_idx).map(String::as_str).unwrap_or_default());

    if !allowed.iter().any(|a| *a == department) {
      continue;
    }

    out.push(RosterEntry {
      name: flip_name(row.get(name_idx).map(String::as_str).unwrap_or_default()),
      department,
      pod: String::new(),
    });
  }

  tracing::debug!(kept = out.len(), "roster rows selected");
  Ok(out)
}

/// Read `input`, filter, and write the roster document to `output`.
pub fn export(
  input: &Path,
  output: &Path,
  allowed: &[String],
  projects: Vec<String>,
  now: DateTime<Utc>,
) -> Result<RosterDocument, RosterError> {
  let allowed: Vec<String> = allowed.iter().map(|d| normalize_department(d)).collect();
  let team = match InputFormat::for_path(input) {
    InputFormat::Csv => {
      let file = std::fs::File::open(input).map_err(|e| RosterError::Read {
        path: input.to_path_buf(),
        source: csv::Error::from(e),
      })?;
      read_entries(file, input, &allowed)?
    }
    InputFormat::Workbook => read_workbook(input, &allowed)?,
  };

  let doc = RosterDocument {
    timestamp: eastern_timestamp(now),
    jira_projects: projects,
    team,
  };

  let write_err = |e: std::io::Error| RosterError::Write {
    path: output.to_path_buf(),
    source: e,
  };
  let body = serde_json::to_string_pretty(&doc).map_err(|e| write_err(e.into()))?;
  std::fs::write(output, body).map_err(write_err)?;

  Ok(doc)
}
