// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run the epic report end to end: query, page, aggregate children, filter/sort, render
// role: processing/orchestrator
// inputs: SearchApi backend, FieldMap, ReportConfig (resolved projects, window, filter, format)
// outputs: Table or JSON report written to the provided writer; Outcome describing what was printed
// side_effects: Network calls through SearchApi; spinner output on stderr when enabled
// invariants:
// - A failed epic search aborts before anything is written
// - Zero epics ⇒ "No epics found" message, not an empty table
// - Epics outside the team filter cost no child queries
// - Child queries run one epic at a time, in server order
// errors: ReportError (bad request vs other fetch failures vs write failures)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::time::Instant;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::FieldMap;
use crate::progress::Progress;
use crate::query;
use crate::render::{self, ReportRow, RowFilter, Timeframe};
use crate::tracker::api::{FetchError, SearchApi};
use crate::tracker::children::child_stats;
use crate::tracker::fetch::{fetch_all, PAGE_SIZE};
use crate::tracker::model::Epic;
use crate::window::ReportWindow;

pub const NO_EPICS: &str = "No epics found matching the criteria.";
pub const NO_MATCHES: &str = "No matching epics with completed children.";

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
  Table,
  Json,
}

/// Everything one report run needs, already validated.
#[derive(Debug, Clone)]
pub struct ReportConfig {
  pub projects: Vec<String>,
  pub window: ReportWindow,
  pub filter: RowFilter,
  pub format: OutputFormat,
  pub progress: Progress,
  pub now: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  NoEpics,
  NoMatches,
  Rendered { epics: usize, completed_children: u64 },
}

#[derive(Debug, Error)]
pub enum ReportError {
  #[error("Jira returns 400 - possibly not a valid project key.")]
  InvalidProject,
  #[error("Error fetching epics: {0}")]
  Fetch(FetchError),
  #[error("writing report: {0}")]
  Io(#[from] std::io::Error),
}

impl From<FetchError> for ReportError {
  fn from(e: FetchError) -> Self {
    match e {
      FetchError::BadRequest => ReportError::InvalidProject,
      other => ReportError::Fetch(other),
    }
  }
}

/// Search epics, count children per epic, and write the report.
pub fn run_report(
  api: &dyn SearchApi,
  fields: &FieldMap,
  cfg: &ReportConfig,
  started: Instant,
  out: &mut dyn Write,
) -> Result<Outcome, ReportError> {
  // Phase 1: epic search (all pages, or nothing)
  let jql = query::epic_jql(&cfg.projects, cfg.window);
  tracing::info!(projects = ?cfg.projects, window = ?cfg.window, "searching epics");
  let issues = fetch_all(api, &jql, &fields.projection(), PAGE_SIZE)?;

  if issues.is_empty() {
    writeln!(out, "{NO_EPICS}")?;
    return Ok(Outcome::NoEpics);
  }

  // Phase 2: per-epic child counts, skipping epics the team filter would drop anyway
  let mut rows: Vec<ReportRow> = Vec::with_capacity(issues.len());
  for issue in &issues {
    let epic = Epic::from_issue(issue, fields);
    if !cfg.filter.matches_team(&epic.team) {
      continue;
    }
    let stats = child_stats(api, &epic.key, cfg.window, cfg.progress);
    rows.push(ReportRow { epic, stats });
  }
  tracing::info!(epics = issues.len(), aggregated = rows.len(), "child counts collected");

  // Phase 3: filter, sort, render
  let rows = render::select_rows(rows, &cfg.filter);
  if rows.is_empty() {
    writeln!(out, "{NO_MATCHES}")?;
    return Ok(Outcome::NoMatches);
  }

  let now = cfg.now.unwrap_or_else(Local::now);
  let summary = render::summarize(&rows, Timeframe::new(cfg.window, now));

  match cfg.format {
    OutputFormat::Table => {
      write!(out, "{}", render::render_table(&rows))?;
      write!(out, "{}", render::render_summary(&summary, started.elapsed()))?;
    }
    OutputFormat::Json => {
      let v = render::render_json(&rows, &summary, started.elapsed());
      let text = serde_json::to_string_pretty(&v).map_err(std::io::Error::from)?;
      writeln!(out, "{text}")?;
    }
  }

  Ok(Outcome::Rendered {
    epics: summary.total_epics,
    completed_children: summary.total_completed_child_tickets,
  })
}
