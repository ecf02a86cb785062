use std::time::Duration;

use serde::Serialize;

use crate::tracker::model::{ChildStats, Epic, NOT_AVAILABLE};
use crate::window::ReportWindow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
  pub epic: Epic,
  pub stats: ChildStats,
}

/// Which rows survive into the report.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
  /// Keep epics without completed children (and those whose counts are unavailable).
  pub include_all: bool,
  /// Exact, case-sensitive team label; "N/A" selects epics without a team.
  pub pod: Option<String>,
}

impl RowFilter {
  pub fn matches_team(&self, team: &str) -> bool {
    self.pod.as_deref().map_or(true, |p| p == team)
  }

  pub fn keeps(&self, row: &ReportRow) -> bool {
    (self.include_all || row.stats.has_completed_children()) && self.matches_team(&row.epic.team)
  }
}

/// Filter, then sort by (team, key).
pub fn select_rows(rows: Vec<ReportRow>, filter: &RowFilter) -> Vec<ReportRow> {
  let mut kept: Vec<ReportRow> = rows.into_iter().filter(|r| filter.keeps(r)).collect();
  kept.sort_by(|a, b| (&a.epic.team, &a.epic.key).cmp(&(&b.epic.team, &b.epic.key)));
  kept
}

#[derive(Debug, Clone, Serialize)]
pub struct Timeframe {
  pub label: String,
  pub since: String,
  pub until: String,
}

impl Timeframe {
  pub fn new(window: ReportWindow, now: chrono::DateTime<chrono::Local>) -> Self {
    let (since, until) = window.calendar_bounds(now);
    Self {
      label: window.jql_label().to_string(),
      since,
      until,
    }
  }
}

#[derive(Debug, Clone)]
pub struct Summary {
  pub timeframe: Timeframe,
  pub total_epics: usize,
  /// Sum over rows with known counts; unavailable rows add nothing.
  pub total_completed_child_tickets: u64,
}

pub fn summarize(rows: &[ReportRow], timeframe: Timeframe) -> Summary {
  Summary {
    timeframe,
    total_epics: rows.len(),
    total_completed_child_tickets: rows.iter().filter_map(|r| r.stats.done()).sum(),
  }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
  Left,
  Right,
}

const COLUMNS: [(&str, Align); 9] = [
  ("Key", Align::Left),
  ("Summary", Align::Left),
  ("Status", Align::Left),
  ("Start Date", Align::Left),
  ("End Date", Align::Left),
  ("TT", Align::Right),
  ("TD", Align::Right),
  ("Team", Align::Left),
  ("BC", Align::Left),
];

const GAP: &str = "  ";

fn cells(row: &ReportRow) -> [String; 9] {
  let count = |n: Option<u64>| n.map(|n| n.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string());
  let date = |d: &Option<String>| d.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
  let e = &row.epic;

  [
    e.key.clone(),
    e.summary.clone(),
    e.status.clone(),
    date(&e.start_date),
    date(&e.end_date),
    count(row.stats.total()),
    count(row.stats.done()),
    e.team.clone(),
    e.business_category.clone(),
  ]
}

fn width(s: &str) -> usize {
  s.chars().count()
}

fn pad(s: &str, w: usize, align: Align) -> String {
  let fill = " ".repeat(w.saturating_sub(width(s)));
  match align {
    Align::Left => format!("{s}{fill}"),
    Align::Right => format!("{fill}{s}"),
  }
}

fn line(values: &[String], widths: &[usize]) -> String {
  values
    .iter()
    .zip(widths)
    .zip(COLUMNS.iter())
    .map(|((v, w), (_, align))| pad(v, *w, *align))
    .collect::<Vec<_>>()
    .join(GAP)
    .trim_end()
    .to_string()
}

/// Fixed-width table with bracketed headers and dash rules around the header and after the last row.
pub fn render_table(rows: &[ReportRow]) -> String {
  let headers: Vec<String> = COLUMNS.iter().map(|(h, _)| format!("[{h}]")).collect();
  let body: Vec<[String; 9]> = rows.iter().map(cells).collect();

  let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
  for r in &body {
    for (w, c) in widths.iter_mut().zip(r.iter()) {
      *w = (*w).max(width(c));
    }
  }

  let rule = "-".repeat(widths.iter().sum::<usize>() + GAP.len() * (widths.len() - 1));
  let mut out = String::new();

  out.push_str(&rule);
  out.push('\n');
  out.push_str(&line(&headers, &widths));
  out.push('\n');
  out.push_str(&rule);
  out.push('\n');
  for r in &body {
    out.push_str(&line(r, &widths));
    out.push('\n');
  }
  out.push_str(&rule);
  out.push('\n');
  out
}

pub fn render_summary(summary: &Summary, elapsed: Duration) -> String {
  let tf = &summary.timeframe;
  format!(
    "\n---------- Summary ----------\n\
     Timeframe: {} ({} to {})\n\
     Total Epics: {}\n\
     Total Completed Child Tickets: {}\n\
     Runtime: {:.2} seconds\n",
    tf.label,
    tf.since,
    tf.until,
    summary.total_epics,
    summary.total_completed_child_tickets,
    elapsed.as_secs_f64()
  )
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
  key: &'a str,
  summary: &'a str,
  status: &'a str,
  start_date: Option<&'a str>,
  end_date: Option<&'a str>,
  total_children: Option<u64>,
  done_children: Option<u64>,
  team: &'a str,
  business_category: &'a str,
}

/// Machine-readable form of the same rows and summary.
pub fn render_json(rows: &[ReportRow], summary: &Summary, elapsed: Duration) -> serde_json::Value {
  let epics: Vec<JsonRow<'_>> = rows
    .iter()
    .map(|r| JsonRow {
      key: &r.epic.key,
      summary: &r.epic.summary,
      status: &r.epic.status,
      start_date: r.epic.start_date.as_deref(),
      end_date: r.epic.end_date.as_deref(),
      total_children: r.stats.total(),
      done_children: r.stats.done(),
      team: &r.epic.team,
      business_category: &r.epic.business_category,
    })
    .collect();

  serde_json::json!({
    "timeframe": summary.timeframe,
    "total_epics": summary.total_epics,
    "total_completed_child_tickets": summary.total_completed_child_tickets,
    "runtime_seconds": (elapsed.as_secs_f64() * 100.0).round() / 100.0,
    "epics": epics,
  })
}
