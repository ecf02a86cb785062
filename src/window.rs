use chrono::{DateTime, Datelike, Local, NaiveDate};
use clap::ValueEnum;

// Reporting-window types live here; the JQL side and the calendar side must agree.

/// Which calendar month the report covers.
#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ReportWindow {
  /// From the start of the current month onward.
  This,
  /// The full previous calendar month.
  Last,
}

impl ReportWindow {
  /// JQL date predicate appended to `status CHANGED ...` / `status WAS ...` clauses.
  pub fn jql_predicate(self) -> &'static str {
    match self {
      ReportWindow::This => "AFTER startOfMonth()",
      ReportWindow::Last => "DURING(startOfMonth(-1), startOfMonth())",
    }
  }

  /// Human label echoed in the summary, in the tracker's own vocabulary.
  pub fn jql_label(self) -> &'static str {
    match self {
      ReportWindow::This => "startOfMonth()",
      ReportWindow::Last => "startOfMonth(-1) to startOfMonth()",
    }
  }

  /// Concrete calendar bounds for `now`, rendered as `YYYY-MM-DD`.
  /// The open end of the current month renders as "now".
  pub fn calendar_bounds(self, now: DateTime<Local>) -> (String, String) {
    let this_start = first_of_month(now.year(), now.month());

    match self {
      ReportWindow::This => (fmt_day(this_start), "now".to_string()),
      ReportWindow::Last => {
        let (y, m) = if now.month() == 1 { (now.year() - 1, 12) } else { (now.year(), now.month() - 1) };
        (fmt_day(first_of_month(y, m)), fmt_day(this_start))
      }
    }
  }
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(year, month, 1)
}

fn fmt_day(d: Option<NaiveDate>) -> String {
  d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "?".to_string())
}

/// Parse a `--now-override` string into a local DateTime.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive local timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`.
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Local>> {
  s.and_then(|raw| {
    chrono::DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Local))
      .or_else(|| {
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
  })
}
