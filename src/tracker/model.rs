// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed shapes for tracker search responses and the epic/child-count domain values
// role: model/types
// outputs: SearchPage, Issue, Epic, ChildStats
// invariants:
// - Epic fields are read verbatim from the issue; absent select fields become the "N/A" label
// - ChildStats is either a full pair of counts or Unavailable; never a partial pair
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::Deserialize;

use crate::config::FieldMap;
use crate::ext::serde_json::JsonFetch;

/// Label used when a text or select field is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// One page of `/rest/api/3/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
  #[serde(default)]
  pub issues: Vec<Issue>,
  #[serde(default)]
  pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Issue {
  pub key: String,
  #[serde(default)]
  pub fields: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Epic {
  pub key: String,
  pub summary: String,
  pub status: String,
  pub start_date: Option<String>,
  pub end_date: Option<String>,
  pub team: String,
  pub business_category: String,
}

impl Epic {
  pub fn from_issue(issue: &Issue, fields: &FieldMap) -> Self {
    let f = &issue.fields;
    let or_na = |v: Option<String>| v.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Self {
      key: issue.key.clone(),
      summary: or_na(f.fetch("summary").text()),
      status: or_na(f.fetch("status.name").text()),
      start_date: f.fetch(&fields.start_date).text(),
      end_date: f.fetch(&fields.end_date).text(),
      team: or_na(f.fetch(&fields.pod).option_label()),
      business_category: or_na(f.fetch(&fields.business_category).option_label()),
    }
  }
}

/// Child-ticket counts for one epic, or the marker that they could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStats {
  Counted { total: u64, done: u64 },
  Unavailable,
}

impl ChildStats {
  /// Completed children, when known.
  pub fn done(&self) -> Option<u64> {
    match self {
      ChildStats::Counted { done, .. } => Some(*done),
      ChildStats::Unavailable => None,
    }
  }

  pub fn total(&self) -> Option<u64> {
    match self {
      ChildStats::Counted { total, .. } => Some(*total),
      ChildStats::Unavailable => None,
    }
  }

  pub fn has_completed_children(&self) -> bool {
    self.done().is_some_and(|d| d > 0)
  }
}
