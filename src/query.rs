// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build the JQL filters for the epic search and the two per-epic child counts
// role: query/builder
// inputs: explicit project key or configured defaults; ReportWindow
// outputs: JQL strings
// invariants:
// - Project resolution happens before any network call; an empty resolution is ConfigError::NoProjects
// - Every user-supplied value is emitted inside escaped double quotes
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::config::ConfigError;
use crate::window::ReportWindow;

/// Pick the projects to scan: the explicit key wins, otherwise the configured list.
pub fn resolve_projects(explicit: Option<&str>, defaults: &[String]) -> Result<Vec<String>, ConfigError> {
  if let Some(p) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
    return Ok(vec![p.to_string()]);
  }

  if defaults.is_empty() {
    return Err(ConfigError::NoProjects);
  }

  Ok(defaults.to_vec())
}

/// Epics that left, entered, or sit in "In Progress" during the window.
pub fn epic_jql(projects: &[String], window: ReportWindow) -> String {
  let project_clause = projects
    .iter()
    .map(|p| format!("project = {}", quoted(p)))
    .collect::<Vec<_>>()
    .join(" OR ");
  let w = window.jql_predicate();

  format!(
    "({project_clause}) AND issuetype = Epic AND (\
     status CHANGED FROM \"In Progress\" {w} OR \
     status CHANGED TO \"In Progress\" {w} OR \
     status = \"In Progress\")"
  )
}

/// Every child linked to the epic, regardless of status.
pub fn total_children_jql(epic_key: &str) -> String {
  format!("\"Epic Link\" = {}", quoted(epic_key))
}

/// Children that were in progress during the window and have since left that category.
pub fn done_children_jql(epic_key: &str, window: ReportWindow) -> String {
  format!(
    "\"Epic Link\" = {} AND status WAS \"In Progress\" {} AND statusCategory != \"In Progress\"",
    quoted(epic_key),
    window.jql_predicate()
  )
}

fn quoted(value: &str) -> String {
  format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
