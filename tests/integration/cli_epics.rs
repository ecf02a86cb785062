use std::path::Path;

use test_support::{cmd_bin, read_fixture_text, tempdir, StubServer};

fn count_body(total: u64) -> String {
  format!(r#"{{"startAt":0,"maxResults":0,"total":{total},"issues":[]}}"#)
}

fn epics_cmd(cwd: &Path, base_url: &str) -> assert_cmd::Command {
  let mut cmd = cmd_bin("softcap", cwd);
  cmd
    .env("JIRA_BASE_URL", base_url)
    .env("JIRA_EMAIL", "ops@acme.test")
    .env("JIRA_TOKEN", "secret")
    .args(["epics", "--quiet", "--now-override", "2025-08-15T12:00:00"]);
  cmd
}

/// Epic page, then (total, done) for PF-101, PF-102, EMR-7 in server order.
fn scripted_run() -> Vec<(u16, String)> {
  vec![
    (200, read_fixture_text("epic_search.json")),
    (200, count_body(8)),
    (200, count_body(3)),
    (200, count_body(4)),
    (200, count_body(0)),
    (200, count_body(5)),
    (200, count_body(2)),
  ]
}

#[test]
fn missing_credentials_fail_before_any_request() {
  let dir = tempdir();
  let out = cmd_bin("softcap", dir.path()).args(["epics", "--project", "PF"]).output().unwrap();

  assert!(!out.status.success());
  assert!(out.stdout.is_empty());
  let err = String::from_utf8_lossy(&out.stderr);
  assert!(err.contains("missing environment variable JIRA_"), "stderr: {err}");
}

#[test]
fn no_project_anywhere_is_a_configuration_error() {
  let dir = tempdir();
  let out = epics_cmd(dir.path(), "http://127.0.0.1:9").output().unwrap();

  assert!(!out.status.success());
  assert!(out.stdout.is_empty());
  let err = String::from_utf8_lossy(&out.stderr);
  assert!(err.contains("DEFAULT_JIRA_PROJECTS is empty"), "stderr: {err}");
}

#[test]
fn table_report_end_to_end() {
  let dir = tempdir();
  let server = StubServer::start(scripted_run());
  let out = epics_cmd(dir.path(), &server.url())
    .args(["--project", "PF", "--month", "last"])
    .output()
    .unwrap();
  let requests = server.finish();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  let text = String::from_utf8_lossy(&out.stdout);

  assert!(text.contains("[Key]"));
  assert!(text.contains("PF-101"));
  assert!(text.contains("EMR-7"));
  assert!(!text.contains("PF-102"), "zero completed children is hidden by default");
  // Analytics sorts ahead of Core
  assert!(text.find("EMR-7").unwrap() < text.find("PF-101").unwrap());
  assert!(text.contains("Timeframe: startOfMonth(-1) to startOfMonth() (2025-07-01 to 2025-08-01)"));
  assert!(text.contains("Total Epics: 2\n"));
  assert!(text.contains("Total Completed Child Tickets: 5\n"));
  assert!(text.contains("Runtime: "));

  assert_eq!(requests.len(), 7);
  let search = &requests[0];
  assert_eq!(search.method, "GET");
  assert_eq!(search.header("authorization"), Some("Basic b3BzQGFjbWUudGVzdDpzZWNyZXQ="));
  let jql = search.query_param("jql").unwrap();
  assert!(jql.starts_with("(project = \"PF\") AND issuetype = Epic"), "jql: {jql}");
  assert_eq!(search.query_param("maxResults").as_deref(), Some("100"));

  let total_q = &requests[1];
  assert_eq!(total_q.query_param("jql").as_deref(), Some("\"Epic Link\" = \"PF-101\""));
  assert_eq!(total_q.query_param("maxResults").as_deref(), Some("0"));
  assert!(requests[2].query_param("jql").unwrap().contains("statusCategory != \"In Progress\""));
}

#[test]
fn show_all_lists_every_epic() {
  let dir = tempdir();
  let server = StubServer::start(scripted_run());
  let out = epics_cmd(dir.path(), &server.url())
    .args(["--project", "PF", "-a"])
    .output()
    .unwrap();
  server.finish();

  assert!(out.status.success());
  let text = String::from_utf8_lossy(&out.stdout);
  assert!(text.contains("PF-102"));
  assert!(text.contains("Total Epics: 3\n"));
  assert!(text.contains("Total Completed Child Tickets: 5\n"));
}

#[test]
fn pod_filter_skips_other_teams() {
  let dir = tempdir();
  let server = StubServer::start(vec![
    (200, read_fixture_text("epic_search.json")),
    (200, count_body(5)),
    (200, count_body(2)),
  ]);
  let out = epics_cmd(dir.path(), &server.url())
    .args(["--project", "PF", "--pod", "Analytics", "--format", "json"])
    .output()
    .unwrap();
  let requests = server.finish();

  assert!(out.status.success());
  assert_eq!(requests.len(), 3, "only EMR-7 gets child queries");
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(v["total_epics"], 1);
  assert_eq!(v["total_completed_child_tickets"], 2);
  assert_eq!(v["epics"][0]["key"], "EMR-7");
  assert_eq!(v["epics"][0]["team"], "Analytics");
}

#[test]
fn failed_child_query_degrades_that_epic_only() {
  let dir = tempdir();
  let server = StubServer::start(vec![
    (200, read_fixture_text("epic_search.json")),
    (200, count_body(8)),
    (500, "{}".into()),
    (200, count_body(4)),
    (200, count_body(0)),
    (200, count_body(5)),
    (200, count_body(2)),
  ]);
  let out = epics_cmd(dir.path(), &server.url())
    .args(["--project", "PF", "--show-all"])
    .output()
    .unwrap();
  server.finish();

  assert!(out.status.success());
  let text = String::from_utf8_lossy(&out.stdout);
  let pf101 = text.lines().find(|l| l.starts_with("PF-101")).unwrap();
  assert!(pf101.contains("N/A"));
  assert!(text.contains("Total Completed Child Tickets: 2\n"));
}

#[test]
fn bad_request_reports_invalid_project() {
  let dir = tempdir();
  let server = StubServer::start(vec![(400, r#"{"errorMessages":["The value 'NOPE' does not exist"]}"#.into())]);
  let out = epics_cmd(dir.path(), &server.url())
    .args(["--project", "NOPE"])
    .output()
    .unwrap();
  server.finish();

  assert!(!out.status.success());
  assert!(out.stdout.is_empty());
  let err = String::from_utf8_lossy(&out.stderr);
  assert!(err.contains("Jira returns 400 - possibly not a valid project key."), "stderr: {err}");
}

#[test]
fn dotenv_in_working_directory_supplies_config() {
  let dir = tempdir();
  let server = StubServer::start(vec![(200, r#"{"issues":[],"total":0}"#.into())]);
  std::fs::write(
    dir.path().join(".env"),
    format!(
      "JIRA_BASE_URL={}\nJIRA_EMAIL=ops@acme.test\nJIRA_TOKEN=secret\nDEFAULT_JIRA_PROJECTS=PF,EMR\n",
      server.url()
    ),
  )
  .unwrap();

  let out = cmd_bin("softcap", dir.path()).args(["epics", "--quiet"]).output().unwrap();
  let requests = server.finish();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  assert_eq!(String::from_utf8_lossy(&out.stdout), "No epics found matching the criteria.\n");
  let jql = requests[0].query_param("jql").unwrap();
  assert!(jql.starts_with("(project = \"PF\" OR project = \"EMR\")"), "jql: {jql}");
  assert!(jql.contains("AFTER startOfMonth()"));
}

#[test]
fn invalid_month_is_a_usage_error() {
  let dir = tempdir();
  let out = cmd_bin("softcap", dir.path()).args(["epics", "--month", "june"]).output().unwrap();
  assert_eq!(out.status.code(), Some(2));
}
