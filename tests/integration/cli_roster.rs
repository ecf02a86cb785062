use test_support::{cmd_bin, fixtures_dir, tempdir};

#[test]
fn roster_export_end_to_end() {
  let dir = tempdir();
  std::fs::copy(fixtures_dir().join("roster.csv"), dir.path().join("people.csv")).unwrap();

  let out = cmd_bin("softcap", dir.path())
    .args(["roster", "-f", "people.csv", "-o", "team.json"])
    .output()
    .unwrap();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  assert!(String::from_utf8_lossy(&out.stderr).contains("reticulating splines..."));
  assert!(String::from_utf8_lossy(&out.stdout).contains("done. (see: team.json)"));

  let doc: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(dir.path().join("team.json")).unwrap()).unwrap();
  let names: Vec<&str> = doc["team"].as_array().unwrap().iter().map(|m| m["name"].as_str().unwrap()).collect();
  assert_eq!(names, vec!["Jane Smith", "Bao Nguyen", "Prince"]);
  assert_eq!(doc["team"][1]["department"], "DEV OPS");
  assert_eq!(doc["team"][0]["pod"], "");
  assert!(doc["timestamp"].as_str().unwrap().ends_with(" ET"));
  // no DEFAULT_JIRA_PROJECTS in the environment
  assert_eq!(doc["jira_projects"][0], "PF");
  assert_eq!(doc["jira_projects"].as_array().unwrap().len(), 10);
}

#[test]
fn roster_honors_department_and_project_overrides() {
  let dir = tempdir();
  std::fs::copy(fixtures_dir().join("roster.xlsx"), dir.path().join("kipusystem.xlsx")).unwrap();

  let out = cmd_bin("softcap", dir.path())
    .env("DEFAULT_JIRA_PROJECTS", "CRM")
    .args(["roster", "--department", "finance"])
    .output()
    .unwrap();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  let doc: serde_json::Value =
    serde_json::from_str(&std::fs::read_to_string(dir.path().join("output_data.json")).unwrap()).unwrap();
  assert_eq!(doc["jira_projects"], serde_json::json!(["CRM"]));
  assert_eq!(doc["team"].as_array().unwrap().len(), 1);
  assert_eq!(doc["team"][0]["name"], "John Doe");
}

#[test]
fn rust_log_from_dotenv_enables_logging() {
  let dir = tempdir();
  std::fs::copy(fixtures_dir().join("roster.xlsx"), dir.path().join("kipusystem.xlsx")).unwrap();
  std::fs::write(dir.path().join(".env"), "RUST_LOG=debug\n").unwrap();

  let out = cmd_bin("softcap", dir.path()).arg("roster").output().unwrap();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  let err = String::from_utf8_lossy(&out.stderr);
  assert!(err.contains("roster rows selected"), "stderr: {err}");
  assert!(err.contains("loaded .env"), "stderr: {err}");
}

#[test]
fn default_run_without_dotenv_stays_quiet() {
  let dir = tempdir();
  std::fs::copy(fixtures_dir().join("roster.xlsx"), dir.path().join("kipusystem.xlsx")).unwrap();

  let out = cmd_bin("softcap", dir.path()).arg("roster").output().unwrap();

  assert!(out.status.success());
  assert_eq!(String::from_utf8_lossy(&out.stderr), "reticulating splines...\n");
}

#[test]
fn missing_input_file_fails() {
  let dir = tempdir();
  let out = cmd_bin("softcap", dir.path()).args(["roster", "-f", "absent.csv"]).output().unwrap();
  assert!(!out.status.success());
  assert!(String::from_utf8_lossy(&out.stderr).contains("absent.csv"));
  assert!(!dir.path().join("output_data.json").exists());
}
