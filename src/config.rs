// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load tracker and chat settings from `.env` + process environment
// role: configuration
// inputs: JIRA_* and SLACK_* environment variables (optionally from a .env file in the working dir)
// outputs: TrackerConfig, ChatConfig, default project list
// side_effects: load_dotenv copies .env into the process environment (called once from main)
// invariants:
// - Required variables that are unset or blank fail with ConfigError::Missing naming the variable
// - Project lists drop blank entries and surrounding whitespace
// errors: ConfigError (typed); callers decide whether it is fatal
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_START_DATE_FIELD: &str = "customfield_11801";
pub const DEFAULT_END_DATE_FIELD: &str = "customfield_11827";
pub const DEFAULT_POD_FIELD: &str = "customfield_11913";
pub const DEFAULT_BC_FIELD: &str = "customfield_12110";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CHAT_API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("missing environment variable {0}; check your .env file")]
  Missing(&'static str),
  #[error("{name} must be a positive integer, got {value:?}")]
  Invalid { name: &'static str, value: String },
  #[error("no project specified and DEFAULT_JIRA_PROJECTS is empty")]
  NoProjects,
}

/// Custom-field ids for the epic columns the tracker does not name natively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
  pub start_date: String,
  pub end_date: String,
  pub pod: String,
  pub business_category: String,
}

impl Default for FieldMap {
  fn default() -> Self {
    Self {
      start_date: DEFAULT_START_DATE_FIELD.to_string(),
      end_date: DEFAULT_END_DATE_FIELD.to_string(),
      pod: DEFAULT_POD_FIELD.to_string(),
      business_category: DEFAULT_BC_FIELD.to_string(),
    }
  }
}

impl FieldMap {
  /// Comma-separated projection for the epic search.
  pub fn projection(&self) -> String {
    format!(
      "summary,status,{},{},{},{}",
      self.start_date, self.end_date, self.pod, self.business_category
    )
  }
}

#[derive(Debug, Clone)]
pub struct TrackerConfig {
  pub base_url: String,
  pub email: String,
  pub token: String,
  pub default_projects: Vec<String>,
  pub fields: FieldMap,
  pub timeout: Duration,
}

impl TrackerConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::from_lookup(|k| std::env::var(k).ok())
  }

  /// Build from an arbitrary variable lookup (process env in production, a map in tests).
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let base_url = required(&lookup, "JIRA_BASE_URL")?;
    let email = required(&lookup, "JIRA_EMAIL")?;
    let token = required(&lookup, "JIRA_TOKEN")?;

    let field = |name: &str, default: &str| optional(&lookup, name).unwrap_or_else(|| default.to_string());
    let fields = FieldMap {
      start_date: field("JIRA_START_DATE_FIELD", DEFAULT_START_DATE_FIELD),
      end_date: field("JIRA_END_DATE_FIELD", DEFAULT_END_DATE_FIELD),
      pod: field("JIRA_POD_FIELD", DEFAULT_POD_FIELD),
      business_category: field("JIRA_BC_FIELD", DEFAULT_BC_FIELD),
    };

    let timeout_secs = match optional(&lookup, "JIRA_TIMEOUT_SECS") {
      Some(raw) => match raw.parse::<u64>() {
        Ok(n) if n > 0 => n,
        _ => {
          return Err(ConfigError::Invalid {
            name: "JIRA_TIMEOUT_SECS",
            value: raw,
          })
        }
      },
      None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      email,
      token,
      default_projects: default_projects_from(&lookup),
      fields,
      timeout: Duration::from_secs(timeout_secs),
    })
  }
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
  pub api_base: String,
  pub token: String,
  pub channel: String,
}

impl ChatConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::from_lookup(|k| std::env::var(k).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let api_base = optional(&lookup, "SLACK_API_BASE_URL").unwrap_or_else(|| DEFAULT_CHAT_API_BASE.to_string());

    Ok(Self {
      api_base: api_base.trim_end_matches('/').to_string(),
      token: required(&lookup, "SLACK_BOT_TOKEN")?,
      channel: required(&lookup, "SLACK_CHANNEL_ID")?,
    })
  }
}

/// Project keys from `DEFAULT_JIRA_PROJECTS` without requiring tracker credentials.
pub fn default_projects() -> Vec<String> {
  default_projects_from(&|k: &str| std::env::var(k).ok())
}

pub fn split_projects(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|p| !p.is_empty())
    .map(str::to_string)
    .collect()
}

fn default_projects_from<F>(lookup: &F) -> Vec<String>
where
  F: Fn(&str) -> Option<String>,
{
  lookup("DEFAULT_JIRA_PROJECTS")
    .map(|raw| split_projects(&raw))
    .unwrap_or_default()
}

/// Load `.env` from the working directory (or a parent) into the process environment.
/// Runs before logging starts, so `RUST_LOG` may come from the file; callers log the result.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
  match dotenvy::dotenv() {
    Ok(path) => Ok(Some(path)),
    Err(e) if e.not_found() => Ok(None),
    Err(e) => Err(e),
  }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
  F: Fn(&str) -> Option<String>,
{
  optional(lookup, name).ok_or(ConfigError::Missing(name))
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
  F: Fn(&str) -> Option<String>,
{
  lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
