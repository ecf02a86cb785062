// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Issue-tracker search calls behind a trait seam (HTTP implementation via ureq)
// role: tracker/api
// inputs: TrackerConfig (base URL, basic-auth credentials, timeout); SearchRequest
// outputs: SearchPage or a typed FetchError
// side_effects: Network calls to {base_url}/rest/api/3/search
// invariants:
// - HTTP 400 maps to FetchError::BadRequest and nothing else does
// - Every call carries the configured timeout
// errors: FetchError; callers decide whether a failure aborts the run or degrades one epic
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use base64::Engine;
use thiserror::Error;

use crate::config::TrackerConfig;
use crate::tracker::model::SearchPage;

#[derive(Debug, Error)]
pub enum FetchError {
  #[error("tracker rejected the query (HTTP 400)")]
  BadRequest,
  #[error("tracker answered HTTP {0}")]
  Status(u16),
  #[error("request failed: {0}")]
  Transport(String),
  #[error("unreadable search response: {0}")]
  Decode(String),
}

/// Parameters for one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
  pub jql: String,
  pub start_at: u64,
  pub max_results: u64,
  pub fields: String,
}

impl SearchRequest {
  /// A count-only request: no issue bodies, just `total`.
  pub fn count(jql: String) -> Self {
    Self {
      jql,
      start_at: 0,
      max_results: 0,
      fields: "key".to_string(),
    }
  }
}

// --- Trait seam for the tracker search endpoint ---
pub trait SearchApi {
  fn search(&self, req: &SearchRequest) -> Result<SearchPage, FetchError>;
}

pub struct HttpSearchApi {
  agent: ureq::Agent,
  search_url: String,
  authorization: String,
}

impl HttpSearchApi {
  pub fn new(cfg: &TrackerConfig) -> Self {
    let agent: ureq::Agent = ureq::Agent::config_builder()
      .timeout_global(Some(cfg.timeout))
      .build()
      .into();
    let credentials = format!("{}:{}", cfg.email, cfg.token);

    Self {
      agent,
      search_url: format!("{}/rest/api/3/search", cfg.base_url),
      authorization: format!("Basic {}", base64::engine::general_purpose::STANDARD.encode(credentials)),
    }
  }
}

impl SearchApi for HttpSearchApi {
  fn search(&self, req: &SearchRequest) -> Result<SearchPage, FetchError> {
    tracing::debug!(jql = %req.jql, start_at = req.start_at, max_results = req.max_results, "tracker search");

    let resp = self
      .agent
      .get(&self.search_url)
      .header("Accept", "application/json")
      .header("Authorization", &self.authorization)
      .query("jql", &req.jql)
      .query("startAt", req.start_at.to_string())
      .query("maxResults", req.max_results.to_string())
      .query("fields", &req.fields)
      .call();

    match resp {
      Ok(mut r) => r
        .body_mut()
        .read_json::<SearchPage>()
        .map_err(|e| FetchError::Decode(e.to_string())),
      Err(ureq::Error::StatusCode(400)) => Err(FetchError::BadRequest),
      Err(ureq::Error::StatusCode(code)) => Err(FetchError::Status(code)),
      Err(e) => Err(FetchError::Transport(e.to_string())),
    }
  }
}
