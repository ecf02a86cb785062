// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Post one formatted message to a chat channel to confirm bot credentials work
// role: chat/smoke-test
// inputs: ChatConfig (API base, bearer token, channel id); message text
// outputs: Message timestamp (`ts`) reported by the chat API
// side_effects: One POST to {api_base}/chat.postMessage
// invariants: The API signals failure in-band (`ok: false`); that is an error even on HTTP 200
// errors: ChatError (transport vs API-reported)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::ChatConfig;

pub const DEFAULT_TEXT: &str = ":sparkles: Sound check from softcap. Testing one two...";

#[derive(Debug, Error)]
pub enum ChatError {
  #[error("Error posting to chat: {0}")]
  Api(String),
  #[error("Error posting to chat: {0}")]
  Transport(String),
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
  ok: bool,
  #[serde(default)]
  ts: Option<String>,
  #[serde(default)]
  error: Option<String>,
}

/// Section block with the message, plus a context line naming the sender.
pub fn message_body(channel: &str, text: &str) -> serde_json::Value {
  serde_json::json!({
    "channel": channel,
    "text": text,
    "blocks": [
      {
        "type": "section",
        "text": { "type": "mrkdwn", "text": text }
      },
      {
        "type": "context",
        "elements": [{ "type": "mrkdwn", "text": "Sent via `softcap chat-check`" }]
      }
    ]
  })
}

pub fn post_message(cfg: &ChatConfig, text: &str) -> Result<String, ChatError> {
  let agent: ureq::Agent = ureq::Agent::config_builder()
    .timeout_global(Some(Duration::from_secs(30)))
    .build()
    .into();
  let url = format!("{}/chat.postMessage", cfg.api_base);
  tracing::debug!(%url, channel = %cfg.channel, "posting chat message");

  let resp = agent
    .post(&url)
    .header("Authorization", &format!("Bearer {}", cfg.token))
    .header("Content-Type", "application/json; charset=utf-8")
    .send_json(message_body(&cfg.channel, text));

  let parsed = match resp {
    Ok(mut r) => r
      .body_mut()
      .read_json::<PostMessageResponse>()
      .map_err(|e| ChatError::Transport(e.to_string()))?,
    Err(e) => return Err(ChatError::Transport(e.to_string())),
  };

  if !parsed.ok {
    return Err(ChatError::Api(parsed.error.unwrap_or_else(|| "unknown_error".to_string())));
  }

  Ok(parsed.ts.unwrap_or_default())
}
