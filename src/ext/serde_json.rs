// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookups into tracker issue JSON with non-panicking extraction
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (scalar text, select-option labels)
// invariants: No panics; missing paths and JSON null yield None
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

/// A located JSON value (or nothing), extracted in a second step.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  /// Render scalars as text. Date custom fields arrive as strings, but
  /// numbers and booleans are accepted so odd field configs still show up.
  pub fn text(&self) -> Option<String> {
    match self.present()? {
      serde_json::Value::String(s) => Some(s.clone()),
      serde_json::Value::Number(n) => Some(n.to_string()),
      serde_json::Value::Bool(b) => Some(b.to_string()),
      _ => None,
    }
  }

  /// Label of a single-select custom field: `{"value": "Core", "id": "1"}`.
  /// Anything that is not an object carrying a string `value` yields None.
  pub fn option_label(&self) -> Option<String> {
    match self.present()? {
      serde_json::Value::Object(map) => map.get("value").and_then(|v| v.as_str()).map(str::to_string),
      _ => None,
    }
  }

  fn present(&self) -> Option<&'a serde_json::Value> {
    self.inner.filter(|v| !v.is_null())
  }
}

/// Extension to fetch nested values via dotted paths like "status.name".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
