use crate::tracker::api::{FetchError, SearchApi, SearchRequest};
use crate::tracker::model::Issue;

pub const PAGE_SIZE: u64 = 100;

/// Page through a search until a short page, keeping server order.
///
/// A page holding exactly `page_size` issues is followed by another request at
/// `start_at + page_size`; any shorter page (including an empty one) ends the
/// scan. The first failure aborts the whole fetch.
pub fn fetch_all(api: &dyn SearchApi, jql: &str, fields: &str, page_size: u64) -> Result<Vec<Issue>, FetchError> {
  let mut all: Vec<Issue> = Vec::new();
  let mut start_at = 0;

  loop {
    let req = SearchRequest {
      jql: jql.to_string(),
      start_at,
      max_results: page_size,
      fields: fields.to_string(),
    };

    let page = api.search(&req)?;
    let got = page.issues.len() as u64;
    tracing::debug!(start_at, got, "fetched page");

    all.extend(page.issues);

    if got < page_size {
      break;
    }
    start_at += page_size;
  }

  Ok(all)
}
