use crate::progress::Progress;
use crate::query;
use crate::tracker::api::{FetchError, SearchApi, SearchRequest};
use crate::tracker::model::ChildStats;
use crate::window::ReportWindow;

/// Count an epic's children: all of them, and those completed inside the window.
///
/// Both counts come from count-only searches. If either search fails the
/// pair is reported as `Unavailable`; a half-known pair is never returned.
pub fn child_stats(api: &dyn SearchApi, epic_key: &str, window: ReportWindow, progress: Progress) -> ChildStats {
  let message = format!("Querying children of epic: {epic_key}");
  let counted = progress.run(&message, || -> Result<(u64, u64), FetchError> {
    let total = count(api, query::total_children_jql(epic_key))?;
    let done = count(api, query::done_children_jql(epic_key, window))?;
    Ok((total, done))
  });

  match counted {
    Ok((total, done)) => ChildStats::Counted { total, done },
    Err(e) => {
      tracing::warn!(epic = epic_key, error = %e, "child counts unavailable");
      ChildStats::Unavailable
    }
  }
}

fn count(api: &dyn SearchApi, jql: String) -> Result<u64, FetchError> {
  let page = api.search(&SearchRequest::count(jql))?;
  Ok(page.total.unwrap_or(0))
}
