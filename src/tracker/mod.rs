// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for issue-tracker access (search API, paging, child counts, response model)
// role: tracker/namespace
// outputs: Public submodules; every network call goes through api::SearchApi
// invariants: No retries anywhere; each call is sequential
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod children;
pub mod fetch;
pub mod model;
