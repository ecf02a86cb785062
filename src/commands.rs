// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Glue each subcommand to configuration, backends, and stdout
// role: commands/dispatch
// inputs: Parsed subcommand args; environment (via config loaders)
// outputs: Report text/JSON, roster file pointer, chat ts on stdout
// side_effects: Loads .env; network calls; file writes (roster)
// invariants:
// - Configuration is fully resolved before the first network call
// - Nothing reaches stdout when configuration or the epic search fails
// errors: anyhow with context; typed module errors are preserved as the root cause
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::chat;
use crate::cli::{ChatCheckArgs, EpicsArgs, RosterArgs};
use crate::config::{self, ChatConfig, TrackerConfig};
use crate::pipeline::{run_report, Outcome, ReportConfig};
use crate::progress::Progress;
use crate::query;
use crate::roster;
use crate::tracker::api::HttpSearchApi;
use crate::window::parse_now_override;

pub fn epics(args: &EpicsArgs) -> Result<Outcome> {
  let started = Instant::now();

  // Phase 1: configuration (fatal before any request)
  let tracker = TrackerConfig::load()?;
  let projects = query::resolve_projects(args.project.as_deref(), &tracker.default_projects)?;

  let cfg = ReportConfig {
    projects,
    window: args.month,
    filter: args.row_filter(),
    format: args.format,
    progress: Progress::for_terminal(args.quiet),
    now: parse_now_override(args.now_override.as_deref()),
  };

  // Phase 2: run against the live tracker
  let api = HttpSearchApi::new(&tracker);
  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  let outcome = run_report(&api, &tracker.fields, &cfg, started, &mut out)?;
  out.flush()?;

  tracing::info!(?outcome, elapsed_ms = started.elapsed().as_millis() as u64, "epic report finished");
  Ok(outcome)
}

pub fn roster(args: &RosterArgs) -> Result<()> {
  eprintln!("reticulating splines...");

  let mut projects = config::default_projects();
  if projects.is_empty() {
    projects = roster::FALLBACK_PROJECTS.iter().map(|p| p.to_string()).collect();
  }

  let doc = roster::export(&args.input, &args.output, &args.departments, projects, chrono::Utc::now())
    .with_context(|| format!("exporting roster from {}", args.input.display()))?;
  tracing::info!(members = doc.team.len(), "roster written");

  println!("done. (see: {})", args.output.display());
  Ok(())
}

pub fn chat_check(args: &ChatCheckArgs) -> Result<()> {
  let cfg = ChatConfig::load()?;
  let ts = chat::post_message(&cfg, &args.text).with_context(|| format!("chat-check to channel {}", cfg.channel))?;
  println!("Message sent successfully: {ts}");
  Ok(())
}
