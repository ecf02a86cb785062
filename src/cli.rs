use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::OutputFormat;
use crate::render::RowFilter;
use crate::roster::DEFAULT_DEPARTMENTS;
use crate::window::ReportWindow;

#[derive(Parser, Debug)]
#[command(
    name = "softcap",
    version,
    about = "Helper tools for the Software Capitalization process",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Report epics with child tickets completed in the window
  Epics(EpicsArgs),
  /// Convert the HR spreadsheet (xlsx or CSV) into the roster JSON
  Roster(RosterArgs),
  /// Post a test message to the configured chat channel
  ChatCheck(ChatCheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EpicsArgs {
  /// Timeframe: this month or last month
  #[arg(long, value_enum, ignore_case = true, default_value_t = ReportWindow::This)]
  pub month: ReportWindow,

  /// Jira project key (default: DEFAULT_JIRA_PROJECTS)
  #[arg(long)]
  pub project: Option<String>,

  /// Only epics whose team label matches exactly (use N/A for epics without a team)
  #[arg(long)]
  pub pod: Option<String>,

  /// Include epics even if no child tickets were completed
  #[arg(long = "show-all", short = 'a', alias = "show_all")]
  pub show_all: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
  pub format: OutputFormat,

  /// Hide the progress spinner
  #[arg(long, short = 'q')]
  pub quiet: bool,

  /// Override the "now" instant used for timeframe dates (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

impl EpicsArgs {
  pub fn row_filter(&self) -> RowFilter {
    RowFilter {
      include_all: self.show_all,
      pod: self.pod.clone(),
    }
  }
}

#[derive(Args, Debug, Clone)]
pub struct RosterArgs {
  /// HR spreadsheet (.xlsx, first sheet) or its CSV export
  #[arg(long, short = 'f', default_value = "kipusystem.xlsx")]
  pub input: PathBuf,

  /// Output JSON file
  #[arg(long, short = 'o', default_value = "output_data.json")]
  pub output: PathBuf,

  /// Department to keep (repeatable; case-insensitive)
  #[arg(long = "department", default_values = DEFAULT_DEPARTMENTS)]
  pub departments: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ChatCheckArgs {
  /// Message text
  #[arg(long, default_value = crate::chat::DEFAULT_TEXT)]
  pub text: String,
}
