use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// Feedback shown around one blocking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
  /// No output at all (tests, `--quiet`, piped stderr).
  Silent,
  /// A stderr spinner whose ticker lives exactly as long as the call.
  Spinner,
}

impl Progress {
  /// Spinner only when someone is watching stderr.
  pub fn for_terminal(quiet: bool) -> Self {
    if quiet || !std::io::stderr().is_terminal() {
      Progress::Silent
    } else {
      Progress::Spinner
    }
  }

  /// Run `work`; any spinner is stopped, joined and cleared before the result is handed back.
  pub fn run<T>(self, message: &str, work: impl FnOnce() -> T) -> T {
    match self {
      Progress::Silent => work(),
      Progress::Spinner => {
        let guard = SpinnerGuard::start(message);
        let out = work();
        drop(guard);
        out
      }
    }
  }
}

struct SpinnerGuard {
  bar: ProgressBar,
}

impl SpinnerGuard {
  fn start(message: &str) -> Self {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{msg} {spinner:.yellow}") {
      bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(TICK);
    Self { bar }
  }
}

impl Drop for SpinnerGuard {
  fn drop(&mut self) {
    // Joins the ticker thread before the line is wiped.
    self.bar.disable_steady_tick();
    self.bar.finish_and_clear();
  }
}
