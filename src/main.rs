use anyhow::Result;
use clap::{CommandFactory, Parser};

use softcap::cli::{Cli, Command};
use softcap::{commands, config, telemetry, util};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // .env first so RUST_LOG can come from it
  let dotenv = config::load_dotenv();
  telemetry::init();
  match dotenv {
    Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded .env"),
    Ok(None) => {}
    Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
  }

  match cli.command {
    Some(Command::Epics(args)) => commands::epics(&args).map(|_| ()),
    Some(Command::Roster(args)) => commands::roster(&args),
    Some(Command::ChatCheck(args)) => commands::chat_check(&args),
    None => {
      Cli::command().print_help()?;
      std::process::exit(2);
    }
  }
}
