//! Rename a file from the command line.
//!
//! # Examples
//!
//! ```sh
//! # Interactive menu (rename / list / change directory / exit)
//! rename
//!
//! # One-shot: rename notes/a.txt to notes/b.txt
//! rename notes/a.txt b.txt
//!
//! # Machine-readable outcome
//! rename notes/a.txt b.txt --json
//! ```

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use renamer::prelude::*;
use tracing::info;

/// Rename a file within its directory.
///
/// Without arguments, starts an interactive menu.
#[derive(Parser)]
#[command(name = "rename")]
struct Cli {
    /// File to rename (one-shot mode)
    #[arg(requires = "new_name")]
    source: Option<String>,

    /// New leaf name for the file (one-shot mode)
    new_name: Option<String>,

    /// Directory relative paths are resolved against
    #[arg(long, default_value = ".")]
    workdir: PathBuf,

    /// Print the one-shot outcome as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run_interactive(config: &RenamerConfig) {
    let mut console = ConsoleFrontend::new(io::stdin().lock(), io::stdout(), &config.workdir);
    let summary = drive(&mut console, &RenameRequestHandler::new());
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "interactive session finished"
    );
}

fn main() {
    let cli = Cli::parse();
    let config = RenamerConfig::new(&cli.workdir, cli.verbose);

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.level_filter())
        .with_target(false)
        .init();

    match (cli.source, cli.new_name) {
        (Some(source), Some(new_name)) => match run_once(
            &config.workdir,
            &source,
            &new_name,
            cli.json,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        ) {
            Ok(true) => {}
            Ok(false) => process::exit(1),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        _ => run_interactive(&config),
    }
}
