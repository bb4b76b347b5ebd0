//! CLI surface and session wiring

use crate::config::SettingsStore;
use crate::exec::ProcessRunner;
use crate::prompt::TermPrompt;
use crate::templates::CatalogFetcher;
use crate::ui;
use crate::workflow::{CommitWorkflow, Outcome};
use anyhow::{Context, Result};
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, crate_version};
use log::debug;

/// CLI structure defining the global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Gitwell: interactive commit front-end",
    styles = get_styles(),
)]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short = 'q', long = "quiet", help = "Suppress non-essential output")]
    pub quiet: bool,

    /// Numeric settings as key=value tokens; a `global_` prefix persists the
    /// value globally
    #[arg(
        value_name = "KEY=VALUE",
        help = "Adjust settings, e.g. changes_length=5 or global_history_style=2"
    )]
    pub settings: Vec<String>,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse arguments, load settings, and run one commit session.
pub fn run() -> Result<Outcome> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    let root = std::env::current_dir().context("Failed to resolve working directory")?;
    let store = SettingsStore::new(&root);
    let mut settings = store.load();
    store.apply_tokens(&mut settings, &cli.settings)?;
    debug!("Effective settings: {settings:?}");

    ui::clear_screen();

    let mut workflow = CommitWorkflow::new(
        ProcessRunner::new(),
        TermPrompt::new(),
        CatalogFetcher::new(),
        settings,
        root,
    );
    workflow.run()
}
