use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use indicatif::ProgressBar;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use showdeps::analysis::{load_dependencies, LoadedDeps};
use showdeps::config::{Config, ConfigOverrides};
use showdeps::export::{export, ExportData, ExportFormat};
use showdeps::graph::resolve_path;
use showdeps::logger::{init_logger, pause_stderr};
use showdeps::progress::{ProgressSignal, SpinnerSink};
use showdeps::source::{GoListSource, PackageSource, ReplaySource};
use showdeps::ui::{run_app, App, DisplayOptions};

#[derive(Parser)]
#[command(name = "showdeps")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Terminal UI browser for the external dependencies of a Go module", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ./.showdeps.yml, then ~/.showdeps.yml)
    #[arg(short, long, global = true)]
    config_file: Option<PathBuf>,

    /// Strip the path prefix from displayed package names
    #[arg(long, global = true)]
    strip_path: bool,

    /// Prefix stripped from displayed package names
    #[arg(long, global = true)]
    path_prefix: Option<String>,

    /// Directory to run `go list` in
    #[arg(short = 'C', long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Read import records from a file instead of running `go list`
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    /// Self identification line used with --records ("<package>[ <module>]")
    #[arg(long, global = true, requires = "records")]
    self_id: Option<String>,

    /// Standard library listing used with --records, one package per line
    #[arg(long, global = true, requires = "records")]
    std_list: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write logs to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse dependencies in the terminal UI (default)
    Browse,
    /// Print the classified dependency list
    List {
        /// Output format: plain, json, csv or markdown
        #[arg(short, long, default_value_t = ExportFormat::Plain)]
        format: ExportFormat,
    },
    /// Print the import chain that pulls in a package
    Path {
        /// Full import path of the package
        package: String,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Commands::Browse);

    if let Commands::Version = command {
        println!("showdeps v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logger(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .context("failed to initialize logging")?;

    let overrides = ConfigOverrides {
        strip_path: cli.strip_path.then_some(true),
        path_prefix: cli.path_prefix.clone(),
    };
    let config = Config::load(cli.config_file.as_deref(), &overrides)
        .context("failed to load configuration")?;
    let rules = config
        .compile_rules()
        .context("invalid classification rule")?;
    debug!(rules = rules.len(), "configuration loaded");

    let mut source = open_source(&cli)?;
    let deps = match command {
        Commands::Browse => {
            let sink = if cli.quiet {
                SpinnerSink::with_bar(ProgressBar::hidden())
            } else {
                SpinnerSink::new()
            };
            let progress = ProgressSignal::start(sink, ProgressSignal::DEFAULT_TICK);
            let loaded = load_dependencies(source.as_mut(), rules, Some(&progress));
            progress.finish();
            loaded
        }
        _ => load_dependencies(source.as_mut(), rules, None),
    }
    .context("failed to load dependencies")?;

    let options = config.display_options();
    match command {
        Commands::Browse => browse(deps, options),
        Commands::List { format } => {
            let data = ExportData::new(&deps);
            let mut stdout = io::stdout().lock();
            export(format, &data, &mut stdout).context("failed to write dependency list")
        }
        Commands::Path { package } => print_path(&deps, &options, &package),
        Commands::Version => Ok(()),
    }
}

fn open_source(cli: &Cli) -> Result<Box<dyn PackageSource>> {
    match &cli.records {
        Some(records) => {
            let source =
                ReplaySource::open(records, cli.self_id.as_deref(), cli.std_list.as_deref())
                    .context("failed to open replay records")?;
            Ok(Box::new(source))
        }
        None => Ok(Box::new(GoListSource::new(cli.dir.clone()))),
    }
}

fn print_path(deps: &LoadedDeps, options: &DisplayOptions, package: &str) -> Result<()> {
    if !deps.inverted.contains(package) {
        anyhow::bail!("{package} is not in the import graph");
    }

    let path = resolve_path(&deps.inverted, package)
        .with_context(|| format!("cannot resolve the import path of {package}"))?;

    let mut stdout = io::stdout().lock();
    for (i, pkg) in path.iter().rev().enumerate() {
        if i > 0 {
            writeln!(stdout, "  ↓")?;
        }
        writeln!(stdout, "{}", options.display_name(pkg))?;
    }
    Ok(())
}

/// Raw mode and the alternate screen, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        let _ = disable_raw_mode();
    }
}

fn browse(deps: LoadedDeps, options: DisplayOptions) -> Result<()> {
    // declared first so logging resumes only after the terminal is restored
    let _quiet = pause_stderr();
    let _guard = TerminalGuard::enter().context("failed to set up the terminal")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(deps, options);
    run_app(&mut terminal, &mut app).context("terminal UI failed")
}
