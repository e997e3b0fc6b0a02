use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pyweave::cli::commands::{self, analyze::AnalyzeOptions};
use pyweave::cli::{CommandContext, Output, resolve_workspace};
use pyweave::config::{LoggingConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "pyweave")]
#[command(version, about = "Structural analyzer for Python codebases")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every Python file under a directory
    Analyze {
        #[arg(help = "Directory to analyze (default: current directory)")]
        path: Option<PathBuf>,
        #[arg(long, short, help = "Output directory for reports")]
        output: Option<PathBuf>,
        #[arg(long, short, help = "Report format: json, yaml, text")]
        format: Option<OutputFormat>,
        #[arg(long, help = "Print the analysis report instead of writing files")]
        stdout: bool,
        #[arg(long = "no-call-graph", help = "Skip the call graph report")]
        no_call_graph: bool,
    },

    /// Analyze a single file and print JSON
    File {
        #[arg(help = "Python source file")]
        file: PathBuf,
        #[arg(long, help = "Base directory for the relative path (default: file's parent)")]
        base: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Create .pyweave/config.toml in the current directory
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mpyweave encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Default hook prints the backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

/// stderr layer filtered by `--verbose`/`--quiet`/`logging.level`, with
/// RUST_LOG taking precedence, plus an optional plain-text file layer.
fn init_tracing(verbose: bool, quiet: bool, logging: &LoggingConfig) -> anyhow::Result<()> {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match &logging.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let analyze_path = match &cli.command {
        Commands::Analyze { path, .. } => path.as_deref(),
        _ => None,
    };

    // Broken project config must not block `config init --force`
    let ctx = CommandContext::load(analyze_path);
    let logging = ctx
        .as_ref()
        .map(|c| c.config().logging)
        .unwrap_or_default();
    init_tracing(cli.verbose, cli.quiet, &logging)?;

    match cli.command {
        Commands::Analyze {
            path: _,
            output,
            format,
            stdout,
            no_call_graph,
        } => {
            let out = Output::new(cli.quiet || stdout);
            commands::analyze::run(
                &ctx?,
                AnalyzeOptions {
                    output,
                    format,
                    stdout,
                    no_call_graph,
                },
                &out,
            )?;
        }
        Commands::File { file, base } => {
            commands::file::run(&file, base.as_deref())?;
        }
        Commands::Config { action } => {
            let workspace = resolve_workspace(None)?;
            match action {
                ConfigAction::Show { format } => {
                    commands::config::show(&workspace, &format)?;
                }
                ConfigAction::Path => {
                    commands::config::path(&workspace)?;
                }
                ConfigAction::Init { force } => {
                    commands::config::init(&workspace, force, &Output::new(cli.quiet))?;
                }
            }
        }
    }

    Ok(())
}
