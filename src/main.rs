//! CLI entry point for sizetree

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use sizetree::tree::DEFAULT_PROGRESS_INTERVAL;
use sizetree::{
    Collector, CollectorConfig, ConsoleProgress, DirTree, OutputConfig, SizetreeError,
    TreeFormatter, parse_size, resolve_root,
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sizetree")]
#[command(about = "Show the directories that take up the most space")]
#[command(version)]
struct Args {
    /// Directory to measure [default: .]
    #[arg(conflicts_with = "dir")]
    path: Option<PathBuf>,

    /// Directory to measure, as an option instead of PATH
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Only show subdirectories larger than SIZE
    /// Bytes by default; suffixes K, M, G, T (powers of 1024) are accepted
    #[arg(short = 'l', long = "limit", value_name = "SIZE", default_value = "10000000")]
    limit: String,

    /// Display only N levels deep (sizes still include everything below)
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Skip entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Print scan progress to stderr
    #[arg(long = "progress")]
    progress: bool,

    /// A global log level to use when printing logs.
    /// It's also possible to set `RUST_LOG`, which always has priority.
    #[arg(long = "log-level", default_value_t = Level::WARN)]
    log_level: Level,
}

impl Args {
    fn root(&self) -> &Path {
        self.dir
            .as_deref()
            .or(self.path.as_deref())
            .unwrap_or(Path::new("."))
    }
}

fn init_logging(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();
}

fn collect(root: &Path, args: &Args, config: CollectorConfig) -> (DirTree, usize) {
    let collector = Collector::new(config);
    if args.progress {
        let mut collector =
            collector.with_progress(ConsoleProgress::stderr(DEFAULT_PROGRESS_INTERVAL));
        let tree = collector.collect_tree(root);
        (tree, collector.stats().inaccessible)
    } else {
        let mut collector = collector;
        let tree = collector.collect_tree(root);
        (tree, collector.stats().inaccessible)
    }
}

fn run(args: &Args) -> Result<(), SizetreeError> {
    let threshold = parse_size(&args.limit)?;
    let root = resolve_root(args.root())?;

    let config = CollectorConfig {
        threshold,
        ignore_patterns: args.ignore.clone(),
    };
    tracing::debug!(root = %root.display(), threshold, "starting scan");

    let (tree, inaccessible) = collect(&root, args, config);

    let output_config = OutputConfig {
        use_color: should_use_color(args.color),
        max_depth: args.level,
    };
    TreeFormatter::new(output_config).print(&tree)?;

    if inaccessible > 0 {
        tracing::warn!(
            "{} directories could not be read; sizes are lower bounds",
            inaccessible
        );
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("sizetree: {}", e);
        process::exit(1);
    }
}
