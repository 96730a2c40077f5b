use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use paper_search::client::HttpSearchApi;
use paper_search::config::{
    default_config_path, find_config_file, load_config, to_toml_string, write_config, Config,
    DisplayConfig,
};
use paper_search::models::decode_results;
use paper_search::render::{JsonSink, ListSink, ProjectionMode, ResultSink, TableSink};
use paper_search::session::{SearchBox, SearchBoxError, SessionObserver};
use paper_search::ui::{self, Spinner, Status};
use paper_search::utils::DisplayBudget;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Paper Search - query a paper search API and list the results
#[derive(Parser, Debug)]
#[command(name = "paper-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query a paper search API and list the results", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the search service (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (list if TTY, JSON otherwise)
    Auto,
    /// Numbered list (human-readable)
    List,
    /// Table format
    Table,
    /// JSON format (machine-readable)
    Json,
}

/// Display options shared by every command that renders results
#[derive(Args, Debug, Clone, Default)]
struct DisplayArgs {
    /// Show titles only
    #[arg(long)]
    title_only: bool,

    /// Maximum characters of the author line
    #[arg(long, allow_hyphen_values = true)]
    author_budget: Option<DisplayBudget>,

    /// Maximum characters of the snippet line
    #[arg(long, allow_hyphen_values = true)]
    snippet_budget: Option<DisplayBudget>,
}

impl DisplayArgs {
    fn apply(&self, display: &mut DisplayConfig) {
        if self.title_only {
            display.mode = ProjectionMode::TitleOnly;
        }
        if let Some(budget) = self.author_budget {
            display.author_budget = budget;
        }
        if let Some(budget) = self.snippet_budget {
            display.snippet_budget = budget;
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single search and print the results
    #[command(alias = "s")]
    Search {
        /// Search query string
        query: String,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Search box: every line read from stdin is submitted as a query
    #[command(alias = "i")]
    Interactive {
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Render a saved search API response without touching the network
    #[command(alias = "p")]
    Project {
        /// JSON file with the response array (stdin if omitted)
        #[arg(long, short)]
        input: Option<PathBuf>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a configuration file with default values
    Init {
        /// Where to write it (default: user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Paper Search - Environment Variables");
    println!();
    println!("API:");
    println!("  PAPER_SEARCH_API__BASE_URL       Base URL of the search service (default: http://localhost:8080)");
    println!("  PAPER_SEARCH_API__TIMEOUT_SECS   Request timeout in seconds (default: 30)");
    println!("  PAPER_SEARCH_API__USER_AGENT     User-Agent header");
    println!();
    println!("Display:");
    println!("  PAPER_SEARCH_DISPLAY__MODE            full or title_only (default: full)");
    println!("  PAPER_SEARCH_DISPLAY__AUTHOR_BUDGET   Max characters of the author line (default: 100)");
    println!("  PAPER_SEARCH_DISPLAY__SNIPPET_BUDGET  Max characters of the snippet line (default: 250)");
    println!();
    println!("Logging:");
    println!("  PAPER_SEARCH_LOGGING__LEVEL      Default log level (default: info)");
    println!("  RUST_LOG                         Rust logging filter (e.g., debug, paper_search=trace)");
    println!();
    println!("Example:");
    println!("  export PAPER_SEARCH_API__BASE_URL=\"https://search.example.org\"");
    println!("  export PAPER_SEARCH_DISPLAY__MODE=\"title_only\"");
    std::process::exit(0);
}

/// Chrome around interactive queries: prompt, spinner, failure lines.
struct CliObserver {
    quiet: bool,
    spinner: Option<Spinner>,
}

impl CliObserver {
    fn new(quiet: bool) -> Self {
        Self {
            quiet,
            spinner: None,
        }
    }
}

impl SessionObserver for CliObserver {
    fn prompt(&mut self) {
        if !self.quiet && ui::stdin_is_terminal() {
            ui::print_prompt();
        }
    }

    fn started(&mut self, query: &str) {
        self.spinner = Some(new_spinner(self.quiet, query));
    }

    fn finished(
        &mut self,
        query: &str,
        outcome: &Result<usize, SearchBoxError>,
        started: Instant,
    ) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish();
        }
        report(self.quiet, query, outcome, started);
    }
}

fn new_spinner(quiet: bool, query: &str) -> Spinner {
    if quiet || !ui::is_terminal() {
        Spinner::hidden()
    } else {
        Spinner::new(&format!("Searching for \"{}\"...", query))
    }
}

fn report(quiet: bool, query: &str, outcome: &Result<usize, SearchBoxError>, started: Instant) {
    match outcome {
        Ok(count) if !quiet => {
            ui::print_search_header(query, *count, started.elapsed());
        }
        Ok(_) => {}
        Err(e) => ui::print_status(
            Status::Error,
            &format!("Search for \"{}\" failed: {}", query, e),
        ),
    }
}

/// Pick the sink for stdout. A repainting session on a terminal clears the
/// previous list; JSON streams one line per query unless it is one-shot.
fn make_sink(format: OutputFormat, repaint: bool) -> Box<dyn ResultSink> {
    let stdout = std::io::stdout();
    let tty = ui::is_terminal();
    match format {
        OutputFormat::Auto | OutputFormat::List if tty => Box::new(
            ListSink::new(stdout)
                .color(true)
                .clear_screen(repaint),
        ),
        OutputFormat::List => Box::new(ListSink::new(stdout)),
        OutputFormat::Auto | OutputFormat::Json => Box::new(JsonSink::new(stdout).pretty(!repaint)),
        OutputFormat::Table => Box::new(TableSink::new(stdout)),
    }
}

/// Configuration for this run. `config init` never reads the existing file,
/// so it can replace a broken one.
fn config_for(cli: &Cli) -> Result<Config> {
    match &cli.command {
        Some(Commands::Config {
            action: ConfigAction::Init { .. },
        }) => Ok(Config::default()),
        _ => effective_config(cli),
    }
}

fn effective_config(cli: &Cli) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => find_config_file(),
    };

    let mut config = load_config(path.as_deref()).with_context(|| match &path {
        Some(p) => format!("Failed to load config file {}", p.display()),
        None => "Failed to load configuration".to_string(),
    })?;

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = timeout;
    }
    config.validate()?;

    Ok(config)
}

/// Write a default configuration to `path`, refusing to clobber an existing
/// file unless `force` is set.
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    write_config(&Config::default(), path)?;
    Ok(())
}

fn init_logging(cli: &Cli, config: &Config) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => config.logging.level.as_str(),
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("paper_search={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
    }

    let mut config = config_for(&cli)?;
    init_logging(&cli, &config);

    match cli.command {
        Some(Commands::Search {
            ref query,
            ref display,
        }) => {
            display.apply(&mut config.display);
            let api = HttpSearchApi::new(&config.api)?;
            let mut search_box =
                SearchBox::new(api, make_sink(cli.output, false), config.display.projector());

            let started = Instant::now();
            let spinner = new_spinner(cli.quiet, query);
            let outcome = search_box.submit(query).await;
            spinner.finish();

            let count = outcome?;
            if !cli.quiet {
                ui::print_search_header(query, count, started.elapsed());
            }
        }

        Some(Commands::Project {
            ref input,
            ref display,
        }) => {
            display.apply(&mut config.display);

            let body = match input {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut body = String::new();
                    std::io::stdin().read_to_string(&mut body)?;
                    body
                }
            };

            let results = decode_results(&body)?;
            let display = config.display.projector().project_all(&results);
            make_sink(cli.output, false).render("", &display)?;
        }

        Some(Commands::Config { ref action }) => match action {
            ConfigAction::Init { path, force } => {
                let path = path
                    .clone()
                    .or_else(default_config_path)
                    .unwrap_or_else(|| PathBuf::from("paper-search.toml"));

                init_config(&path, *force)?;
                if !cli.quiet {
                    ui::print_status(
                        Status::Success,
                        &format!("Wrote default configuration to {}", path.display()),
                    );
                }
            }
            ConfigAction::Show => {
                print!("{}", to_toml_string(&config)?);
            }
        },

        Some(Commands::Interactive { ref display }) => {
            display.apply(&mut config.display);
            run_interactive(&cli, &config).await?;
        }

        None => {
            run_interactive(&cli, &config).await?;
        }
    }

    Ok(())
}

async fn run_interactive(cli: &Cli, config: &Config) -> Result<()> {
    let api = HttpSearchApi::new(&config.api)?;
    let mut search_box =
        SearchBox::new(api, make_sink(cli.output, true), config.display.projector());
    let mut observer = CliObserver::new(cli.quiet);

    if !cli.quiet && ui::stdin_is_terminal() {
        ui::print_status(
            Status::Info,
            &format!(
                "Searching {} - type a query and press Enter (Ctrl-D to quit)",
                config.api.base_url
            ),
        );
    }

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    tokio::select! {
        summary = search_box.run(input, &mut observer) => {
            let summary = summary?;
            tracing::debug!(
                submitted = summary.submitted,
                failed = summary.failed,
                "search box closed"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("interrupted");
        }
    }

    Ok(())
}
