use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ledgerscope::config::LoggingConfig;
use ledgerscope::{render, router, AppConfig, LogFormat};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Statistical profiling for tabular expense data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a CSV file and print the report
    Analyze(AnalyzeArgs),
    /// Start the HTTP analysis service
    Serve(ServeArgs),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// CSV file to analyze, or `-` for stdin
    input: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,
    /// Config file (defaults to ledgerscope.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Config file (defaults to ledgerscope.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured bind address
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => {
            let config = load_config(args.config.as_deref())?;
            init_tracing(&config.logging);
            handle_analyze(args)
        }
        Command::Serve(args) => {
            let config = load_config(args.config.as_deref())?;
            init_tracing(&config.logging);
            handle_serve(config, args.bind).await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("failed to load configuration")
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn read_input(input: &Path) -> Result<String> {
    let bytes = if input == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read CSV from stdin")?;
        buf
    } else {
        std::fs::read(input)
            .with_context(|| format!("failed to read CSV file at '{}'", input.display()))?
    };
    String::from_utf8(bytes).with_context(|| format!("'{}' is not UTF-8 text", input.display()))
}

fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let content = read_input(&args.input)?;
    let result = ledgerscope_core::analyze(&content)
        .with_context(|| format!("failed to analyze '{}'", args.input.display()))?;

    info!(rows = result.dataset_summary.total_rows, "analysis complete");

    let output = match args.format {
        OutputFormat::Json => result.to_json(!args.compact)?,
        OutputFormat::Table => render::render_tables(&result),
    };
    println!("{output}");
    Ok(())
}

async fn handle_serve(config: AppConfig, bind: Option<SocketAddr>) -> Result<()> {
    let addr = bind.unwrap_or(config.server.bind);
    let app = router(&config.server);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        max_upload_bytes = config.server.max_upload_bytes,
        "listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
}
