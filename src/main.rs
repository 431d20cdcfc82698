//! ssrfblind - Blind SSRF validation CLI

use clap::{ArgGroup, Parser};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ssrfblind::config;
use ssrfblind::models::{ProbeConfig, RunMode};
use ssrfblind::report::{self, console};
use ssrfblind::scanner::{InputSource, ProbeEngine};

/// SSRF Blind Validation Tool - replays captured requests with parameters
/// pointing at a callback host
#[derive(Parser)]
#[command(name = "ssrfblind", version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["request", "url", "list"])))]
#[command(after_help = "Examples:
  ssrfblind -r request.txt -c your-callback.com
  ssrfblind -u \"https://example.com/api?url=test&endpoint=data\" -c your-callback.com -p url
  ssrfblind -l urls.txt -c your-callback.com
  ssrfblind -l urls.txt -c your-callback.com -p url,redirect --delay 1")]
struct Cli {
    /// Captured proxy request file
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Direct URL to test
    #[arg(short, long)]
    url: Option<String>,

    /// File containing a list of URLs to test
    #[arg(short, long)]
    list: Option<PathBuf>,

    /// Callback domain to receive requests
    #[arg(short, long)]
    callback: String,

    /// Parameters to inject (repeatable, comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    parameter: Option<Vec<String>>,

    /// Delay in seconds between requests (URL list mode)
    #[arg(long)]
    delay: Option<f64>,

    /// HTTP method for URL testing
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Request body for URL testing
    #[arg(short, long)]
    data: Option<String>,

    /// Additional headers for URL testing (format: "Header: Value")
    #[arg(short = 'H', long = "headers")]
    headers: Option<Vec<String>>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// HTTP/HTTPS proxy URL
    #[arg(long)]
    proxy: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON run report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print the banner
    #[arg(long)]
    no_banner: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn input_source(&self) -> Option<InputSource> {
        if let Some(ref path) = self.request {
            Some(InputSource::Transcript(path.clone()))
        } else if let Some(ref url) = self.url {
            Some(InputSource::Url {
                url: url.clone(),
                method: self.method.clone(),
                headers: config::parse_header_args(self.headers.as_deref().unwrap_or_default()),
                data: self.data.clone(),
            })
        } else {
            self.list.as_ref().map(|path| InputSource::List(path.clone()))
        }
    }
}

fn fail(message: &str) -> ! {
    console::print_error(message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "ssrfblind=debug" } else { "ssrfblind=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    if !cli.no_banner {
        console::print_banner();
    }

    let mut probe_config = match cli.config {
        Some(ref path) => config::load_config(path).unwrap_or_else(|e| fail(&e.to_string())),
        None => ProbeConfig::default(),
    };
    if let Err(e) = config::merge_cli_args(
        &mut probe_config,
        cli.callback.clone(),
        cli.parameter.clone(),
        cli.delay,
        cli.timeout,
        cli.proxy.clone(),
    ) {
        fail(&e.to_string());
    }
    if probe_config.callback_host.is_empty() {
        fail("Callback host must not be empty");
    }

    let Some(source) = cli.input_source() else {
        fail("One of --request, --url or --list is required");
    };

    match source {
        InputSource::List(ref path) => {
            console::print_info(&format!("Starting bulk URL testing from: {}", path.display()));
            if probe_config.target_parameters.is_empty() {
                console::print_warning(
                    "No specific parameters provided. Auto-detecting parameters for each URL.",
                );
            } else {
                console::print_info(&format!(
                    "Testing specific parameters: {}",
                    probe_config.target_parameters.join(", ")
                ));
            }
        }
        _ if cli.delay.is_some() => {
            console::print_warning("--delay only applies to URL list mode, ignoring");
        }
        _ => {}
    }

    let engine = ProbeEngine::new(probe_config)?;
    let summary = match engine.run(&source).await {
        Ok(summary) => summary,
        Err(e) => fail(&e.to_string()),
    };

    console::print_summary(&summary, summary.mode == RunMode::List);

    if let Some(ref output) = cli.output {
        report::json::export(&summary, output)?;
        println!("\n  {} {}", "Report saved to:".bold(), output.display().to_string().green());
    }

    Ok(())
}
