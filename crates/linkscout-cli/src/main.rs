//! Linkscout CLI - link previews, page text and web search from the command line

mod mcp;

use clap::{Parser, Subcommand, ValueEnum};
use linkscout::{ToolBuilder, Toolkit, TOOL_LLMTXT};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output format for the content subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Linkscout - structured information from web pages for agents
#[derive(Parser, Debug)]
#[command(name = "linkscout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,

    #[command(flatten)]
    config: Config,
}

/// Toolkit settings shared by every subcommand
#[derive(clap::Args, Debug)]
struct Config {
    /// Custom User-Agent
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Budget for page and search fetches, in milliseconds
    #[arg(long, global = true, default_value_t = 15_000)]
    page_timeout_ms: u64,

    /// Budget for the favicon probe, in milliseconds
    #[arg(long, global = true, default_value_t = 3_000)]
    favicon_timeout_ms: u64,

    /// Search results page to query
    #[arg(long, global = true, default_value = linkscout::DEFAULT_SEARCH_ENDPOINT)]
    search_endpoint: String,

    /// Only fetch URLs starting with this prefix (repeatable)
    #[arg(long, global = true)]
    allow_prefix: Vec<String>,

    /// Never fetch URLs starting with this prefix (repeatable)
    #[arg(long, global = true)]
    block_prefix: Vec<String>,
}

impl Config {
    fn builder(&self) -> ToolBuilder {
        let mut builder = Toolkit::builder()
            .page_timeout(Duration::from_millis(self.page_timeout_ms))
            .favicon_timeout(Duration::from_millis(self.favicon_timeout_ms))
            .search_endpoint(self.search_endpoint.clone());

        if let Some(ref ua) = self.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        for prefix in &self.allow_prefix {
            builder = builder.allow_prefix(prefix.clone());
        }
        for prefix in &self.block_prefix {
            builder = builder.block_prefix(prefix.clone());
        }
        builder
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp,
    /// Print link preview metadata of a page as JSON
    Preview {
        /// URL of the page
        url: String,
    },
    /// Print the readable text of a page
    Content {
        /// URL of the page
        url: String,

        /// Maximum number of characters
        #[arg(long, default_value_t = linkscout::DEFAULT_MAX_LENGTH)]
        max_length: usize,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,
    },
    /// Search the web and print results as JSON
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = linkscout::DEFAULT_NUM_RESULTS)]
        num_results: usize,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout belongs to tool output and the MCP channel
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    let Some(command) = cli.command else {
        eprintln!("Usage: linkscout preview <URL>");
        eprintln!("   or: linkscout content <URL>");
        eprintln!("   or: linkscout search <QUERY>");
        eprintln!("   or: linkscout mcp");
        eprintln!("   or: linkscout --help");
        std::process::exit(1);
    };

    let toolkit = match cli.config.builder().build() {
        Ok(toolkit) => toolkit,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match command {
        Commands::Mcp => mcp::run_server(toolkit).await,
        Commands::Preview { url } => match toolkit.link_preview(&url).await {
            Ok(preview) => print_json(&preview),
            Err(e) => exit_with_error(e),
        },
        Commands::Content {
            url,
            max_length,
            output,
        } => match toolkit.page_content(&url, Some(max_length)).await {
            Ok(digest) => match output {
                OutputFormat::Text => writeln_safe(&digest.text),
                OutputFormat::Json => print_json(&digest),
            },
            Err(e) => exit_with_error(e),
        },
        Commands::Search { query, num_results } => {
            match toolkit.search(&query, Some(num_results)).await {
                Ok(results) => print_json(&results),
                Err(e) => exit_with_error(e),
            }
        }
    }
}

fn exit_with_error(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing response: {}", e);
        std::process::exit(1);
    });
    writeln_safe(&json);
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
