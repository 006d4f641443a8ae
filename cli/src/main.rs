mod commands;
mod render;
mod transport;

use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use grid::{GridConfig, GridController};

use crate::commands::ListOptions;
use crate::render::{parse_assignment, parse_page_size};
use crate::transport::HttpTransport;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("`{0}` does not name a resource")]
    NoResource(String),
    #[error("unknown or read-only field `{0}`")]
    UnknownField(String),
    #[error("record {0} not found")]
    RecordNotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("failed to read confirmation: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "grid-cli", about = "Browse and edit REST record collections")]
struct Cli {
    #[arg(long, env = "GRID_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "GRID_API_BASE", default_value = "/api")]
    api_base: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the host answers `/healthz`.
    Ping,
    /// Print the columns inferred for a resource.
    Keys { resource: String },
    /// Print one page of a resource.
    List(ListArgs),
    /// Create a record.
    Create {
        resource: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },
    /// Update a record; unset fields keep their current values.
    Update {
        resource: String,
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },
    /// Delete a record.
    Delete {
        resource: String,
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    resource: String,

    #[arg(long, help = "Field to sort by (default: id)")]
    sort: Option<String>,

    #[arg(long, default_value_t = false)]
    desc: bool,

    #[arg(long)]
    search: Option<String>,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, value_parser = parse_page_size, help = "One of 10, 25, 50, 100")]
    page_size: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    reqwest::Url::parse(&cli.base_url).map_err(|e| CliError::InvalidBaseUrl(format!("{}: {e}", cli.base_url)))?;

    let config = GridConfig { api_base: cli.api_base, ..GridConfig::default() };
    let mut controller = GridController::new(HttpTransport::new(&cli.base_url), config);

    let output = match cli.command {
        Command::Ping => run_ping(&cli.base_url).await?,
        Command::Keys { resource } => commands::keys(&mut controller, &resource).await?,
        Command::List(args) => {
            let options = ListOptions {
                sort: args.sort,
                descending: args.desc,
                search: args.search,
                page: args.page,
                page_size: args.page_size,
            };
            commands::list(&mut controller, &args.resource, &options).await?
        }
        Command::Create { resource, assignments } => {
            commands::create(&mut controller, &resource, &assignments).await?
        }
        Command::Update { resource, id, assignments } => {
            commands::update(&mut controller, &resource, &id, &assignments).await?
        }
        Command::Delete { resource, id, yes } => {
            commands::delete(&mut controller, &resource, &id, |question| if yes { Ok(true) } else { ask(question) })
                .await?
        }
    };
    println!("{}", output.trim_end());
    Ok(())
}

async fn run_ping(base_url: &str) -> Result<String, CliError> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Rejected(format!("health check failed: HTTP {}", status.as_u16())));
    }
    Ok("ok".to_owned())
}

/// Ask `question` on stdout and read a yes/no answer from stdin.
fn ask(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
