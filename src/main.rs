mod handlers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskboard::engine::client::HttpClient;
use taskboard::engine::config::Config;
use taskboard::engine::types::TaskStatus;

#[derive(Parser)]
#[command(name = "taskboard", version, about = "Tasks and files for your projects")]
struct Cli {
    /// Root of the task API (overrides config and TASKBOARD_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Log debug output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tasks as a table
    List {
        /// Only tasks of this project id
        #[arg(long, short = 'p')]
        project: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show tasks as a kanban board
    Board {
        #[arg(long, short = 'p')]
        project: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Move a task to another status
    Move {
        task: String,
        /// pending, in-progress or done
        status: TaskStatus,
    },
    /// Show a task with its files and comments
    Show {
        task: String,
        #[arg(long)]
        json: bool,
    },
    /// Add a comment to a task
    Comment { task: String, message: String },
    /// Attach a file to a task
    Upload { task: String, path: PathBuf },
    /// List attachments
    Files {
        #[arg(long, short = 't', conflicts_with = "project")]
        task: Option<String>,
        #[arg(long, short = 'p')]
        project: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List projects
    Projects {
        #[arg(long)]
        json: bool,
    },
    /// Delete a task
    Delete { task: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    let client = HttpClient::new(&config)?;

    match cli.command {
        Commands::Move { .. }
        | Commands::Comment { .. }
        | Commands::Upload { .. }
        | Commands::Delete { .. } => dispatch_write_ops(&client, cli.command).await,
        Commands::List { .. }
        | Commands::Board { .. }
        | Commands::Show { .. }
        | Commands::Files { .. }
        | Commands::Projects { .. } => dispatch_read_ops(&client, cli.command).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TASKBOARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

async fn dispatch_write_ops(client: &HttpClient, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Move { task, status } => handlers::move_task::handle(client, &task, status).await,
        Commands::Comment { task, message } => {
            handlers::comment::handle(client, &task, &message).await
        }
        Commands::Upload { task, path } => handlers::upload::handle(client, &task, path).await,
        Commands::Delete { task } => handlers::delete::handle(client, &task).await,
        _ => unreachable!("Invalid write command dispatch"),
    }
}

async fn dispatch_read_ops(client: &HttpClient, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { project, json } => {
            handlers::list::handle(client, project.as_deref(), json).await
        }
        Commands::Board { project, json } => {
            handlers::board::handle(client, project.as_deref(), json).await
        }
        Commands::Show { task, json } => handlers::show::handle(client, &task, json).await,
        Commands::Files {
            task,
            project,
            json,
        } => handlers::files::handle(client, task.as_deref(), project.as_deref(), json).await,
        Commands::Projects { json } => handlers::projects::handle(client, json).await,
        _ => unreachable!("Invalid read command dispatch"),
    }
}
