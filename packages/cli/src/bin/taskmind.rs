// ABOUTME: TaskMind command-line entry point
// ABOUTME: Parses arguments and dispatches to the server or one-shot commands

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::*;

use taskmind_cli::{
    commands, config::parse_port, config::Config, init_tracing, open_database, run_server,
};
use taskmind_context::ContextType;

#[derive(Parser)]
#[command(name = "taskmind")]
#[command(about = "TaskMind - task management with AI suggestions")]
#[command(version)]
struct Cli {
    /// SQLite database file (overrides TASKMIND_DB_PATH)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long, value_parser = parse_port_arg)]
        port: Option<u16>,
    },
    /// Ask the AI provider for suggestions on a task title
    Suggest {
        /// Task title
        title: String,
        /// Extra context for the provider
        #[arg(short, long, default_value = "")]
        context: String,
    },
    /// Store context and extract tasks from it
    Ingest {
        /// Text to ingest; read from stdin when omitted and no file is given
        content: Option<String>,
        /// Read the content from a file
        #[arg(short, long, conflicts_with = "content")]
        file: Option<PathBuf>,
        /// Kind of content: note, email or message
        #[arg(short = 't', long = "type", default_value = "note")]
        entry_type: ContextType,
    },
}

fn parse_port_arg(value: &str) -> Result<u16, String> {
    parse_port(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            run_server(config).await
        }
        Commands::Suggest { title, context } => {
            if title.trim().is_empty() {
                anyhow::bail!("Task title is required");
            }
            let result = commands::suggest(title.trim(), &context).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                commands::print_suggestion(title.trim(), &result);
            }
            Ok(())
        }
        Commands::Ingest {
            content,
            file,
            entry_type,
        } => {
            let content = match (content, file) {
                (Some(content), _) => content,
                (None, Some(path)) => std::fs::read_to_string(&path)?,
                (None, None) => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let pool = open_database(&config.database_path).await?;
            let outcome = commands::ingest(pool, &content, entry_type).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                commands::print_outcome(&outcome);
            }
            Ok(())
        }
    }
}
