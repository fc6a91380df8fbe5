// src/main.rs
// Tally - timesheet logging over MCP

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tally::config::Config;
use tally::db::Database;
use tally::mcp::{Credentials, TallyServer};
use tally::service::WorkLogService;
use tally::timesheet::{TimesheetApi, TimesheetClient};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Log work to the timesheet service over MCP")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as MCP server (default, for agent hosts)
    Serve,

    /// Check the configured credentials against the remote service
    Verify,

    /// Print the cost codes accepted by log_work
    CostCodes,
}

async fn run_mcp_server() -> Result<()> {
    let config = Config::from_env()?;

    let db = Arc::new(Database::open(&config.db_path)?);
    info!("Credential cache at {}", config.db_path.display());

    let api = Arc::new(TimesheetClient::new(config.base_url.clone()));
    let service = Arc::new(WorkLogService::new(db, api));

    let credentials = Credentials {
        email: config.email.clone(),
        password: config.password.clone(),
    };
    let server = TallyServer::new(service, credentials);

    // Run with stdio transport
    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}

async fn run_verify() -> Result<()> {
    let config = Config::from_env()?;

    let api = TimesheetClient::new(config.base_url.clone());
    let token = api.authenticate(&config.email, &config.password).await?;
    let person = api.fetch_person(&token).await?;

    println!(
        "Authenticated against {} as {} {} <{}> (person id {})",
        config.base_url, person.first_name, person.surname, person.email, person.person_id
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the current directory
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up logging based on command
    let log_level = match &cli.command {
        Some(Commands::Serve) | None => Level::WARN, // Quiet for MCP stdio
        Some(Commands::Verify) | Some(Commands::CostCodes) => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None | Some(Commands::Serve) => {
            run_mcp_server().await?;
        }
        Some(Commands::Verify) => {
            run_verify().await?;
        }
        Some(Commands::CostCodes) => {
            println!("{}", tally::codes::list());
        }
    }

    Ok(())
}
