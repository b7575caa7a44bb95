use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, DaemonCommands, ProductCommands, TaskCommands};
use config::Config;
use taskshop::daemon::{DaemonContext, Dispatcher};
use taskshop::domain::TaskId;
use taskshop::ipc::{DaemonResponse, IpcClient, IpcServer};

fn setup_logging(config: &Config, verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskshop")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("taskshop.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins over the configured level
    let level = if verbose {
        "debug".to_string()
    } else {
        config.log_level.clone().unwrap_or_else(|| "info".to_string())
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Daemon { command } => handle_daemon_command(command, config).await,
        Commands::Task { command } => handle_task_command(command, config).await,
        Commands::Product { command } => handle_product_command(command, config).await,
        Commands::Index => {
            let client = connect(config).await?;
            print_response(client.index().await?)
        }
    }
}

async fn connect(config: &Config) -> Result<IpcClient> {
    let client = IpcClient::new(config.client_config());
    client
        .connect()
        .await
        .context("Is the daemon running? Start it with `taskshop daemon start`")?;
    Ok(client)
}

fn print_response(response: DaemonResponse) -> Result<()> {
    if let Some(error) = response.error {
        println!("{} {}", response.status.to_string().red(), error.message.red());
        eyre::bail!("request failed with status {}", response.status);
    }

    println!("{}", response.status.to_string().green());
    if let Some(result) = response.result {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

async fn handle_daemon_command(command: &DaemonCommands, config: &Config) -> Result<()> {
    info!("Handling daemon command: {:?}", command);
    match command {
        DaemonCommands::Start => {
            let server = IpcServer::with_config(config.server_config());
            let ctx = DaemonContext::new(server.event_sender());
            let dispatcher = Arc::new(Dispatcher::new(ctx));
            let shutdown = server.shutdown_handle();

            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupt received");
                    shutdown.shutdown().await;
                }
            });

            println!(
                "{} {}",
                "Daemon listening on".cyan(),
                server.socket_path().display()
            );
            server.run(dispatcher).await.context("Daemon failed")?;
            println!("{}", "Daemon stopped".cyan());
            Ok(())
        }
        DaemonCommands::Status => {
            let client = IpcClient::new(config.client_config());
            let running = client.connect().await.is_ok() && client.ping().await.unwrap_or(false);
            if running {
                println!("{} {}", "Daemon running at".green(), client.socket_path().display());
            } else {
                println!("{}", "Daemon not running".yellow());
            }
            Ok(())
        }
    }
}

async fn handle_task_command(command: &TaskCommands, config: &Config) -> Result<()> {
    info!("Handling task command: {:?}", command);
    let client = connect(config).await?;
    let response = match command {
        TaskCommands::Add { id, title, completed } => {
            let id: TaskId = id.parse().context("Task id must not be empty")?;
            client.create_task(serde_json::to_value(id)?, title, *completed).await?
        }
        TaskCommands::List => client.list_tasks().await?,
        TaskCommands::Update { id, title, completed } => {
            client.update_task(id, title.as_deref(), *completed).await?
        }
        TaskCommands::Delete { id } => client.delete_task(id).await?,
    };
    print_response(response)
}

async fn handle_product_command(command: &ProductCommands, config: &Config) -> Result<()> {
    info!("Handling product command: {:?}", command);
    let client = connect(config).await?;
    let response = match command {
        ProductCommands::Add { name, category, price } => client.create_product(name, category, *price).await?,
        ProductCommands::List {
            category,
            price_min,
            price_max,
        } => {
            client
                .list_products(category.as_deref(), price_min.as_deref(), price_max.as_deref())
                .await?
        }
    };
    print_response(response)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&config, cli.is_verbose()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
