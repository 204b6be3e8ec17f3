// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use campus_qa::dataset::{DatasetStatus, LoadState};
use campus_qa::utils::logging::{format_error, format_info, format_success, format_warning};
use campus_qa::{AppState, Config, HumanVerified, Validator, hash_password};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "campus_qa")]
#[command(version = "0.1.0")]
#[command(about = "University Q&A chatbot with dataset answers and an LLM fallback", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer a single question from the terminal
    Ask {
        question: String,
    },

    /// Load both datasets and report their status
    Datasets,

    /// Print the salted hash to put in `admin.password_hash`
    HashPassword {
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    colored::control::set_override(cli.color);
    campus_qa::utils::logging::init_logger(cli.color, cli.verbose);

    if let Commands::HashPassword { password } = &cli.command {
        println!("{}", hash_password(password));
        return Ok(());
    }

    info!("Loading configuration from: {}", cli.config.display());

    let file = if cli.config.exists() {
        Some(cli.config.as_path())
    } else {
        warn!(
            "Config file {} not found, using built-in defaults and environment",
            cli.config.display()
        );
        None
    };
    let config = Config::load(file).context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { port } => cmd_serve(config, port).await?,
        Commands::Ask { question } => cmd_ask(&config, &question).await?,
        Commands::Datasets => cmd_datasets(&config).await?,
        Commands::HashPassword { .. } => {}
    }

    Ok(())
}

async fn cmd_serve(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        Validator::validate_port(port)?;
        config.server.port = port;
    }

    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialize application state")?;

    if !state.admin.login_enabled() {
        println!(
            "{}",
            format_warning("admin.password_hash is not set, admin login is disabled")
        );
    }
    if !state.resolver.fallback().is_available() {
        println!(
            "{}",
            format_warning("No AI API key configured, fallback answers are unavailable")
        );
    }

    println!(
        "{}",
        format_info(&format!("Serving on http://{}", config.bind_address()))
    );

    campus_qa::server::run(state, &config.server)
        .await
        .context("HTTP server stopped with an error")?;

    Ok(())
}

async fn cmd_ask(config: &Config, question: &str) -> Result<()> {
    let state = AppState::from_config(config)
        .await
        .context("Failed to initialize application state")?;

    let answer = state
        .resolver
        .respond(HumanVerified::trusted_local(), question)
        .await;

    info!("Answer source: {:?}", answer.source);
    println!("{}", answer.reply);

    Ok(())
}

async fn cmd_datasets(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)
        .await
        .context("Failed to initialize application state")?;
    let store = state.datasets();

    print_status(&store.lecturers.path().display().to_string(), &store.lecturers.status().await);
    print_status(&store.rectors.path().display().to_string(), &store.rectors.status().await);

    println!();
    print!("{}", state.health().await.format());

    Ok(())
}

fn print_status(source: &str, status: &DatasetStatus) {
    let line = format!("{} ({} records) from {}", status.message, status.count, source);
    match status.status {
        LoadState::Loaded => println!("{}", format_success(&line)),
        LoadState::NotLoaded => println!("{}", format_error(&line)),
    }
}
