use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use healthmate::advice::AdviceGenerator;
use healthmate::client::CompletionClient;
use healthmate::config::Config;
use healthmate::gateway;
use healthmate::health::WeekLog;
use healthmate::messages;

/// HealthMate: AI advice and chat core for the health dashboard.
#[derive(Parser, Debug)]
#[command(name = "healthmate")]
#[command(version = "0.1.0")]
#[command(about = "AI health advisor: advice generation and chat sessions.", long_about = None)]
struct Cli {
    /// Path to a TOML config file (DEEPSEEK_API_KEY in the environment
    /// always wins for the key)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway for the dashboard frontend
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate one round of advice from the sample week and print it
    Advise,

    /// Send a single chat message and print the reply
    Chat {
        /// The message to send
        #[arg(short, long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            let port = port.unwrap_or(config.gateway.port);
            gateway::run_gateway(&host, port, &config).await
        }
        Commands::Advise => {
            let advisor = AdviceGenerator::new(CompletionClient::from_config(&config));
            let week = WeekLog::sample_week();
            let _ = advisor.regenerate(week.records()).await;
            println!("{}", advisor.state().await.text);
            Ok(())
        }
        Commands::Chat { message } => {
            let client = CompletionClient::from_config(&config);
            match client.complete(&message).await {
                Ok(reply) => println!("{reply}"),
                Err(err) => println!("{}", messages::reply_for(&err)),
            }
            Ok(())
        }
    }
}
