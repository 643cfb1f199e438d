use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the chat gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8082")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the shared chat client's status
    Status,
    /// Probe readiness (client started)
    Ready,
    /// Probe process liveness
    Live,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/status", cli.url)).send().await?;
            let body: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Ready => {
            let res = client.get(format!("{}/health/ready", cli.url)).send().await?;
            println!("{}", res.status());
        }
        Commands::Live => {
            let res = client.get(format!("{}/health/live", cli.url)).send().await?;
            println!("{}", res.status());
        }
    }

    Ok(())
}
