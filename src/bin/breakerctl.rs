use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "breakerctl")]
#[command(about = "Management CLI for the tripswitch breaker admin API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, default_value = "admin-secret-key")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check admin API status
    Status,
    /// List all breakers with their current state
    List,
    /// Show one breaker's state
    Show { name: String },
    /// Force a breaker back to closed
    Reset { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    match cli.command {
        Commands::Status => {
            let res = client
                .get(format!("{}/status", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::List => {
            let res = client
                .get(format!("{}/breakers", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Show { name } => {
            let res = client
                .get(format!("{}/breakers/{}", cli.url, name))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Reset { name } => {
            let res = client
                .post(format!("{}/breakers/{}/reset", cli.url, name))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
