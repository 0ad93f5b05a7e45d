use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Client for a running cbr-gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Admin bearer key.
    #[arg(short, long, env = "GATEWAY_ADMIN_KEY", default_value = "")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call an operation, e.g. `call GetCursOnDateXML --body '{"OnDate":"2023-06-22"}'`
    Call {
        operation: String,
        #[arg(short, long, default_value = "{}")]
        body: String,
        /// Drop the cached result first
        #[arg(long)]
        no_cache: bool,
    },
    /// Gateway status
    Status,
    /// Cache statistics
    Cache,
    /// Drop every cached result
    ClearCache,
    /// List operations and whether they are denied
    Operations,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .redirect(Policy::limited(2))
        .build()?;

    let mut headers = HeaderMap::new();
    if !cli.key.is_empty() {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
        );
    }

    match cli.command {
        Commands::Call {
            operation,
            body,
            no_cache,
        } => {
            let path = if no_cache {
                format!("GetMethodDataWithoutCache/{operation}")
            } else {
                operation
            };
            let res = client
                .post(format!("{}/{}", cli.url, path))
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            if let Some(cache) = res.headers().get("x-cache").and_then(|v| v.to_str().ok()) {
                eprintln!("cache: {cache}");
            }
            print_response(res).await?;
        }
        Commands::Status => {
            let res = client
                .get(format!("{}/admin/status", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Cache => {
            let res = client
                .get(format!("{}/admin/cache", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::ClearCache => {
            let res = client
                .delete(format!("{}/admin/cache", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Operations => {
            let res = client
                .get(format!("{}/admin/operations", cli.url))
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
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
