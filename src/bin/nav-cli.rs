use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "nav-cli")]
#[command(about = "Query a running console-router", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Print the route table
    Routes,
    /// Resolve a dashboard path
    Resolve {
        /// Path to resolve, e.g. /project/42
        path: String,
    },
    /// Build the path of a named route
    Href {
        /// Route name, e.g. ProjectDetail
        name: String,
        /// Route parameter as key=value
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let request = match cli.command {
        Commands::Health => client.get(cli.url.join("/healthz")?),
        Commands::Routes => client.get(cli.url.join("/api/routes")?),
        Commands::Resolve { path } => client
            .get(cli.url.join("/api/resolve")?)
            .query(&[("path", path)]),
        Commands::Href { name, params } => {
            let mut url = cli.url.join("/api/href/")?;
            url.path_segments_mut()
                .map_err(|_| "base URL cannot have a path")?
                .pop_if_empty()
                .push(&name);
            client.get(url).query(&params)
        }
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;

    if !status.is_success() {
        eprintln!("Error: router returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
