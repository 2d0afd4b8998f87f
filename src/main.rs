use anyhow::Result;
use clap::{Parser, Subcommand};
use memoria::auth::JwtAuth;
use memoria::config::MemoriaConfig;
use memoria::server;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "memoria", version, about = "HTTP API for personal memories")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a signed bearer token for local development
    Token {
        /// Subject (user id) the token identifies
        sub: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
        /// Lifetime in hours (defaults to auth.token_ttl_hours)
        #[arg(long)]
        ttl_hours: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = MemoriaConfig::load()?;

    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(config).await?;
        }
        Command::Token {
            sub,
            name,
            avatar_url,
            ttl_hours,
        } => {
            anyhow::ensure!(
                !config.auth.jwt_secret.is_empty(),
                "no auth.jwt_secret configured; set it in the config file or MEMORIA_JWT_SECRET"
            );
            let auth = JwtAuth::new(&config.auth.jwt_secret);
            let ttl = ttl_hours.unwrap_or(config.auth.token_ttl_hours);
            let token = auth.issue(&sub, name, avatar_url, ttl)?;
            println!("{token}");
        }
    }

    Ok(())
}
