use clap::Parser;
use losplit::server;
use losplit::utils::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "losplit")]
#[command(about = "Splits LO refund report PDFs into one document per code")]
struct Args {
    /// Listen address, overriding configuration
    #[arg(long, short = 'a')]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "losplit=info,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::init()?;

    let addr = args
        .addr
        .or_else(|| std::env::var("LOSPLIT_ADDR").ok())
        .unwrap_or_else(|| config.host_url.to_string());

    let socket_addr: std::net::SocketAddr = addr.parse()?;

    server::start_server(socket_addr).await?;

    Ok(())
}
