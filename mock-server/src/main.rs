use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

/// Local stand-in for the public user service.
#[derive(Debug, Parser)]
#[command(name = "mock-server", version)]
struct Args {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    setup_tracing();
    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    mock_server::run(listener).await
}
