use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filmigo_api::config::Config;

#[derive(Parser, Debug)]
#[command(name = "filmigo-server")]
#[command(about = "REST API gateway for movie data", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "filmigo-api.yaml")]
    config: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let default_filter = if config.is_release() {
        "filmigo_api=info,tower_http=info"
    } else {
        "filmigo_api=debug,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = filmigo_api::run(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
