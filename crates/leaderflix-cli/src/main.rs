use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leaderflix_cli::{commands::USAGE, run, AppState, Command, CommandError, Config};
use leaderflix_sync::{FavoritesError, HttpFavoritesGateway};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Required: LEADERFLIX_API_URL=<base url>");
            eprintln!("Optional: LEADERFLIX_USER_ID, LEADERFLIX_TOKEN, LEADERFLIX_TIMEOUT_SECS");
            std::process::exit(1);
        }
    };

    let session = match config.session() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let gateway = match HttpFavoritesGateway::new(&config.api_url, config.request_timeout) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Backend: {}", config.api_url);

    let state = AppState::new(session, Arc::new(gateway));

    match run(&state, command).await {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(CommandError::Favorites(FavoritesError::Unauthenticated)) => {
            eprintln!("Not signed in: set LEADERFLIX_USER_ID and LEADERFLIX_TOKEN");
            std::process::exit(1);
        }
        Err(CommandError::Favorites(FavoritesError::PartialBulkFailure { removed, failed })) => {
            eprintln!(
                "Removed {} favorites, failed to remove: {}",
                removed.len(),
                failed
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
