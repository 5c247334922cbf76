use std::{path::PathBuf, sync::Arc};

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use spotauthd::{
    config::Config,
    error,
    management::TokenManager,
    server::{self, AppState},
    spotify::{SpotifyAuthClient, TOKEN_URL},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name = env!("CARGO_PKG_NAME"),
  bin_name = env!("CARGO_PKG_NAME"),
  about = env!("CARGO_PKG_DESCRIPTION"),
  styles = styles(),
)]
struct Cli {
    /// Address to bind (overrides $HOST)
    #[clap(long)]
    host: Option<String>,

    /// Port to listen on (overrides $PORT)
    #[clap(long)]
    port: Option<u16>,

    /// Front-end asset directory (overrides $STATIC_DIR)
    #[clap(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(static_dir) = cli.static_dir {
        config.static_dir = static_dir;
    }

    // Not fatal: the static front-end still works, /login answers 500.
    if let Err(e) = config.credentials() {
        warning!("{}; /login will refuse until it is configured", e);
    }

    let auth = match SpotifyAuthClient::new(TOKEN_URL) {
        Ok(auth) => auth,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };

    let state = Arc::new(AppState {
        config,
        auth,
        tokens: TokenManager::new(),
    });

    if let Err(e) = server::serve(state).await {
        error!("Server error: {}", e);
    }
}
