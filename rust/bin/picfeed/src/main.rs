//! `picfeed` — the picfeed command-line client.
//!
//! Drives the same flux handlers a UI shell would: every command emits
//! requests and prints the states they produce.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use picfeed_bff::ClientConfig;

/// picfeed CLI tool.
#[derive(Parser, Debug)]
#[command(name = "picfeed", about = "picfeed command-line client")]
struct Cli {
    /// Path to client config file (default: ~/.picfeed/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Backend base URL (overrides config and PICFEED_BACKEND_URL).
    #[arg(long = "server", global = true)]
    server: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    /// Account email (default: the one saved by `picfeed login`).
    #[arg(long, global = true)]
    email: Option<String>,

    /// Password (not recommended — use interactive prompt).
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the signed-in user.
    Whoami,

    /// Check credentials and remember the email.
    Login,

    /// Show the home feed.
    Feed,

    /// Search users by name.
    Search {
        /// Search text (at least the configured minimum length).
        query: String,
    },

    /// Show a user's profile and posts.
    Profile {
        /// Username.
        username: String,
    },

    /// Like or unlike a post from the feed.
    Like {
        /// Post ID.
        post_id: u64,
    },

    /// Save or unsave a post from the feed.
    Save {
        /// Post ID.
        post_id: u64,
    },

    /// Client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Store the backend base URL.
    SetServer {
        /// e.g. http://localhost:8080/api/v1.0
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let json = cli.output == "json";

    let credentials = commands::Credentials {
        email: cli.email,
        password: cli.password,
    };
    let config = || -> anyhow::Result<ClientConfig> {
        Ok(ClientConfig::load(&config_path)?
            .with_env()
            .with_backend_override(cli.server.clone()))
    };

    match cli.command {
        Commands::Whoami => {
            let mut session = commands::Session::open(config()?, json)?;
            session.sign_in(credentials).await?;
            commands::auth::whoami(&session)?;
        }

        Commands::Login => {
            let mut session = commands::Session::open(config()?, json)?;
            let email = session.sign_in(credentials).await?;
            commands::auth::remember(&email, &config_path)?;
            commands::auth::whoami(&session)?;
        }

        Commands::Feed => {
            let mut session = commands::Session::open(config()?, json)?;
            session.sign_in(credentials).await?;
            commands::posts::feed(&session).await?;
        }

        Commands::Search { query } => {
            let mut session = commands::Session::open(config()?, json)?;
            session.sign_in(credentials).await?;
            commands::users::search(&session, &query).await?;
        }

        Commands::Profile { username } => {
            let mut session = commands::Session::open(config()?, json)?;
            session.sign_in(credentials).await?;
            commands::users::profile(&session, &username).await?;
        }

        Commands::Like { post_id } => {
            let mut session = commands::Session::open(config()?, json)?;
            session.sign_in(credentials).await?;
            commands::posts::like(&session, post_id).await?;
        }

        Commands::Save { post_id } => {
            let mut session = commands::Session::open(config()?, json)?;
            session.sign_in(credentials).await?;
            commands::posts::save(&session, post_id).await?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config()?, &config_path, json)?,
            ConfigAction::SetServer { url } => commands::config::set_server(&url, &config_path)?,
        },

        Commands::Version => {
            println!("picfeed cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
