use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cafebot::bot::{ButtonAction, Dispatcher, Inbound, Reply};
use cafebot::config::BotConfig;
use cafebot::game::Catalog;
use cafebot::server::{AppState, create_router};
use cafebot::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "cafebot")]
#[command(about = "A chat-bot cafe idle game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// TOML config file; flags below override its values
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Data directory for the database
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// User id allowed to run /add_coins
    #[arg(long)]
    admin_id: Option<i64>,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<BotConfig> {
        let mut config = match &self.config {
            Some(path) => BotConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => BotConfig::default(),
        };
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if self.admin_id.is_some() {
            config.admin_id = self.admin_id;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP endpoint the messaging gateway posts updates to
    Serve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Handle a single message locally and print the reply
    Send {
        #[command(flatten)]
        config: ConfigArgs,

        /// Acting user id
        #[arg(long)]
        user_id: i64,

        /// Treat the input as a button callback payload instead of a message
        #[arg(long)]
        callback: bool,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,

        /// Message text, e.g. "/start"
        input: String,
    },

    /// Create the database and seed the catalog, then exit
    Seed {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Opens, migrates, and seeds the store. Any failure here is fatal.
fn open_store(config: &BotConfig) -> anyhow::Result<Arc<SqliteStore>> {
    fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "Failed to create data directory {}",
            config.data_dir.display()
        )
    })?;

    let db_path = config.db_path();
    let store = SqliteStore::new(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    store.initialize().context("Failed to initialize schema")?;
    store
        .seed_catalog(&Catalog::default())
        .context("Failed to seed catalog")?;

    Ok(Arc::new(store))
}

fn print_reply(reply: &Reply, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
        return Ok(());
    }

    println!("{}", reply.text);
    for row in &reply.keyboard {
        let labels: Vec<String> = row
            .iter()
            .map(|b| match &b.action {
                ButtonAction::Callback(data) => format!("[{}] ({data})", b.label),
                ButtonAction::Url(url) => format!("[{}] <{url}>", b.label),
            })
            .collect();
        println!("{}", labels.join("  "));
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cafebot=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, host, port } => {
            let mut config = config.load()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let store = open_store(&config)?;
            if config.admin_id.is_none() {
                tracing::warn!("No admin_id configured; /add_coins is disabled");
            }

            let state = Arc::new(AppState::new(Dispatcher::new(store.clone(), &config)));
            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            store.close()?;
        }
        Commands::Send {
            config,
            user_id,
            callback,
            json,
            input,
        } => {
            let config = config.load()?;
            let store = open_store(&config)?;
            let dispatcher = Dispatcher::new(store.clone(), &config);

            let inbound = if callback {
                Inbound::Callback(input)
            } else {
                Inbound::Text(input)
            };
            let reply = dispatcher.handle(user_id, &inbound);
            print_reply(&reply, json)?;

            store.close()?;
        }
        Commands::Seed { config } => {
            let config = config.load()?;
            let store = open_store(&config)?;
            info!("Catalog seeded at {}", config.db_path().display());
            store.close()?;
        }
    }

    Ok(())
}
