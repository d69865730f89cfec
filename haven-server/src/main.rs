//! # Haven Server
//!
//! Real-estate listing API.
//!
//! Serves three read endpoints over a PostgreSQL-backed property store:
//! list all properties, get one by id, and list with optional name /
//! address / price-range filters. Each returned property is enriched with
//! its first enabled image.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use haven_core::{
    database::{
        PostgresDatabase,
        infrastructure::postgres::{
            PostgresPropertyImageRepository, PostgresPropertyRepository,
        },
    },
    listings::ListingService,
};
use haven_server::{
    AppState,
    config::{Config, ConfigLoad},
    db::{seed_sample_data, validate_database_url},
    routes,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "haven-server")]
#[command(about = "Real-estate listing HTTP API with filterable property search")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "HAVEN_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "HAVEN_HOST")]
    host: Option<String>,

    /// PostgreSQL connection URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply the database schema and exit
    Migrate,
    /// Apply the schema, replace table contents with sample data, and exit
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                let database = connect_database(&cli.serve).await?;
                database
                    .initialize_schema()
                    .await
                    .context("database migration failed")?;
                info!("Database schema applied");
                return Ok(());
            }
            Command::Db(DbCommand::Seed) => {
                let database = connect_database(&cli.serve).await?;
                database
                    .initialize_schema()
                    .await
                    .context("database migration failed")?;
                seed_sample_data(database.pool())
                    .await
                    .context("database seeding failed")?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<(Config, String)> {
    let ConfigLoad {
        mut config,
        warnings,
    } = Config::load();

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }
    if let Some(url) = args.database_url.clone() {
        config.database.url = Some(url);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }

    for warning in &warnings {
        warn!(message = %warning, "configuration warning");
    }

    let Some(database_url) = config.database.url.clone() else {
        error!("DATABASE_URL must be provided for PostgreSQL connections");
        anyhow::bail!("No PostgreSQL connection configuration found");
    };

    validate_database_url(&database_url)?;

    Ok((config, database_url))
}

async fn connect_database(args: &ServeArgs) -> anyhow::Result<PostgresDatabase> {
    let (_, database_url) = load_runtime_config(args)?;
    PostgresDatabase::new(&database_url)
        .await
        .context("failed to connect to PostgreSQL")
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let (config, database_url) = load_runtime_config(&args)?;

    let database = match PostgresDatabase::new(&database_url).await {
        Ok(database) => {
            info!("Successfully connected to PostgreSQL");
            database
        }
        Err(connect_error) => {
            error!(error = %connect_error, "PostgreSQL connection failed");
            anyhow::bail!("Database connection failed: {}", connect_error);
        }
    };

    database
        .initialize_schema()
        .await
        .context("database schema initialization failed")?;

    let pool = database.pool().clone();
    let listings = Arc::new(ListingService::new(
        Arc::new(PostgresPropertyRepository::new(pool.clone())),
        Arc::new(PostgresPropertyImageRepository::new(pool)),
    ));

    let config = Arc::new(config);
    let state = AppState {
        listings,
        config: config.clone(),
    };

    // No auth on this API; the frontend may be served from any origin.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any());

    let app = routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config
        .bind_addr()
        .context("invalid server host/port configuration")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to install ctrl-c handler");
        return;
    }
    info!("shutdown signal received");
}
