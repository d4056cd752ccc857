//! users-api entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use users_api::api::{create_router, openapi_router, AppState};
use users_api::config::Config;
use users_api::metrics;
use users_api::users::{seed_users, UserStore};
use users_api::utils::shutdown_signal;
use users_api::AppError;

/// Example users API.
#[derive(Parser, Debug)]
#[command(name = "users-api")]
#[command(about = "Users route configuration over an in-memory user service")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the seed dataset as JSON.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let config = Config::load().map_err(AppError::from)?;
    init_logging(&config, args.verbose || config.verbose);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Seed) => cmd_seed(),
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("users_api=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    if config.json_logs() {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("USERS API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(AppError::InvalidConfig(e).into());
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);
    println!("  OpenAPI: {}", if config.enable_openapi { "Enabled" } else { "Disabled" });
    println!("  Metrics: {}", if config.enable_metrics { "Enabled" } else { "Disabled" });
    println!("  Log Level: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the seed dataset.
fn cmd_seed() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&seed_users()).map_err(AppError::from)?;
    println!("{}", json);
    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(AppError::InvalidConfig(e).into());
    }
    let addr = config.bind_addr().map_err(AppError::InvalidConfig)?;

    let mut app_state = AppState::with_store(UserStore::seeded());
    if config.enable_metrics {
        match metrics::install_prometheus() {
            Ok(handle) => app_state = app_state.with_metrics(handle),
            Err(e) => warn!("Metrics disabled, recorder install failed: {}", e),
        }
    }

    let mut router = create_router(app_state.clone());
    if config.enable_openapi {
        router = router.merge(openapi_router());
    }

    let listener = TcpListener::bind(addr).await.map_err(AppError::from)?;
    info!("HTTP server listening on {}", addr);
    info!(
        "Store seeded with {} users",
        app_state.store.read().await.len()
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::from)?;

    info!("HTTP server stopped");
    Ok(())
}
