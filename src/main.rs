use clap::{Parser, Subcommand};
use imagefit_core::CoreConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "imagefit")]
#[command(about = "A self-hosted image resizing service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the imagefit server
    Serve {
        /// Server host address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Server port
        #[arg(long, default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.debug);

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Serve { host, port } => {
            info!("Starting imagefit server on {}:{}", host, port);
            serve_command(config, host, port).await?;
        }
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<CoreConfig, ConfigError> {
    use figment::{
        providers::{Env, Format, Serialized, Toml},
        Figment,
    };

    let mut figment = Figment::from(Serialized::defaults(CoreConfig::default()));

    // Load from config file if provided
    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    } else {
        // Try default config locations
        figment = figment
            .merge(Toml::file("imagefit.toml"))
            .merge(Toml::file("config/imagefit.toml"));
    }

    // Override with environment variables
    figment = figment.merge(Env::prefixed("IMAGEFIT_"));

    figment.extract().map_err(ConfigError::Figment)
}

async fn serve_command(
    mut config: CoreConfig,
    host: String,
    port: u16,
) -> Result<(), ImagefitError> {
    // Override config with CLI arguments
    config.server.host = host;
    config.server.port = port;

    // Create and start the server
    let server = imagefit_server::Server::new(config).map_err(ImagefitError::Server)?;

    server.serve().await.map_err(ImagefitError::Server)?;

    Ok(())
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum ImagefitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Server error: {0}")]
    Server(#[from] imagefit_server::ServerError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Figment error: {0}")]
    Figment(#[from] figment::Error),
}
