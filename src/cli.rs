use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use clap::ArgAction;
use recipe_manager::{Catalog, Config, Directory, RecipeRepository, server};

/// Config file picked up from the working directory when `--config` is not
/// given.
const DEFAULT_CONFIG: &str = "config.json";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a JSON or TOML configuration file [default: config.json, if
    /// present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the recipe files (overrides the config file)
    #[arg(long)]
    recipes_path: Option<PathBuf>,

    /// Address to listen on, e.g. ":8080" or "127.0.0.1:8080" (overrides the
    /// config file)
    #[arg(short, long)]
    port: Option<String>,

    /// Directory of static files served for non-API paths (overrides the
    /// config file)
    #[arg(long)]
    static_path: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = self.load_config()?;

        let directory = Directory::load(&config.recipes_path).with_context(|| {
            format!(
                "failed to load recipes from {}",
                config.recipes_path.display()
            )
        })?;
        if directory.is_empty() {
            tracing::warn!("No recipes found in {}", directory.root().display());
        }
        tracing::debug!(
            "Known ingredients: {}",
            directory.ingredient_names().join(", ")
        );

        let app = server::router(
            Arc::new(Catalog::new(directory)),
            config.static_path.as_deref(),
        );

        let address = config.bind_address();
        tracing::info!("Starting server on {address}");
        server::serve(&address, app)
            .await
            .with_context(|| format!("server error on {address}"))
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }

    /// Resolve the configuration: file first, then command line overrides.
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => load_default_config(Path::new(DEFAULT_CONFIG))?,
        };

        if let Some(recipes_path) = &self.recipes_path {
            config.recipes_path.clone_from(recipes_path);
        }
        if let Some(port) = &self.port {
            config.server_port.clone_from(port);
        }
        if let Some(static_path) = &self.static_path {
            config.static_path = Some(static_path.clone());
        }

        tracing::debug!("Using configuration: {config:?}");
        Ok(config)
    }
}

fn load_default_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        tracing::info!("Loading configuration from {}", path.display());
        Ok(Config::load(path)?)
    } else {
        tracing::info!(
            "{} not found, using default configuration",
            path.display()
        );
        Ok(Config::default())
    }
}
