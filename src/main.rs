use anyhow::Context;
use clap::Parser;
use log::info;
use podgrid::app::{self, App};
use podgrid::catalog::{bundled_catalog, load_catalog};
use podgrid::cli::Cli;
use podgrid::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.log_level).context("Failed to set up logging")?;

    let podcasts = match &cli.data {
        Some(path) => load_catalog(path).with_context(|| format!("Could not load {}", path.display()))?,
        None => bundled_catalog().context("Bundled catalog is invalid")?,
    };
    info!("Starting podgrid with {} podcast(s)", podcasts.len());

    // Create new app instance
    let app: App = App::new(podcasts, cli.grid_layout())?;

    // Start the UI with our initialized app
    app::start_ui(app)
}
