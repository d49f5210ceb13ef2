use std::fs::create_dir_all;

use anyhow::Context;
use clap::Parser;

use interview_prep_api::db;
use interview_prep_api::server::app::run_server;
use interview_prep_api::settings::get_settings;
use interview_prep_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(default_value = "serve")]
    runner: Runner,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Runner {
    Serve,
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = get_settings().context("Failed to load settings")?;

    if !settings.static_dir.exists() {
        create_dir_all(&settings.static_dir)
            .context("Failed to create directory for static content")?;
    }
    if !settings.static_dir.is_dir() {
        anyhow::bail!("STATIC_DIR should be a directory or not exist");
    }

    let pool = db::establish_connection(&settings.database_path)
        .await
        .context("Failed to connect to the database")?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool)
        .await
        .context("Failed to run db migrations")?;

    match cli.runner {
        Runner::Migrate => {}
        Runner::Serve => run_server(pool, settings).await?,
    };
    Ok(())
}
