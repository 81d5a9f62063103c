mod banner;
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use playtracker_config::{AppConfig, ConfigLoader};
use playtracker_db::{MigrationCatalog, Migrator, open_database};
use playtracker_web::WebServer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, MigrateArgs, ServeArgs};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ConfigLoader::default_config_path);
    let config = ConfigLoader::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    match cli.command {
        Some(Command::Migrate(args)) => migrate(&config, &args),
        Some(Command::Serve(args)) => serve(config, &args, &config_path).await,
        None => serve(config, &ServeArgs::default(), &config_path).await,
    }
}

fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn serve(mut config: AppConfig, args: &ServeArgs, config_path: &std::path::Path) -> Result<()> {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    banner::print_banner(&config, config_path);
    WebServer::new(config).run().await.context("server stopped")
}

fn migrate(config: &AppConfig, args: &MigrateArgs) -> Result<()> {
    let db = &config.database;
    let conn = open_database(&db.path).context("failed to open database")?;
    let migrator = Migrator::new(&conn);
    let catalog = MigrationCatalog::directory(&db.migrations_dir);

    if args.status {
        migrator.ensure_ledger()?;
        let applied = migrator.applied()?;
        let pending = migrator.pending(&catalog.load()?)?;

        println!("Applied ({}):", applied.len());
        for record in &applied {
            println!(
                "  {}  {}",
                record.applied_at.format("%Y-%m-%d %H:%M:%S"),
                record.filename
            );
        }
        println!("Pending ({}):", pending.len());
        for name in &pending {
            println!("  {name}");
        }
        return Ok(());
    }

    let report = migrator
        .run(&catalog)
        .with_context(|| format!("migrations in {} failed", db.migrations_dir.display()))?;
    for name in &report.applied {
        println!("applied  {name}");
    }
    for name in &report.empty {
        println!("empty    {name}");
    }
    info!(
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        "migrations complete"
    );
    Ok(())
}
