mod config;
mod http;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use api::{AppSchema, admin::AdminSite, media::MediaStore};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_authn::JwtService;
use platform_db::connect;
use platform_obs::{ObsConfig, init_tracing};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "mcsu-server", version, about = "NGO/CSR programme management backend")]
struct Cli {
    /// Use development defaults for missing secrets.
    #[arg(long, global = true, env = "MCSU_DEV")]
    dev: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP, GraphQL and admin server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Create a staff superuser with a member profile.
    CreateSuperuser(SuperuserCommand),
    /// Print the GraphQL schema SDL.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
    /// List applied and pending migrations.
    Status,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8000)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct SuperuserCommand {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "MCSU_SUPERUSER_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Arc::new(AppConfig::load(cli.dev)?);
    init_tracing(ObsConfig {
        otlp_endpoint: config.otlp_endpoint.clone(),
        format: config.log_format,
        ..ObsConfig::default()
    })?;
    if cli.dev {
        warn!("running with development defaults");
    }
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, config).await,
        Command::Migrate(action) => {
            let db = setup_db(&config).await?;
            match action {
                MigrateCommand::Up => migrate_up(&db).await,
                MigrateCommand::Down => migrate_down(&db).await,
                MigrateCommand::Status => migrate_status(&db).await,
            }
        }
        Command::CreateSuperuser(cmd) => create_superuser(cmd, &config).await,
        Command::SchemaPrint { output } => schema_print(output),
    }
}

fn schema_print(path: Option<PathBuf>) -> Result<()> {
    let sdl = api::graphql::sdl();
    match path {
        Some(target) => {
            std::fs::write(&target, sdl)
                .with_context(|| format!("failed to write {}", target.display()))?;
            info!(path = %target.display(), "schema written");
        }
        None => println!("{sdl}"),
    }
    Ok(())
}

async fn setup_db(config: &AppConfig) -> Result<DatabaseConnection> {
    connect(&config.database).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let db = Arc::new(setup_db(&config).await?);
    ensure_migrations(&db, cmd.allow_dirty).await?;
    let jwt = Arc::new(JwtService::new(config.jwt.clone()));
    let AppSchema(schema) = api::build_schema(db.clone(), jwt.clone());
    let admin = Arc::new(AdminSite::new());
    let problems = admin.check();
    if !problems.is_empty() {
        anyhow::bail!("admin configuration errors: {problems:?}");
    }
    let state = AppState {
        db,
        jwt,
        schema,
        admin,
        media: Arc::new(MediaStore::new(config.media_root.clone())),
        config: config.clone(),
    };
    http::serve(cmd.into(), state).await
}

async fn ensure_migrations(db: &DatabaseConnection, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "{} pending migrations detected; run `mcsu-server migrate up` or pass --allow-dirty",
            pending.len()
        );
    }
    Ok(())
}

async fn migrate_up(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down(db: &DatabaseConnection) -> Result<()> {
    Migrator::down(db, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

async fn migrate_status(db: &DatabaseConnection) -> Result<()> {
    for migration in Migrator::get_applied_migrations(db).await? {
        println!("applied  {}", migration.name());
    }
    for migration in Migrator::get_pending_migrations(db).await? {
        println!("pending  {}", migration.name());
    }
    Ok(())
}

async fn create_superuser(cmd: SuperuserCommand, config: &AppConfig) -> Result<()> {
    let db = setup_db(config).await?;
    let account = api::auth::create_superuser(&db, &cmd.username, &cmd.email, &cmd.password)
        .await
        .context("could not create superuser")?;
    info!(username = %account.username, id = %account.id, "superuser created");
    Ok(())
}
