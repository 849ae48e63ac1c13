//! Reusable catalog runtime.
//!
//! Provides [`AppContext`] that encapsulates the process lifecycle:
//! database init, migrations, default admin bootstrap, and the wired
//! application services. The CLI and any future transport share it.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use crate::application::{ItemService, UserService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::PasswordHasher;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::{
    SeaOrmRepositoryProvider, SeaOrmUserRepository,
};
use crate::infrastructure::init_database;
use crate::shared::errors::AppError;

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the catalog runtime.
pub struct RuntimeOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create default admin user if none exists (default: true).
    pub create_default_admin: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── AppContext ─────────────────────────────────────────────────────

/// Connected database plus the services built on top of it.
pub struct AppContext {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// Item and price use-cases.
    pub items: ItemService,
    /// Identity use-cases.
    pub users: UserService<SeaOrmUserRepository>,
    /// The configuration the runtime was started with.
    pub config: AppConfig,

    db: DatabaseConnection,
}

impl AppContext {
    /// Connect, migrate and wire the services.
    ///
    /// This will:
    /// 1. Connect to the database
    /// 2. Run pending migrations (if enabled)
    /// 3. Create the default admin user (if enabled)
    pub async fn start(opts: RuntimeOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;

        let db = init_database(&app_cfg.database_config()).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let hasher = PasswordHasher::new(app_cfg.security.bcrypt_cost);
        let users = UserService::new(Arc::new(SeaOrmUserRepository::new(db.clone())), hasher);
        let items = ItemService::new(repos.clone());

        if opts.create_default_admin {
            create_default_admin(&users, &app_cfg).await?;
        }

        Ok(Self {
            repos,
            items,
            users,
            config: app_cfg,
            db,
        })
    }

    /// Close the connection pool.
    pub async fn close(self) {
        if let Err(e) = self.db.close().await {
            error!("Failed to close database connection: {}", e);
        }
        info!("Database connection closed");
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create default admin user if no users exist in the database.
async fn create_default_admin(
    users: &UserService<SeaOrmUserRepository>,
    app_cfg: &AppConfig,
) -> Result<(), AppError> {
    let admin = &app_cfg.admin;
    if let Some(created) = users
        .bootstrap_admin(&admin.name, &admin.email, &admin.password)
        .await?
    {
        info!(user_id = %created.user_id(), email = %created.email(), "Default admin created");
    }
    Ok(())
}

/// Initialize tracing (logging) from the application config. Logs go to
/// stderr; stdout is reserved for command output.
///
/// Call this once at process startup (before [`AppContext::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
