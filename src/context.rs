//! Shared application context
use crate::auth::AuthService;
use crate::bookmarks::BookmarkSet;
use crate::catalog::TutorialCatalog;
use crate::config::ServerConfig;
use crate::db;
use crate::error::AppResult;
use crate::progress::ProgressTracker;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application context shared across all handlers
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub db: SqlitePool,
    pub auth: Arc<AuthService>,
    pub catalog: Arc<TutorialCatalog>,
    pub progress: Arc<ProgressTracker>,
    pub bookmarks: Arc<BookmarkSet>,
}

impl AppContext {
    /// Open the configured database, migrate it, and build the context
    pub async fn new(config: ServerConfig) -> AppResult<Self> {
        config.validate()?;

        tracing::info!("Opening database at {:?}", config.storage.database);
        let pool = db::create_pool(&config.storage.database, db::DatabaseOptions::default()).await?;
        db::run_migrations(&pool).await?;
        db::test_connection(&pool).await?;

        Self::with_pool(config, pool).await
    }

    /// Build the context over an already-migrated pool
    pub async fn with_pool(config: ServerConfig, pool: SqlitePool) -> AppResult<Self> {
        let config = Arc::new(config);

        let catalog = TutorialCatalog::new(pool.clone());
        let seeded = catalog.seed_if_empty().await?;
        if seeded > 0 {
            tracing::info!("Seeded tutorial catalog with {} tutorials", seeded);
        }

        Ok(Self {
            auth: Arc::new(AuthService::new(pool.clone(), config.clone())),
            catalog: Arc::new(catalog),
            progress: Arc::new(ProgressTracker::new(pool.clone())),
            bookmarks: Arc::new(BookmarkSet::new(pool.clone())),
            db: pool,
            config,
        })
    }

    /// Base URL the service answers on
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}
