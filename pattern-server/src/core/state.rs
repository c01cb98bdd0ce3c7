//! Server state
//!
//! [`ServerState`] holds shared references to every service. Cloning is
//! cheap (Arc internals), one copy travels with each request.

use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::catalog::{CatalogService, ImageStore};
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared server state
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | db | Surreal<Db> | Embedded database handle |
/// | jwt_service | Arc<JwtService> | Token issue/verify |
/// | image_store | ImageStore | Product image file storage |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub image_store: ImageStore,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// 1. Ensure the working directory layout exists
    /// 2. Open the embedded database under `{work_dir}/database/`
    /// 3. Construct JWT service and image store
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("pattern.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let image_store = ImageStore::new(PathBuf::from(&config.assets_dir));

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service,
            image_store,
        })
    }

    /// Get a database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Build a catalog service over the shared database and image store
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.db.clone(), self.image_store.clone())
    }
}
