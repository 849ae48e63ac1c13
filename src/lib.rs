//! # Catalog Service
//!
//! Item catalog backend with temporally versioned prices.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Value objects, entities and repository traits
//! - **application**: Use cases (item/price orchestration, identity)
//! - **infrastructure**: Database (SeaORM entities, migrations, repositories) and crypto
//! - **presenter**: JSON shapes returned to callers
//! - **runtime**: Process bootstrap shared by every entry point

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presenter;
pub mod runtime;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

pub use runtime::{init_tracing, AppContext, RuntimeOptions};
