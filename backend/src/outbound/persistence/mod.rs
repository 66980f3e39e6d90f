//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and hold no
//! review logic. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module.
//!
//! ```ignore
//! use fresque::outbound::persistence::{DbPool, DieselPackageRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/fresque")).await?;
//! let packages = DieselPackageRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_distribution_repository;
mod diesel_package_repository;
mod diesel_review_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_distribution_repository::DieselDistributionRepository;
pub use diesel_package_repository::DieselPackageRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
