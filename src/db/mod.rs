//! Persistent storage for employees and shifts.
//!
//! [`Store`] owns the database connection pool, applies migrations on
//! connect and hands out one repository per resource.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::RosterResult;

pub mod migrator;
pub mod repositories;

pub use repositories::{EmployeeRepository, ShiftRepository};

/// Lifetime and idle limit for the single in-memory connection. Closing it
/// discards the database, so it must outlive the process.
const IN_MEMORY_KEEP_ALIVE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(config.url.clone());
    opt.connect_timeout(config.connect_timeout())
        .acquire_timeout(config.connect_timeout())
        .sqlx_logging(false);

    if config.is_in_memory() {
        // every pooled connection to :memory: would open its own empty database
        opt.max_connections(1)
            .min_connections(1)
            .max_lifetime(IN_MEMORY_KEEP_ALIVE)
            .idle_timeout(IN_MEMORY_KEEP_ALIVE);
    } else {
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections);
    }
    opt
}

/// A cloneable handle to the roster database.
#[derive(Debug, Clone)]
pub struct Store {
    conn: DatabaseConnection,
}

impl Store {
    /// Connects to the configured database and applies pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> RosterResult<Self> {
        let conn = Database::connect(connect_options(config)).await?;
        migrator::Migrator::up(&conn, None).await?;

        info!(
            url = %config.url,
            in_memory = config.is_in_memory(),
            "Database connected & migrations applied"
        );

        Ok(Self { conn })
    }

    /// Connects to a fresh private in-memory database.
    pub async fn in_memory() -> RosterResult<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    /// Runs a trivial query to check the database is reachable.
    pub async fn ping(&self) -> RosterResult<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Returns the employee repository.
    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.conn.clone())
    }

    /// Returns the shift repository.
    pub fn shifts(&self) -> ShiftRepository {
        ShiftRepository::new(self.conn.clone())
    }
}
