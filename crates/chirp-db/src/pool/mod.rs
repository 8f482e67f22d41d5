//! Database connection pool management

mod postgres;

pub use postgres::{create_pool, default_migrations_dir, ping, run_migrations, PoolConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
