//! # chirp-db
//!
//! PostgreSQL implementations of the chirp-core repository traits via SQLx.
//!
//! - Connection pool management and migrations
//! - Row models with `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use chirp_db::{create_pool, PgPostRepository, PoolConfig};
//!
//! let pool = create_pool(&PoolConfig::new(database_url)).await?;
//! let posts = PgPostRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, default_migrations_dir, ping, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgCommentRepository, PgFollowRepository, PgLikeRepository, PgPostRepository,
    PgProfileRepository,
};
