use anyhow::Context;
use diesel_async::{
    pooled_connection::{
        deadpool::{Object, Pool},
        AsyncDieselConnectionManager,
    },
    AsyncPgConnection,
};

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection = Object<AsyncPgConnection>;

const MAX_POOL_SIZE: usize = 10;

/// Build the connection pool. Connections are opened lazily on first use.
pub fn establish_connection_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool = Pool::builder(config)
        .max_size(MAX_POOL_SIZE)
        .build()
        .context("Failed to create database pool")?;

    Ok(pool)
}
