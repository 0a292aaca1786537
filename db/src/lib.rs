use sqlx::{
    Connection, PgConnection, PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use std::str::FromStr;

pub mod reimb;
pub mod user;

#[cfg(feature = "mock")]
pub mod mock;

pub mod models {
    pub mod reimb;
    pub mod user;
}

pub mod dtos {
    pub mod reimb;
    pub mod user;
}

/// Postgres error code for a connection to a database that does not exist.
const UNDEFINED_DATABASE: &str = "3D000";

/// Connects the pool and applies pending migrations. The database is created
/// through the `postgres` maintenance database only when the target is missing.
pub async fn setup(
    database_url: &str,
    require_ssl: bool,
    max_connections: u32,
) -> Result<PgPool, Box<dyn std::error::Error>> {
    let mut options = PgConnectOptions::from_str(database_url)?;
    if require_ssl {
        options = options.ssl_mode(PgSslMode::Require);
    }

    create_if_missing(&options).await?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

async fn create_if_missing(options: &PgConnectOptions) -> Result<(), sqlx::Error> {
    match PgConnection::connect_with(options).await {
        Ok(conn) => conn.close().await,
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNDEFINED_DATABASE) => {
            let db_name = target_database(options);
            log::info!("Creating database {}", db_name);
            let mut admin = PgConnection::connect_with(&maintenance_options(options)).await?;
            sqlx::query(&format!("CREATE DATABASE {}", quote_ident(db_name)))
                .execute(&mut admin)
                .await?;
            admin.close().await
        }
        Err(e) => Err(e),
    }
}

/// Postgres falls back to the user name when no database is given.
fn target_database(options: &PgConnectOptions) -> &str {
    options
        .get_database()
        .unwrap_or_else(|| options.get_username())
}

fn maintenance_options(options: &PgConnectOptions) -> PgConnectOptions {
    options.clone().database("postgres")
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
