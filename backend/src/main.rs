//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use std::env;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::auth::AdminCredentials;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, MIGRATIONS, PoolConfig};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;
    let admin = load_admin_credentials()?;

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr, admin);
    if let Some(pool) = connect_database().await? {
        config = config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL not set; serving fixture data only");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server started");
    server.await
}

/// Read the session signing key, generating an ephemeral one in dev builds.
fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Read the administrator credentials from the environment.
fn load_admin_credentials() -> std::io::Result<AdminCredentials> {
    match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
        (Ok(email), Ok(password)) if !email.trim().is_empty() && !password.is_empty() => {
            Ok(AdminCredentials::new(email.trim().to_lowercase(), password))
        }
        _ if cfg!(debug_assertions) => {
            warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set; using dev credentials");
            Ok(AdminCredentials::new("admin@example.test", "password"))
        }
        _ => Err(std::io::Error::other(
            "ADMIN_EMAIL and ADMIN_PASSWORD must be set",
        )),
    }
}

/// Connect to PostgreSQL and apply pending migrations when configured.
async fn connect_database() -> std::io::Result<Option<DbPool>> {
    let Ok(database_url) = env::var("DATABASE_URL") else {
        return Ok(None);
    };

    run_migrations(database_url.clone()).await?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;
    Ok(Some(pool))
}

/// Apply embedded migrations on a blocking thread.
async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        use diesel_migrations::MigrationHarness;

        let mut conn = diesel::PgConnection::establish(&database_url)
            .map_err(|e| std::io::Error::other(format!("failed to connect for migrations: {e}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task panicked: {e}")))?
}
