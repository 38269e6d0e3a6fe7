use std::{env, future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use dotenvy::dotenv;
use migration::MigratorTrait;
use models::db::DatabaseConfig;
use sea_orm::DatabaseConnection;
use service::producto::repo::seaorm::SeaOrmProductoRepository;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

/// Any origin may call the API.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Bind address and database settings from the config file at `path`, or from
/// env vars when that file does not exist. A present but invalid file is an error.
fn load_settings(path: &str) -> anyhow::Result<(SocketAddr, DatabaseConfig)> {
    let (host, port, db_cfg) = match configs::load_optional_from(path)? {
        Some(cfg) => {
            let s = cfg.server;
            (s.host, s.port, DatabaseConfig::from(cfg.database))
        }
        None => {
            info!(path, "no config file; using environment");
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port, DatabaseConfig::from_env())
        }
    };
    Ok((format!("{}:{}", host, port).parse()?, db_cfg))
}

/// Connect and bring the schema up to date.
pub async fn prepare_db(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    common::env::ensure_db_dir(&cfg.url).await?;
    let db = models::db::connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Wire store → service → router over an open connection.
pub fn build_app(db: DatabaseConnection) -> Router {
    let state = ServerState::new(Arc::new(SeaOrmProductoRepository::new(db)));
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and serve until `shutdown` resolves.
pub async fn run(shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
    dotenv().ok();

    let (addr, db_cfg) = load_settings(&configs::config_path())?;
    let db = prepare_db(&db_cfg).await?;
    let app = build_app(db);

    info!(%addr, "starting catalogo server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
