//! # dormctl: Dormitory Administration Backend
//!
//! `dormctl` is the administration backend for a university dormitory: a JSON
//! HTTP API over PostgreSQL that keeps the student roster, the room inventory,
//! the record of who lives where, and the payment ledger.
//!
//! ## Overview
//!
//! Administrators register students with their personal details, settle them
//! into rooms, and record their payments. The room inventory is fixed per
//! deployment and seeded from configuration; the API reports availability
//! against each room's capacity. Settlement is the one operation with real
//! business rules: a student may occupy at most one room, and a room may never
//! hold more students than its capacity, even under concurrent requests.
//! Removing a student also removes their settlement and payment records so the
//! roster never carries dangling references.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum); persistence is
//! PostgreSQL throughout. The [`api`] module exposes the admin endpoints under
//! `/api/*`, serves a small embedded landing page at the root, and hosts
//! interactive API documentation at `/docs`. The [`db`] module wraps each
//! entity (students, rooms, settlements, payments) in a repository that owns
//! its queries. Room assignment runs inside a transaction that locks the
//! target room row, so capacity checks hold under concurrency; a unique
//! constraint on the settled student backstops the one-room-per-student rule.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use dormctl::{Application, Config, config::Args};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(&Args::parse())?;
//!     dormctl::telemetry::init_telemetry()?;
//!
//!     Application::new(config)
//!         .await?
//!         .serve(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await
//! }
//! ```
//!
//! Startup connects to PostgreSQL, applies any pending [`migrator`] migrations,
//! and seeds the configured room inventory before binding the listener. See
//! the [`config`] module for the configuration surface.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
mod static_assets;
pub mod telemetry;
mod types;

#[cfg(test)]
pub mod test_utils;

use crate::config::CorsOrigin;
use crate::openapi::ApiDoc;
use axum::http::HeaderValue;
use axum::{
    Router,
    routing::{delete, get, post},
};
pub use config::Config;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{PaymentId, RoomId, SettlementId, StudentId};

/// Shared state handed to every request handler: the connection pool and the
/// loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Migrations embedded in the binary; applied on every startup.
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Seed the room inventory from configuration.
///
/// Rooms have no creation endpoint, so the inventory is managed here. The
/// function is idempotent: rooms that already exist are left untouched, so a
/// capacity change in the config never rewrites a room that students may
/// already occupy.
///
/// # Errors
///
/// Returns an error if database operations fail.
#[instrument(skip_all)]
pub async fn seed_rooms(rooms: &[config::RoomSeed], db: &PgPool) -> anyhow::Result<()> {
    if rooms.is_empty() {
        return Ok(());
    }

    // One transaction so a partial seed never becomes visible
    let mut tx = db.begin().await?;

    let mut created = 0u64;
    for room in rooms {
        let result = sqlx::query(
            "INSERT INTO rooms (room_number, capacity)
             VALUES ($1, $2)
             ON CONFLICT (room_number) DO NOTHING",
        )
        .bind(&room.number)
        .bind(room.capacity)
        .execute(&mut *tx)
        .await?;
        created += result.rows_affected();
    }

    tx.commit().await?;

    if created > 0 {
        info!("Seeded {} new room(s) from configuration", created);
    } else {
        debug!("Room inventory already seeded, nothing to do");
    }

    Ok(())
}

/// Connect the pool, apply migrations, seed the room inventory.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let settings = &config.database.pool;

    let mut options = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(settings.acquire_timeout_secs));

    // Zero means "never" for both timeouts
    if settings.idle_timeout_secs > 0 {
        options = options.idle_timeout(std::time::Duration::from_secs(settings.idle_timeout_secs));
    }
    if settings.max_lifetime_secs > 0 {
        options = options.max_lifetime(std::time::Duration::from_secs(settings.max_lifetime_secs));
    }

    let pool = options.connect(&config.database.url).await?;
    migrator().run(&pool).await?;

    seed_rooms(&config.rooms, &pool).await?;

    Ok(pool)
}

/// Translate the configured origin list into a [`CorsLayer`].
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origins = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>(),
            CorsOrigin::Url(url) => url.as_str().parse::<HeaderValue>(),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Assemble the full router: the admin API nested under `/api`, a health
/// probe, the Scalar documentation UI, and the embedded landing page as the
/// fallback, with CORS and request tracing layered on top.
///
/// # Errors
///
/// Returns an error if a configured CORS origin is not a valid header value.
#[instrument(skip_all)]
fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        // Student roster
        .route("/students", get(api::handlers::students::list_students))
        .route("/students", post(api::handlers::students::create_student))
        .route("/students/{id}", delete(api::handlers::students::delete_student))
        // Room inventory
        .route("/rooms", get(api::handlers::rooms::list_rooms))
        .route("/rooms/available", get(api::handlers::rooms::list_available_rooms))
        // Room assignment
        .route("/settlements", get(api::handlers::settlements::list_settlements))
        .route("/settlements", post(api::handlers::settlements::create_settlement))
        .route(
            "/settlements/student/{id}",
            delete(api::handlers::settlements::delete_settlement),
        )
        // Payment ledger
        .route("/payments", get(api::handlers::payments::list_payments))
        .route("/payments", post(api::handlers::payments::create_payment))
        .route(
            "/payments/student/{id}",
            get(api::handlers::payments::list_student_payments),
        )
        // Dashboard totals
        .route("/statistics", get(api::handlers::statistics::get_statistics))
        .with_state(state.clone());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .fallback(get(api::handlers::static_assets::serve_embedded_asset))
        .layer(create_cors_layer(&state.config)?)
        .layer(trace_layer);

    Ok(router)
}

/// Owns the router, the configuration, and the connection pool.
///
/// [`Application::new`] brings the database to a servable state (connect,
/// migrate, seed rooms); [`Application::serve`] binds the listener and runs
/// until the shutdown future resolves, then drains the pool.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Connect to the configured database and prepare the router.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Like [`Application::new`], but on a caller-provided pool.
    ///
    /// Used by tests that bring their own database. Migrations and room
    /// seeding still run; both are idempotent.
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        debug!("Booting with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => {
                migrator().run(&pool).await?;
                seed_rooms(&config.rooms, &pool).await?;
                pool
            }
            None => setup_database(&config).await?,
        };

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };

        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Wrap the router in an in-process test server.
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Bind the listener and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Dormitory backend listening on http://{}", bind_addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Draining database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::seed_rooms;
    use crate::config::RoomSeed;
    use crate::test_utils::create_test_app;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_seed_rooms_creates_missing_rooms_only(pool: PgPool) {
        let rooms = vec![
            RoomSeed {
                number: "101".to_string(),
                capacity: 2,
            },
            RoomSeed {
                number: "102".to_string(),
                capacity: 3,
            },
        ];

        seed_rooms(&rooms, &pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms").fetch_one(&pool).await.unwrap();
        assert_eq!(count, 2);

        // Re-seeding with a changed capacity must not touch the existing room
        let changed = vec![
            RoomSeed {
                number: "101".to_string(),
                capacity: 5,
            },
            RoomSeed {
                number: "103".to_string(),
                capacity: 1,
            },
        ];

        seed_rooms(&changed, &pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms").fetch_one(&pool).await.unwrap();
        assert_eq!(count, 3);

        let capacity: i32 = sqlx::query_scalar("SELECT capacity FROM rooms WHERE room_number = '101'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(capacity, 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_healthz(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server.get("/healthz").await;

        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_docs_page_served(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server.get("/docs").await;

        response.assert_status_ok();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_landing_page_served_at_root(pool: PgPool) {
        let server = create_test_app(pool).await;

        let response = server.get("/").await;

        response.assert_status_ok();
        assert!(response.text().contains("Dormitory"));
    }
}
