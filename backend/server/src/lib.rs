//! Backend of a dining hall menu browser and protein planner.
//!
//!
//!
//! # General Infrastructure
//! - Browser talks only to this server, never to the dining API directly
//! - Server forwards menu requests to the dining API in two hops (periods, then menu)
//! - The raw menu endpoint hands the upstream JSON back untouched
//! - Typed endpoints decode the menu to filter it or plan a day against it
//! - When a built front end sits in `STATIC_DIR`, it is served from `/` with
//!   `index.html` as the fallback for client-side routes
//!
//!
//!
//! # Routes
//!
//! | Route | |
//! |-------|-|
//! | `GET /api/test` | Liveness check |
//! | `GET /api/menu?date=YYYY-MM-DD&meal=lunch` | Upstream menu JSON, unmodified |
//! | `GET /api/menu/summary?date=...&meal=...&vegan=true` | Filtered menu with macros |
//! | `POST /api/plan` | Day plan totals and recommendations |
//!
//! Anything else under `/api` is a JSON 404, never the front end.
//!
//!
//!
//! # Setup
//!
//! Run with logs.
//! ```sh
//! RUST_LOG=info cargo run -p dining
//! ```
//!
//! Point at another location.
//! ```sh
//! DINING_LOCATION_ID=... cargo run -p dining
//! ```
//!
//! Generate docs in `target/doc/packageName/index.html`.
//! ```sh
//! cargo doc
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod view;

use config::Config;
use routes::{api_not_found, menu_handler, plan_handler, summary_handler, test_handler};
use state::State;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new(Config::load()).expect("Failed to build dining client");

    info!("Starting server...");

    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    info!("Server shutting down...");
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/test", get(test_handler))
        .route("/menu", get(menu_handler))
        .route("/menu/summary", get(summary_handler))
        .route("/plan", post(plan_handler))
        .fallback(api_not_found);

    let mut app = Router::new().nest("/api", api);

    let static_dir = &state.config.static_dir;
    if static_dir.is_dir() {
        info!("Serving front end from {}", static_dir.display());

        let index = ServeFile::new(static_dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(static_dir).fallback(index));
    } else {
        info!("No front end at {}, serving API only", static_dir.display());
    }

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    app.layer(cors).layer(trace).with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
