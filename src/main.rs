use axum::{
    body::Body,
    http::Request,
    middleware::{self, Next},
    routing::get,
    Router,
};
use std::{env, io::Write, net::SocketAddr, time::Instant};
use tokio::net::TcpListener;

// Logging components
use chrono::Local;
use env_logger::Builder;
use log::{debug, info, LevelFilter};
use tower_http::{
    cors::CorsLayer,
    trace::{self, TraceLayer},
};
use tracing::Level as TracingLevel;

use sudoku_solver_api::routes::api_router;

// Request/response log middleware
async fn log_request_response(req: Request<Body>, next: Next) -> axum::response::Response {
    let path = req.uri().path().to_owned();
    let method = req.method().clone();
    let start = Instant::now();

    info!(">> Request started: {} {}", method, path);

    let response = next.run(req).await;

    let status = response.status();
    let duration = start.elapsed();

    info!(
        "<< Request completed: {} {} - Status: {} - Duration: {:.2?}",
        method, path, status, duration
    );

    response
}

#[tokio::main]
async fn main() {
    // Logging configuration
    setup_logger();
    info!("Sudoku Solver API starting...");

    // API routes
    let app = Router::new()
        .route("/", get(|| async { "Sudoku Solver API running!" }))
        .merge(api_router())
        .layer(middleware::map_response(log_response))
        .layer(middleware::from_fn(log_request_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(TracingLevel::INFO))
                .on_request(trace::DefaultOnRequest::new().level(TracingLevel::INFO))
                .on_response(trace::DefaultOnResponse::new().level(TracingLevel::INFO)),
        )
        .layer(CorsLayer::permissive());

    let port = env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Server running at http://{}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

// Logging configuration
fn setup_logger() {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();
}

// Response logging
async fn log_response(response: axum::response::Response) -> axum::response::Response {
    debug!("Sending response: Status={}", response.status());
    response
}
