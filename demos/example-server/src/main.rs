use ferrule::prelude::*;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod controllers;
mod services;

use controllers::{AnotherController, HomeController};
use services::ExampleInjectableService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ferrule=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Example Server...");

    // 1. Configuration
    let mut app = Application::new();
    let config = app.register_service::<ConfigService>()?;

    // 2. Services and controllers
    app.injectable::<ExampleInjectableService>();

    let mut router = Router::new();
    app.register_controller::<HomeController, _>(&mut router)?;
    app.register_controller::<AnotherController, _>(&mut router)?;

    // 3. Repeat schedules of every controller and singleton
    app.start_all_repeats()?;

    // 4. Serve with graceful shutdown
    let host = config.get_or("HOST", "0.0.0.0");
    let port = config.get_parsed::<u16>("PORT").unwrap_or(3000);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;

    tracing::info!("Server is listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router.layer(TraceLayer::new_for_http()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Initiating graceful shutdown...");
    app.shutdown();
    tracing::info!("Server stopped");
    Ok(())
}
