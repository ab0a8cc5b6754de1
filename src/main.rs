use popscope::{app, app_state::AppState, config::Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().expect("Failed to load configuration");
    let bind_addr = config.bind_addr().to_string();
    let state = AppState::new(config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!("listening on {}", bind_addr);
    axum::serve(listener, app(state)).await.unwrap();
}
