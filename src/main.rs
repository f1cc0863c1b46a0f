use encore::{app, db, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let database_url =
        dotenv::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:encore.db".to_owned());
    let db_pool = db::connect(&database_url).await.unwrap();

    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();

    tracing::info!(%bind_addr, %database_url, "listening");
    axum::serve(listener, app(AppState { db_pool })).await.unwrap();
}
