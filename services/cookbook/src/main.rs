use sea_orm::Database;
use tracing::info;

use forkful_cookbook::config::CookbookConfig;
use forkful_cookbook::router::build_router;
use forkful_cookbook::state::AppState;

#[tokio::main]
async fn main() {
    forkful_core::tracing::init_tracing();

    let config = CookbookConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        base_url: config.base_url.clone(),
        media_root: config.media_root.clone(),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.cookbook_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("cookbook service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
