use std::{env, net::SocketAddr, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    http::header::CONTENT_TYPE,
    http::Method,
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::app::{env::Envy, util};

mod app;
mod process_image;

#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub envy: Arc<Envy>,
}

impl AppState {
    pub fn new(envy: Envy) -> reqwest::Result<Self> {
        let client = util::reqwest::build_client(envy.upstream_timeout_secs)?;

        Ok(Self {
            client,
            envy: Arc::new(envy),
        })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET]);
    let max_upload_bytes = state.envy.max_upload_bytes();

    Router::new()
        .route("/", get(app::controller::get_root))
        .route(
            "/process-image/",
            post(process_image::controller::process_image),
        )
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let _ = dotenvy::dotenv();
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    if envy.app_url.is_none() {
        tracing::warn!("APP_URL is not set, image requests will fail");
    }

    // properties
    let port = envy.port();
    let state = match AppState::new(envy) {
        Ok(state) => state,
        Err(e) => panic!("failed to build http client: {:#?}", e),
    };

    // app
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    if let Err(e) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(%e);
    }
}
