use axum::{Extension, Router, routing::get};
use std::{convert::Infallible, net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    api, error,
    types::{PkceToken, SpotifySettings},
};

pub async fn start_api_server(
    state: Arc<Mutex<Option<PkceToken>>>,
    spotify: Arc<SpotifySettings>,
    bind_addr: String,
) {
    let app = Router::new().route("/health", get(api::health)).route(
        "/callback",
        get(api::callback)
            .layer::<_, Infallible>(Extension(state))
            .layer::<_, Infallible>(Extension(spotify)),
    );

    let addr = match SocketAddr::from_str(&bind_addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
