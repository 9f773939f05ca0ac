use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config, error, spotify, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let settings = match config::load_settings().await {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    spotify::auth::auth(shared_state, &settings.spotify).await;
}
