//! Admin dashboard binary.

use std::sync::Arc;

use folio::admin::{self, AdminState};
use folio::auth::SessionStore;
use folio::content::Content;
use folio::upload::UploadStore;
use folio::{Config, RestStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    let config = Config::from_env()?;

    let state = Arc::new(AdminState {
        store: RestStore::new(&config.store_url),
        content: Content::new(&config.links_key),
        sessions: SessionStore::new(),
        uploads: UploadStore::new(&config.resume_dir, &config.image_dir),
    });

    tracing::info!(addr = %config.admin_addr, store = %config.store_url, "starting folio admin");
    admin::serve(state, &config.admin_addr).await?;
    Ok(())
}
