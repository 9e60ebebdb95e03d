//! Public portfolio site binary.

use std::sync::Arc;

use folio::content::Content;
use folio::notify::TelegramNotifier;
use folio::site::{self, SiteState};
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
    let notifier = config
        .telegram
        .as_ref()
        .map(|t| TelegramNotifier::new(&t.bot_token, &t.chat_id));

    let state = Arc::new(SiteState {
        store: RestStore::new(&config.store_url),
        content: Content::new(&config.links_key),
        uploads: UploadStore::new(&config.resume_dir, &config.image_dir),
        notifier,
        owner_name: config.owner_name,
        owner_tagline: config.owner_tagline,
        admin_url: config.admin_url,
    });

    tracing::info!(addr = %config.site_addr, store = %config.store_url, "starting folio site");
    site::serve(state, &config.site_addr).await?;
    Ok(())
}
