//! Demo: restores the persisted session and prints the most recent games.
//!
//! ```bash
//! GAMEHUB_API_URL=http://localhost:3000 RUST_LOG=info cargo run
//! ```

use gamehub_client::lifecycle::{ClientConfig, ServiceRegistry};
use gamehub_client::model::{GameFilter, Page};
use resource_framework::tracing::setup_tracing;
use resource_framework::{InteractionKind, InteractiveService};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ClientConfig::load().map_err(|e| e.to_string())?;
    let registry = ServiceRegistry::new(&config).map_err(|e| e.to_string())?;

    let state = registry.session.init().await;
    match registry.session.current_user() {
        Some(user) => info!(user = %user.username, "Welcome back"),
        None => info!(?state, "Browsing anonymously"),
    }

    let filter = GameFilter {
        sort: Some("recent".to_string()),
        page: Page::new(1, 5),
        ..Default::default()
    };

    let span = tracing::info_span!("recent_games");
    let games = async { registry.games.list(&filter).await }
        .instrument(span)
        .await;

    match games {
        Ok(page) => {
            info!(total = page.meta.total, "Recent games");
            for game in &page.data {
                info!(pid = %game.pid, views = game.views, "{}", game.title);
            }
            if let Some(first) = page.data.first() {
                let viewed = registry
                    .games
                    .add_interaction(&first.pid, InteractionKind::Views)
                    .await;
                if let Err(e) = viewed {
                    error!(error = %e, "Could not record view");
                }
            }
        }
        Err(e) => {
            error!(error = %e, "Could not list games");
            return Err(e.to_string());
        }
    }

    Ok(())
}
