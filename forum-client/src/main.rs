use std::env;

use dotenv::dotenv;
use forum_client::{ClientError, Dependencies};
use forum_client_shared::types::Votable;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("forum_client=info,forum_client_engine=info"));

    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "forum-client",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );
}

/// Main entry point for the forum client.
///
/// Loads the configuration, wires the dependencies and reads the front page
/// and tag list through the cache.
#[tokio::main]
async fn main() -> Result<(), ClientError> {
    dotenv().ok();

    init_tracing();

    let deps = match Dependencies::new() {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let posts = deps.client.front_page_posts().await?;
    info!(count = posts.len(), "Fetched front page");
    for post in &posts {
        let votes = post.vote_snapshot();
        info!(
            id = %post.id,
            title = %post.title,
            likes = votes.likes,
            dislikes = votes.dislikes,
            user_vote = ?votes.vote,
            "Post"
        );
    }

    let tags = deps.client.tags().await?;
    info!(count = tags.len(), tags = ?tags, "Fetched tags");

    Ok(())
}
