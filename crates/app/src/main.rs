mod settings;

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use settings::Settings;
use domain::{CommentQuery, QueryArgs};
use storage::Db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;

    let db = Arc::new(Db::new(&settings.database.url).await?);
    let query = CommentQuery::new(db.clone(), db.clone(), db, settings.query);

    let ids = std::env::args()
        .skip(1)
        .map(|arg| {
            arg.parse::<u64>()
                .with_context(|| format!("Invalid comment id: {}", arg))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let comments = if ids.is_empty() {
        query.fetch_from_args(QueryArgs::new()).await?
    } else {
        query.fetch_from_ids(&ids).await?
    };

    info!("Fetched {} comment(s)", comments.len());

    for comment in &comments {
        println!("{}", serde_json::to_string(comment)?);
    }

    Ok(())
}
