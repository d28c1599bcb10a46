//! Process entry point for the POI search importer.

use tracing::{error, info};

use poi_indexer::Dependencies;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut deps = match Dependencies::new().await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize importer");
            std::process::exit(1);
        }
    };

    match deps.orchestrator.run().await {
        Ok(summary) => {
            info!(
                processed = summary.processed,
                skipped = summary.skipped,
                "Import finished"
            );
        }
        Err(e) => {
            error!(error = %e, "Import failed");
            std::process::exit(1);
        }
    }
}
