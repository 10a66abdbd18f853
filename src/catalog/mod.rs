use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::Instrument;

use crate::api::{ApiError, FlyerApi, FlyerSummary};
use crate::config::ClientConfig;
use crate::output::Emitter;
use crate::render;
use crate::telemetry::{self};
use crate::telemetry::ops::catalog::Phase as CatalogPhase;

pub const GROCERY_CATEGORY: &str = "Groceries";

/// flyerplan flyers
#[derive(Args, Debug)]
pub struct FlyersCmd {}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Ready(Vec<FlyerSummary>),
    Failed(String),
}

impl CatalogState {
    pub fn find(&self, id: i64) -> Option<&FlyerSummary> {
        match self {
            CatalogState::Ready(flyers) => flyers.iter().find(|f| f.id == id),
            _ => None,
        }
    }
}

/// Keeps catalog order.
pub fn grocery_flyers(all: Vec<FlyerSummary>) -> Vec<FlyerSummary> {
    all.into_iter().filter(|f| f.has_category(GROCERY_CATEGORY)).collect()
}

/// One catalog request, no retry. Every failure becomes a displayable message.
pub async fn load_catalog(api: &dyn FlyerApi, postal_code: &str) -> CatalogState {
    let log = telemetry::catalog();
    let root = log.root_span_kv([("postal_code", postal_code.to_string())]);

    async {
        let fetched = api
            .fetch_catalog(postal_code)
            .instrument(log.span(&CatalogPhase::Fetch))
            .await;
        let all = match fetched {
            Ok(all) => all,
            Err(err) => {
                log.warn_kv("catalog fetch failed", [("error", err.to_string())]);
                return CatalogState::Failed(catalog_error_message(&err, &api.catalog_host()));
            }
        };

        let total = all.len();
        let groceries = {
            let _s = log.span(&CatalogPhase::Filter).entered();
            grocery_flyers(all)
        };
        log.info_kv(
            &format!("🛒 {} grocery flyers ({} total)", groceries.len(), total),
            [("grocery", groceries.len().to_string()), ("total", total.to_string())],
        );
        if groceries.is_empty() {
            return CatalogState::Failed(format!("No grocery flyers found for postal code {postal_code}."));
        }
        CatalogState::Ready(groceries)
    }
    .instrument(root)
    .await
}

/// Connection-level failures name the catalog host and hint at a blocked request.
pub fn catalog_error_message(err: &ApiError, host: &str) -> String {
    match err {
        ApiError::Connect { .. } => format!(
            "Could not reach the flyer catalog at {host}. The request may have been blocked (cross-origin or network policy)."
        ),
        other => format!("Failed to load flyers: {}", other.user_message()),
    }
}

pub async fn run(api: Arc<dyn FlyerApi>, cfg: &ClientConfig, _args: FlyersCmd, out: &mut Emitter) -> Result<()> {
    let log = telemetry::catalog();
    let state = load_catalog(api.as_ref(), &cfg.postal_code).await;
    let failed = matches!(state, CatalogState::Failed(_));

    let _s = log.span(&CatalogPhase::Render).entered();
    out.emit("catalog", &render::render_catalog(&state))?;
    if failed {
        anyhow::bail!("catalog unavailable");
    }
    Ok(())
}
