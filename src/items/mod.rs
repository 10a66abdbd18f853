use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use tracing::Instrument;

use crate::api::FlyerApi;
use crate::config::ClientConfig;
use crate::output::Emitter;
use crate::render;
use crate::telemetry::{self};
use crate::telemetry::ops::items::Phase as ItemsPhase;

/// flyerplan items <STORE>: items the backend extracted for a store
#[derive(Args, Debug)]
pub struct ItemsCmd {
    pub store: String,
}

pub async fn run(api: Arc<dyn FlyerApi>, _cfg: &ClientConfig, args: ItemsCmd, out: &mut Emitter) -> Result<()> {
    let log = telemetry::items();
    let root = log.root_span_kv([("store", args.store.clone())]);

    let fetched = api
        .flyer_items(&args.store)
        .instrument(log.span(&ItemsPhase::Fetch))
        .instrument(root.clone())
        .await;

    let _g = root.entered();
    let _s = log.span(&ItemsPhase::Render).entered();
    match fetched {
        Ok(items) => {
            log.info(format!("📦 {} items for {}", items.len(), args.store));
            out.emit("items", &render::render_items(&args.store, &items))?;
            Ok(())
        }
        Err(err) => {
            let message = err.user_message();
            log.warn_kv("items fetch failed", [("error", err.to_string())]);
            out.emit("items", &render::render_error(&message))?;
            bail!(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{status_error, MockApi, MockCall};
    use crate::api::FlyerItem;
    use crate::output::presenter::testing::SharedBuf;
    use crate::output::config::OutputFormat;
    use crate::output::OutputConfig;

    fn emitter() -> (Emitter, SharedBuf) {
        let buf = SharedBuf::default();
        let cfg = OutputConfig { format: OutputFormat::Text, pretty: false };
        (Emitter::to_writer(cfg, Box::new(buf.clone())), buf)
    }

    fn potatoes() -> FlyerItem {
        FlyerItem {
            name: "Russet Potatoes".into(),
            price: 3.99,
            selling_unit: "bag".into(),
            selling_value: Some(1.0),
            measured_quantity_value: Some(5.0),
            measured_quantity_unit: Some("lb".into()),
            store: "Walmart".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn lists_items_for_store() {
        let api = Arc::new(MockApi::new());
        api.push_items(Ok(vec![potatoes()]));
        let (mut out, buf) = emitter();

        run(api.clone(), &ClientConfig::default(), ItemsCmd { store: "Walmart".into() }, &mut out).await.unwrap();

        let text = buf.contents();
        assert!(text.contains("Items for Walmart (1)"));
        assert!(text.contains("$   3.99 / bag (5 lb)"));
        assert_eq!(api.calls(), vec![MockCall::Items { store_name: "Walmart".into() }]);
    }

    #[tokio::test]
    async fn empty_store_shows_notice() {
        let api = Arc::new(MockApi::new());
        api.push_items(Ok(vec![]));
        let (mut out, buf) = emitter();

        run(api, &ClientConfig::default(), ItemsCmd { store: "Metro".into() }, &mut out).await.unwrap();
        assert!(buf.contents().contains("No stored items for Metro"));
    }

    #[tokio::test]
    async fn server_error_is_rendered_and_returned() {
        let api = Arc::new(MockApi::new());
        api.push_items(Err(status_error(500, Some("Database error occurred"))));
        let (mut out, buf) = emitter();

        let err = run(api, &ClientConfig::default(), ItemsCmd { store: "Metro".into() }, &mut out).await.unwrap_err();
        assert_eq!(err.to_string(), "Database error occurred");
        assert!(buf.contents().contains("❌ Database error occurred"));
    }
}
