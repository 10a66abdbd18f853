use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;

use crate::api::FlyerApi;
use crate::catalog::{load_catalog, CatalogState};
use crate::config::ClientConfig;
use crate::output::Emitter;
use crate::render;
use crate::session::pipeline;
use crate::session::{App, AppEvent, Command, SessionState};
use crate::telemetry::{self};
use crate::telemetry::ops::plan::Phase as PlanPhase;

/// flyerplan plan <FLYER_ID>
#[derive(Args, Debug)]
pub struct PlanCmd {
    /// Flyer id as listed by `flyerplan flyers`
    pub flyer_id: i64,
}

pub async fn run(api: Arc<dyn FlyerApi>, cfg: &ClientConfig, args: PlanCmd, out: &mut Emitter) -> Result<()> {
    let log = telemetry::plan();
    let mut app = App::new();

    let catalog = load_catalog(api.as_ref(), &cfg.postal_code).await;
    let catalog_failed = matches!(catalog, CatalogState::Failed(_));
    app.handle(AppEvent::CatalogLoaded(catalog));
    if catalog_failed {
        out.emit("plan", &render::render(&app))?;
        bail!("catalog unavailable");
    }

    {
        let _s = log.span_kv(&PlanPhase::Select, [("flyer_id", args.flyer_id.to_string())]).entered();
        log.info(format!("📝 Selected flyer {}", args.flyer_id));
    }
    run_session(&mut app, api.as_ref(), &cfg.postal_code, Some(args.flyer_id)).await;

    let _s = log.span(&PlanPhase::Render).entered();
    out.emit("plan", &render::render(&app))?;
    if let SessionState::Failed { message } = app.session() {
        bail!("{message}");
    }
    Ok(())
}

/// Run one selection to completion on the current task.
pub async fn run_session(app: &mut App, api: &dyn FlyerApi, postal_code: &str, id: Option<i64>) {
    let Some(Command::RunPipeline { token, flyer }) = app.handle(AppEvent::Select(id)) else {
        return;
    };
    let outcome = pipeline::run_pipeline(api, &flyer, postal_code, |stage| {
        app.stage(token, stage);
    })
    .await
    .map_err(|e| e.user_message());
    app.finish(token, outcome);
}
