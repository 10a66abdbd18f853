use tracing::Instrument;

use crate::api::{ApiError, FlyerApi, FlyerSummary, MealPlan};
use crate::telemetry::{self};
use crate::telemetry::ops::plan::Phase as PlanPhase;

use super::Stage;

#[derive(Debug)]
pub struct PipelineError {
    pub stage: Stage,
    pub source: ApiError,
}

impl PipelineError {
    pub fn user_message(&self) -> String {
        self.source.user_message()
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} stage failed: {}", self.stage.label(), self.source)
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn at(stage: Stage) -> impl FnOnce(ApiError) -> PipelineError {
    move |source| PipelineError { stage, source }
}

/// Store → extract → generate for one flyer. `on_stage` fires before each
/// call; the first failure ends the run. Earlier stages are not undone.
pub async fn run_pipeline<F>(
    api: &dyn FlyerApi,
    flyer: &FlyerSummary,
    postal_code: &str,
    mut on_stage: F,
) -> Result<MealPlan, PipelineError>
where
    F: FnMut(Stage),
{
    let log = telemetry::plan();
    let merchant = flyer.merchant.as_str();
    let root = log.root_span_kv([("flyer_id", flyer.id.to_string()), ("merchant", merchant.to_string())]);

    // Must stay Send: browse spawns this future.
    let result: Result<MealPlan, PipelineError> = async {
        on_stage(Stage::Storing);
        log.info(Stage::Storing.status(merchant));
        let stored = api
            .fetch_and_store(merchant, postal_code)
            .instrument(log.span_kv(&PlanPhase::Store, [("postal_code", postal_code.to_string())]))
            .await
            .map_err(at(Stage::Storing))?;
        log.info_kv("stored", [("image_path", stored.image_path.clone())]);

        on_stage(Stage::Extracting);
        log.info(Stage::Extracting.status(merchant));
        let ack = api
            .extract_items(merchant, &stored.image_path)
            .instrument(log.span(&PlanPhase::Extract))
            .await
            .map_err(at(Stage::Extracting))?;
        if let Some(msg) = &ack.message { log.info(msg); }

        on_stage(Stage::Generating);
        log.info(Stage::Generating.status(merchant));
        let plan = api
            .generate_meal_plan(merchant)
            .instrument(log.span(&PlanPhase::Generate))
            .await
            .map_err(at(Stage::Generating))?;
        Ok(plan)
    }
    .instrument(root)
    .await;

    match &result {
        Ok(plan) => log.plan_ready(merchant, plan.days.len(), plan.shopping_list.len()),
        Err(e) => log.stage_failed(e.stage.label(), &e.user_message()),
    }
    result
}
