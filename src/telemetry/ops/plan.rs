use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Plan;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Select, Store, Extract, Generate, Render }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Select => "select",
        Phase::Store => "store",
        Phase::Extract => "extract",
        Phase::Generate => "generate",
        Phase::Render => "render",
    }}
    fn span(&self) -> Span { match self {
        Phase::Select => info_span!("select"),
        Phase::Store => info_span!("store"),
        Phase::Extract => info_span!("extract"),
        Phase::Generate => info_span!("generate"),
        Phase::Render => info_span!("render"),
    }}
}

impl OpMarker for Plan {
    const NAME: &'static str = "plan";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("plan") }
}
