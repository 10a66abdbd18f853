use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Catalog;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Fetch, Filter, Render }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Fetch => "fetch", Phase::Filter => "filter", Phase::Render => "render" } }
    fn span(&self) -> Span { match self { Phase::Fetch => info_span!("fetch"), Phase::Filter => info_span!("filter"), Phase::Render => info_span!("render") } }
}

impl OpMarker for Catalog {
    const NAME: &'static str = "catalog";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("catalog") }
}
