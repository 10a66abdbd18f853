use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Browse;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Input, Event, Render }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Input => "input", Phase::Event => "event", Phase::Render => "render" } }
    fn span(&self) -> Span { match self { Phase::Input => info_span!("input"), Phase::Event => info_span!("event"), Phase::Render => info_span!("render") } }
}

impl OpMarker for Browse {
    const NAME: &'static str = "browse";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("browse") }
}
