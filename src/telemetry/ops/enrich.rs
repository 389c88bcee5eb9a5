use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Enrich;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, Read, Classify, Write }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Plan => "plan", Phase::Read => "read", Phase::Classify => "classify", Phase::Write => "write" } }
    fn span(&self) -> Span { match self { Phase::Plan => info_span!("plan"), Phase::Read => info_span!("read"), Phase::Classify => info_span!("classify"), Phase::Write => info_span!("write") } }
}

impl OpMarker for Enrich {
    const NAME: &'static str = "enrich";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("enrich") }
}
