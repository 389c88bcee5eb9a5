use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Clean;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, Read, Dedup, Write }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Plan => "plan", Phase::Read => "read", Phase::Dedup => "dedup", Phase::Write => "write" } }
    fn span(&self) -> Span { match self { Phase::Plan => info_span!("plan"), Phase::Read => info_span!("read"), Phase::Dedup => info_span!("dedup"), Phase::Write => info_span!("write") } }
}

impl OpMarker for Clean {
    const NAME: &'static str = "clean";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("clean") }
}
