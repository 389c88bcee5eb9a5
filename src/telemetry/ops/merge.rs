use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Merge;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, Read, Join, Write }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Plan => "plan", Phase::Read => "read", Phase::Join => "join", Phase::Write => "write" } }
    fn span(&self) -> Span { match self { Phase::Plan => info_span!("plan"), Phase::Read => info_span!("read"), Phase::Join => info_span!("join"), Phase::Write => info_span!("write") } }
}

impl OpMarker for Merge {
    const NAME: &'static str = "merge";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("merge") }
}
