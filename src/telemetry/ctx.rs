use anyhow::Result;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, event, info, Level, Span};

use crate::output::types::{Envelope, Meta};
use super::sink;

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

/// Typed logging handle for one operation. In JSON log mode every event
/// carries `op` and a flattened `details` string.
pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

// tracing needs the level at compile time
macro_rules! op_event {
    ($lvl:expr, $json:expr, $msg:expr, $details:expr, $op:expr) => {
        match ($json, $details.is_empty()) {
            (true, true) => event!($lvl, op = $op, "{}", $msg),
            (true, false) => event!($lvl, op = $op, details = %$details, "{}", $msg),
            (false, true) => event!($lvl, "{}", $msg),
            (false, false) => event!($lvl, "{} {}", $msg, $details),
        }
    };
}

impl<O: OpMarker> LogCtx<O> {
    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(fields);
        info!(op = O::NAME, details = %details, "start");
        self.root_span()
    }

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(fields);
        debug!(op = O::NAME, phase = ph.name(), details = %details, "span_start");
        self.span(ph)
    }

    fn log(&self, level: Level, msg: &str, details: &str) {
        if level == Level::ERROR {
            op_event!(Level::ERROR, self.json, msg, details, O::NAME)
        } else if level == Level::WARN {
            op_event!(Level::WARN, self.json, msg, details, O::NAME)
        } else if level == Level::DEBUG {
            op_event!(Level::DEBUG, self.json, msg, details, O::NAME)
        } else {
            op_event!(Level::INFO, self.json, msg, details, O::NAME)
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) { self.log(Level::INFO, msg.as_ref(), "") }
    pub fn debug(&self, msg: impl AsRef<str>) { self.log(Level::DEBUG, msg.as_ref(), "") }
    pub fn warn(&self, msg: impl AsRef<str>) { self.log(Level::WARN, msg.as_ref(), "") }

    pub fn info_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        self.log(Level::INFO, msg, &kv_to_string(kv))
    }

    pub fn warn_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        self.log(Level::WARN, msg, &kv_to_string(kv))
    }

    pub fn plan<T: Serialize>(&self, plan: &T) -> Result<()> {
        let env = Envelope::plan(O::NAME, plan, None)?;
        sink::current_sink().on_plan(&env)
    }

    pub fn result<T: Serialize>(&self, result: &T) -> Result<()> {
        let env = Envelope::result(O::NAME, result, None)?;
        sink::current_sink().on_result(&env)
    }

    pub fn result_with_meta<T: Serialize>(&self, result: &T, meta: Meta) -> Result<()> {
        let env = Envelope::result(O::NAME, result, Some(meta))?;
        sink::current_sink().on_result(&env)
    }
}

impl LogCtx<crate::telemetry::ops::scrape::Scrape> {
    pub fn task_summary(&self, task: &str, pages: usize, accepted: usize, rejected: usize, duplicates: usize, errors: usize) {
        if self.json { info!(op = "scrape", task, pages, accepted, rejected, duplicates, errors, "task_summary"); }
        else { info!("✅ {} pages={} accepted={} rejected={} duplicates={} errors={}", task, pages, accepted, rejected, duplicates, errors); }
    }

    pub fn totals(&self, accepted: usize, rejected: usize, duplicates: usize, errors: usize) {
        if self.json { info!(op = "scrape", accepted, rejected, duplicates, errors, "scrape_totals"); }
        else { info!("📊 Scrape totals: accepted={} rejected={} duplicates={} errors={}", accepted, rejected, duplicates, errors); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    kv.into_iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join(" ")
}
