pub mod config;
pub mod ctx;
pub mod ops;
pub mod sink;

use ctx::LogCtx;

fn ctx<O: ctx::OpMarker>() -> LogCtx<O> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }

pub fn scrape() -> LogCtx<ops::scrape::Scrape> { ctx() }
pub fn clean() -> LogCtx<ops::clean::Clean> { ctx() }
pub fn merge() -> LogCtx<ops::merge::Merge> { ctx() }
pub fn enrich() -> LogCtx<ops::enrich::Enrich> { ctx() }
pub fn stats() -> LogCtx<ops::stats::Stats> { ctx() }
