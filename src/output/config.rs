use std::env;

use crate::telemetry::config::json_mode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl OutputConfig {
    /// `--json` wins over JOBS_OUTPUT_FORMAT.
    pub fn from_env() -> Self {
        let env_format = env::var("JOBS_OUTPUT_FORMAT").ok();
        let env_pretty = env::var("JOBS_OUTPUT_PRETTY").ok();
        Self::resolve(json_mode(), env_format.as_deref(), env_pretty.as_deref())
    }

    pub fn resolve(json_flag: bool, format: Option<&str>, pretty: Option<&str>) -> Self {
        let format = match format {
            _ if json_flag => OutputFormat::Json,
            Some(f) if f.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
        let pretty = matches!(pretty, Some(v) if v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"));
        OutputConfig { format, pretty }
    }
}

/// Stages emit an envelope on stdout when `--json` is passed or
/// JOBS_OUTPUT_FORMAT names a presenter. Otherwise plans and summaries are log lines only.
pub fn envelope_requested() -> bool {
    let env_format = env::var("JOBS_OUTPUT_FORMAT").ok();
    wants_envelope(json_mode(), env_format.as_deref())
}

pub fn wants_envelope(json_flag: bool, format: Option<&str>) -> bool {
    json_flag || format.is_some_and(|f| f.eq_ignore_ascii_case("json") || f.eq_ignore_ascii_case("text"))
}
