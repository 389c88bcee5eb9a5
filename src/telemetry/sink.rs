use std::sync::{Arc, Mutex, OnceLock};

use anyhow::Result;

use crate::output::config::OutputConfig;
use crate::output::presenter::Emitter;
use crate::output::types::Envelope;

pub trait OutputSink: Send + Sync {
    fn on_plan(&self, env: &Envelope) -> Result<()>;
    fn on_result(&self, env: &Envelope) -> Result<()>;
}

#[derive(Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn on_plan(&self, env: &Envelope) -> Result<()> {
        emit_to_stdout(env)
    }

    fn on_result(&self, env: &Envelope) -> Result<()> {
        emit_to_stdout(env)
    }
}

fn emit_to_stdout(env: &Envelope) -> Result<()> {
    let cfg = OutputConfig::from_env();
    let emitter = Emitter::from_config(cfg);
    emitter.emit(env).map_err(anyhow::Error::from)
}

type DynSink = Arc<dyn OutputSink>;

fn sink_slot() -> &'static Mutex<DynSink> {
    static SINK: OnceLock<Mutex<DynSink>> = OnceLock::new();
    SINK.get_or_init(|| Mutex::new(Arc::new(StdoutSink) as DynSink))
}

pub fn current_sink() -> DynSink {
    match sink_slot().lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Restores the previous sink when dropped.
pub struct SinkGuard {
    previous: DynSink,
}

pub fn install_sink(new_sink: DynSink) -> SinkGuard {
    let mut guard = match sink_slot().lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    };
    let previous = guard.clone();
    *guard = new_sink;
    SinkGuard { previous }
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        let mut guard = match sink_slot().lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = self.previous.clone();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Collects envelopes instead of printing them.
    #[derive(Default)]
    pub struct CaptureSink {
        pub envelopes: Mutex<Vec<Envelope>>,
    }

    impl OutputSink for CaptureSink {
        fn on_plan(&self, env: &Envelope) -> Result<()> {
            self.envelopes.lock().unwrap().push(env.clone());
            Ok(())
        }

        fn on_result(&self, env: &Envelope) -> Result<()> {
            self.envelopes.lock().unwrap().push(env.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CaptureSink;
    use super::*;
    use serde_json::json;

    #[test]
    fn installed_sink_receives_envelopes_until_guard_drops() {
        let capture = Arc::new(CaptureSink::default());
        {
            let _g = install_sink(capture.clone());
            let env = Envelope::result("stats", &json!({"rows": 3}), None).unwrap();
            current_sink().on_result(&env).unwrap();
        }
        let got = capture.envelopes.lock().unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].op, "stats");
        assert!(got[0].apply);
    }
}
