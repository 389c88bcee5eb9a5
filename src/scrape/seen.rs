use std::collections::HashSet;
use std::sync::Mutex;

/// Dedup keys already emitted by any task in this run.
#[derive(Debug, Default)]
pub struct SeenLinks {
    keys: Mutex<HashSet<String>>,
}

impl SeenLinks {
    /// True the first time `key` is offered.
    pub fn insert(&self, key: String) -> bool {
        let mut keys = match self.keys.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        keys.insert(key)
    }

    pub fn len(&self) -> usize {
        match self.keys.lock() {
            Ok(g) => g.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}
