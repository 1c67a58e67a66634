//! Per-run counters reported at the end of a sync.

use std::fmt;

/// Counters for one run. `failed` only moves when the run keeps going past
/// row failures; such a row may already have been counted as found or
/// notfound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub contacts: usize,
    pub noemail: usize,
    pub found: usize,
    pub notfound: usize,
    pub failed: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> [(&'static str, usize); 5] {
        [
            ("contacts", self.contacts),
            ("noemail", self.noemail),
            ("found", self.found),
            ("notfound", self.notfound),
            ("failed", self.failed),
        ]
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .counters()
            .iter()
            .map(|(name, count)| format!("{name}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&rendered)
    }
}
