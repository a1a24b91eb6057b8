use crate::config::StressTable;
use crate::rng::SessionRng;
use crate::state::EventLog;
use crate::stress::{StressEvent, StressLedger};

/// Mutable session services threaded through combat resolution.
pub struct ResolveContext<'a> {
    pub stress: &'a mut StressLedger,
    pub rng: &'a mut SessionRng,
    pub log: &'a mut EventLog,
    pub table: &'a StressTable,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        stress: &'a mut StressLedger,
        rng: &'a mut SessionRng,
        log: &'a mut EventLog,
        table: &'a StressTable,
    ) -> Self {
        Self {
            stress,
            rng,
            log,
            table,
        }
    }

    pub fn record(&mut self, event: StressEvent) -> i64 {
        self.stress.record(event, self.table)
    }
}
