use std::sync::Arc;

use crate::{
    common::{
        command::Command,
        error::{LedgerError, PersistenceError},
    },
    domain::ledger::Ledger,
    io::store::Gateway,
    worker::processor::Processor,
};

/// Result of a committed command.
#[derive(Debug)]
pub struct Dispatched {
    pub snapshot: Arc<Ledger>,
    /// Set when the new snapshot is live in memory but could not be saved.
    pub persistence: Option<PersistenceError>,
}

/// Owns the current ledger snapshot and is the only writer to it.
///
/// Commands are processed one at a time. A successful command swaps in the
/// new snapshot and then asks the gateway to save it; a failed save is
/// logged and reported but the in-memory snapshot stays.
pub struct Session<G: Gateway> {
    current: Arc<Ledger>,
    processor: Processor,
    gateway: G,
}

impl<G: Gateway> Session<G> {
    /// Hydrates from the gateway, falling back to `default`. The loaded
    /// snapshot is trusted and becomes the current state as is.
    pub fn open(gateway: G, default: Ledger) -> Self {
        let loaded = gateway.load(default);
        tracing::info!(
            accounts = loaded.accounts.len(),
            transactions = loaded.transactions.len(),
            "ledger loaded"
        );
        Self {
            current: Arc::new(loaded),
            processor: Processor::new(),
            gateway,
        }
    }

    pub fn snapshot(&self) -> Arc<Ledger> {
        Arc::clone(&self.current)
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Dispatched, LedgerError> {
        let name = command.name();
        let next = match self.processor.apply(&self.current, command) {
            Ok(next) => Arc::new(next),
            Err(err) => {
                tracing::warn!(command = name, "command rejected: {err}");
                return Err(err);
            }
        };
        self.current = Arc::clone(&next);
        tracing::debug!(command = name, "command committed");

        let persistence = self.gateway.save(&next).err();
        if let Some(err) = &persistence {
            tracing::warn!(command = name, "ledger not saved: {err}");
        }
        Ok(Dispatched {
            snapshot: next,
            persistence,
        })
    }
}
