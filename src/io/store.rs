//! Snapshot persistence.
//!
//! A [`Gateway`] loads the whole ledger once at startup and is asked to save
//! it after every committed command. Loading never fails: a missing or
//! unreadable store falls back to the default the caller provides. An
//! unreadable store is never overwritten. Saving is best-effort and its
//! errors are the caller's to report.
use std::{
    cell::{Cell, RefCell},
    fs,
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{common::error::PersistenceError, domain::ledger::Ledger};

pub trait Gateway {
    fn load(&self, default: Ledger) -> Ledger;

    fn save(&self, ledger: &Ledger) -> Result<(), PersistenceError>;
}

/// Stores the ledger as a single pretty-printed JSON document.
///
/// A file that exists but cannot be loaded is renamed to `<path>.corrupt`
/// before the session starts fresh. If it cannot be moved, the gateway
/// turns read-only and every save fails instead of replacing it.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
    read_only: Cell<bool>,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: Cell::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unloadable snapshot is moved to.
    pub fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only.get()
    }

    fn set_aside(&self, err: &PersistenceError) {
        let aside = self.corrupt_path();
        match fs::rename(&self.path, &aside) {
            Ok(()) => tracing::warn!(
                "could not load ledger from {}: {err}; moved it to {} and starting fresh",
                self.path.display(),
                aside.display()
            ),
            Err(move_err) => {
                self.read_only.set(true);
                tracing::error!(
                    "could not load ledger from {}: {err}; could not move it aside \
                     ({move_err}); starting fresh with saving disabled",
                    self.path.display()
                );
            }
        }
    }

    fn read(&self) -> Result<Option<Ledger>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

impl Gateway for JsonFileGateway {
    fn load(&self, default: Ledger) -> Ledger {
        match self.read() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => {
                tracing::info!("no saved ledger at {}, starting fresh", self.path.display());
                default
            }
            Err(err) => {
                self.set_aside(&err);
                default
            }
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<(), PersistenceError> {
        if self.read_only.get() {
            return Err(PersistenceError::Unavailable(format!(
                "{} holds a ledger that could not be loaded; refusing to overwrite it",
                self.path.display()
            )));
        }
        // Write next to the target and rename so a failed write never
        // truncates the last good snapshot.
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(fs::File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, ledger)?;
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps the last saved snapshot in memory. Can be switched to fail every
/// save, which is how the session's warning path is exercised.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    saved: RefCell<Option<Ledger>>,
    saves: Cell<usize>,
    failing: Cell<bool>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(ledger: Ledger) -> Self {
        Self {
            saved: RefCell::new(Some(ledger)),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn saved(&self) -> Option<Ledger> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Gateway for MemoryGateway {
    fn load(&self, default: Ledger) -> Ledger {
        self.saved.borrow().clone().unwrap_or(default)
    }

    fn save(&self, ledger: &Ledger) -> Result<(), PersistenceError> {
        if self.failing.get() {
            return Err(PersistenceError::Unavailable("memory store set to fail".into()));
        }
        *self.saved.borrow_mut() = Some(ledger.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<G: Gateway + ?Sized> Gateway for &G {
    fn load(&self, default: Ledger) -> Ledger {
        (**self).load(default)
    }

    fn save(&self, ledger: &Ledger) -> Result<(), PersistenceError> {
        (**self).save(ledger)
    }
}
