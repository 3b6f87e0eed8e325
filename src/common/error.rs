use std::fmt;

/// Entity collections held by the ledger, used to qualify lookup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Account,
    Contact,
    Project,
    Category,
    Transaction,
    Invoice,
    Bill,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Account => "account",
            Self::Contact => "contact",
            Self::Project => "project",
            Self::Category => "category",
            Self::Transaction => "transaction",
            Self::Invoice => "invoice",
            Self::Bill => "bill",
        })
    }
}

/// Reasons a command is rejected. The ledger is left untouched in every case.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{kind} \"{id}\" not found")]
    NotFound { kind: EntityKind, id: String },
    #[error("{kind} \"{id}\" already exists")]
    DuplicateId { kind: EntityKind, id: String },
    #[error("account \"{0}\" is referenced by existing transactions")]
    AccountInUse(String),
}

impl LedgerError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn duplicate(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            kind,
            id: id.into(),
        }
    }
}

/// A report total that does not fit in the amount range.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("report total overflows the amount range")]
pub struct TotalOverflow;

/// Failure to write a snapshot. Reported as a warning, never rolled back.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("missing state path. usage: finance-ledger <state.json> [commands.jsonl]")]
    MissingArg,
    #[error("failed to open input file: {0}")]
    OpenInput(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
}
