use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::IgnoredAny};

use crate::{
    common::{error::EntityKind, money::Money},
    domain::entity::Entity,
};

/// One entry in the transaction log.
///
/// On the wire a transaction is a flat object: `type` picks the kind, and
/// the document it settles is named by `invoiceId` or `billId`. Naming both
/// is rejected, as is a nested `settlement` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    pub id: String,
    pub kind: TxKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: String,
    pub contact_id: Option<String>,
    pub project_id: Option<String>,
    pub category_id: Option<String>,
    pub settlement: Option<Settlement>,
}

/// What the transaction does to accounts. Each kind carries only the
/// account roles it actually uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum TxKind {
    Income {
        account_id: String,
        subtype: IncomeSubtype,
    },
    Expense {
        account_id: String,
    },
    Transfer {
        from_account_id: String,
        to_account_id: String,
    },
    Loan {
        account_id: String,
        subtype: LoanSubtype,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeSubtype {
    Installment,
    Rent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanSubtype {
    #[serde(alias = "Receive Loan")]
    Receive,
    #[serde(alias = "Repay Loan")]
    Repay,
}

/// The invoice or bill a transaction pays off. A transaction settles at
/// most one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Invoice(String),
    Bill(String),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRecord {
    id: String,
    #[serde(flatten)]
    kind: TxKind,
    amount: Money,
    #[serde(with = "crate::common::date")]
    date: NaiveDate,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bill_id: Option<String>,
    #[serde(default, skip_serializing)]
    settlement: Option<IgnoredAny>,
}

/// Empty strings count as "not set".
fn present(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.trim().is_empty())
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = String;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        if record.settlement.is_some() {
            return Err(format!(
                "transaction \"{}\": name the settled document with invoiceId or billId",
                record.id
            ));
        }
        let settlement = match (present(record.invoice_id), present(record.bill_id)) {
            (None, None) => None,
            (Some(invoice), None) => Some(Settlement::Invoice(invoice)),
            (None, Some(bill)) => Some(Settlement::Bill(bill)),
            (Some(_), Some(_)) => {
                return Err(format!(
                    "transaction \"{}\" settles both an invoice and a bill",
                    record.id
                ));
            }
        };
        Ok(Self {
            id: record.id,
            kind: record.kind,
            amount: record.amount,
            date: record.date,
            description: record.description,
            contact_id: present(record.contact_id),
            project_id: present(record.project_id),
            category_id: present(record.category_id),
            settlement,
        })
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(tx: Transaction) -> Self {
        let (invoice_id, bill_id) = match tx.settlement {
            Some(Settlement::Invoice(id)) => (Some(id), None),
            Some(Settlement::Bill(id)) => (None, Some(id)),
            None => (None, None),
        };
        Self {
            id: tx.id,
            kind: tx.kind,
            amount: tx.amount,
            date: tx.date,
            description: tx.description,
            contact_id: tx.contact_id,
            project_id: tx.project_id,
            category_id: tx.category_id,
            invoice_id,
            bill_id,
            settlement: None,
        }
    }
}

impl Transaction {
    pub fn new(id: impl Into<String>, kind: TxKind, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            kind,
            amount,
            date,
            description: String::new(),
            contact_id: None,
            project_id: None,
            category_id: None,
            settlement: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_contact(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn settling(mut self, settlement: Settlement) -> Self {
        self.settlement = Some(settlement);
        self
    }

    /// Accounts this transaction moves money in or out of.
    pub fn account_ids(&self) -> Vec<&str> {
        match &self.kind {
            TxKind::Income { account_id, .. }
            | TxKind::Expense { account_id }
            | TxKind::Loan { account_id, .. } => vec![account_id.as_str()],
            TxKind::Transfer {
                from_account_id,
                to_account_id,
            } => vec![from_account_id.as_str(), to_account_id.as_str()],
        }
    }

    pub fn references_account(&self, account_id: &str) -> bool {
        self.account_ids().contains(&account_id)
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TxKind::Income { .. })
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TxKind::Expense { .. })
    }

    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            TxKind::Income { .. } => "Income",
            TxKind::Expense { .. } => "Expense",
            TxKind::Transfer { .. } => "Transfer",
            TxKind::Loan { .. } => "Loan",
        }
    }

    pub fn subtype_label(&self) -> Option<&'static str> {
        match self.kind {
            TxKind::Income { subtype, .. } => Some(match subtype {
                IncomeSubtype::Installment => "Installment",
                IncomeSubtype::Rent => "Rent",
            }),
            TxKind::Loan { subtype, .. } => Some(match subtype {
                LoanSubtype::Receive => "Receive Loan",
                LoanSubtype::Repay => "Repay Loan",
            }),
            TxKind::Expense { .. } | TxKind::Transfer { .. } => None,
        }
    }
}

impl Entity for Transaction {
    const KIND: EntityKind = EntityKind::Transaction;

    fn id(&self) -> &str {
        &self.id
    }
}
