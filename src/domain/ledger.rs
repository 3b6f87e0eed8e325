use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    account::Account,
    bill::Bill,
    directory::{Category, Contact, Project},
    invoice::Invoice,
    transaction::Transaction,
};

/// The entity store: one id-keyed collection per entity kind, plus the
/// transaction log kept in the order transactions were added.
///
/// A `Ledger` value is a snapshot. The processor never edits the snapshot
/// it was handed; it builds the next one and returns it whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    #[serde(with = "entity_list")]
    pub accounts: HashMap<String, Account>,
    #[serde(with = "entity_list")]
    pub contacts: HashMap<String, Contact>,
    #[serde(with = "entity_list")]
    pub projects: HashMap<String, Project>,
    #[serde(with = "entity_list")]
    pub categories: HashMap<String, Category>,
    pub transactions: Vec<Transaction>,
    #[serde(with = "entity_list")]
    pub invoices: HashMap<String, Invoice>,
    #[serde(with = "entity_list")]
    pub bills: HashMap<String, Bill>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> &HashMap<String, Account> {
        &self.accounts
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn invoice(&self, id: &str) -> Option<&Invoice> {
        self.invoices.get(id)
    }

    pub fn bill(&self, id: &str) -> Option<&Bill> {
        self.bills.get(id)
    }

    pub fn is_account_referenced(&self, account_id: &str) -> bool {
        self.transactions
            .iter()
            .any(|tx| tx.references_account(account_id))
    }

    pub fn account_name(&self, id: &str) -> Option<&str> {
        self.accounts.get(id).map(|a| a.name.as_str())
    }

    pub fn contact_name(&self, id: &str) -> Option<&str> {
        self.contacts.get(id).map(|c| c.name.as_str())
    }

    pub fn project_name(&self, id: &str) -> Option<&str> {
        self.projects.get(id).map(|p| p.name.as_str())
    }

    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.categories.get(id).map(|c| c.name.as_str())
    }
}

/// Persists an id-keyed map as a list sorted by id, and rebuilds the map from
/// a list on load.
mod entity_list {
    use std::collections::HashMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::domain::entity::Entity;

    pub fn serialize<S, T>(map: &HashMap<String, T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        let mut rows: Vec<(&String, &T)> = map.iter().collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
        serializer.collect_seq(rows.into_iter().map(|(_, v)| v))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<HashMap<String, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Entity,
    {
        let rows = Vec::<T>::deserialize(deserializer)?;
        Ok(rows
            .into_iter()
            .map(|row| (row.id().to_string(), row))
            .collect())
    }
}
