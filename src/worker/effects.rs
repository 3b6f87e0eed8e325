//! Balance propagation.
//!
//! [`effects`] is the single source of truth for how a transaction moves
//! account balances. Deleting a transaction applies the same effects with
//! every sign flipped, so a delete always lands exactly where the add began.
use std::collections::HashMap;

use crate::{
    common::{error::LedgerError, money::Money},
    domain::{
        account::Account,
        transaction::{LoanSubtype, Transaction, TxKind},
    },
};

/// Whether a transaction is entering or leaving the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Apply,
    Revoke,
}

/// A signed change to one account's balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub account_id: String,
    pub amount: Money,
}

impl Effect {
    fn new(account_id: &str, amount: Money) -> Self {
        Self {
            account_id: account_id.to_string(),
            amount,
        }
    }
}

pub fn effects(tx: &Transaction) -> Vec<Effect> {
    let amount = tx.amount;
    match &tx.kind {
        TxKind::Income { account_id, .. } => vec![Effect::new(account_id, amount)],
        TxKind::Expense { account_id } => vec![Effect::new(account_id, -amount)],
        TxKind::Transfer {
            from_account_id,
            to_account_id,
        } => vec![
            Effect::new(from_account_id, -amount),
            Effect::new(to_account_id, amount),
        ],
        TxKind::Loan {
            account_id,
            subtype: LoanSubtype::Receive,
        } => vec![Effect::new(account_id, amount)],
        TxKind::Loan {
            account_id,
            subtype: LoanSubtype::Repay,
        } => vec![Effect::new(account_id, -amount)],
    }
}

/// Effects for the given direction: as-is for apply, negated for revoke.
pub fn directed_effects(tx: &Transaction, direction: Direction) -> Vec<Effect> {
    let forward = effects(tx);
    match direction {
        Direction::Apply => forward,
        Direction::Revoke => forward
            .into_iter()
            .map(|e| Effect {
                amount: -e.amount,
                ..e
            })
            .collect(),
    }
}

/// Adds each effect to its account's balance. Accounts not named are left
/// alone, as are effects naming an account that does not exist.
///
/// Fails without a usable result if a balance would overflow; callers work
/// on a scratch copy and drop it on error.
pub fn apply_effects(
    accounts: &mut HashMap<String, Account>,
    effects: &[Effect],
) -> Result<(), LedgerError> {
    for effect in effects {
        if let Some(acc) = accounts.get_mut(&effect.account_id) {
            acc.balance = acc.balance.checked_add(effect.amount).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "balance overflow on account \"{}\"",
                    effect.account_id
                ))
            })?;
        }
    }
    Ok(())
}
