use crate::{
    common::error::{EntityKind, LedgerError},
    domain::{account::Account, ledger::Ledger},
};

/// Replaces an account's details. The stored balance is kept: balances move
/// only through transactions.
pub fn update(ledger: &mut Ledger, account: Account) -> Result<(), LedgerError> {
    let stored = ledger
        .accounts
        .get_mut(&account.id)
        .ok_or_else(|| LedgerError::not_found(EntityKind::Account, &account.id))?;
    *stored = Account {
        balance: stored.balance,
        ..account
    };
    Ok(())
}

pub fn delete(ledger: &mut Ledger, id: &str) -> Result<(), LedgerError> {
    if !ledger.accounts.contains_key(id) {
        return Err(LedgerError::not_found(EntityKind::Account, id));
    }
    if ledger.is_account_referenced(id) {
        return Err(LedgerError::AccountInUse(id.to_string()));
    }
    ledger.accounts.remove(id);
    Ok(())
}
