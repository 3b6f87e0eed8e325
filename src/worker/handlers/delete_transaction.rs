use crate::{
    common::error::{EntityKind, LedgerError},
    domain::ledger::Ledger,
    worker::{
        effects::{Direction, apply_effects, directed_effects},
        settlement,
    },
};

pub fn handle(ledger: &mut Ledger, id: &str) -> Result<(), LedgerError> {
    let position = ledger
        .transactions
        .iter()
        .position(|tx| tx.id == id)
        .ok_or_else(|| LedgerError::not_found(EntityKind::Transaction, id))?;
    let tx = ledger.transactions.remove(position);

    apply_effects(
        &mut ledger.accounts,
        &directed_effects(&tx, Direction::Revoke),
    )?;
    if let Some(link) = &tx.settlement {
        settlement::propagate(ledger, link, Direction::Revoke);
    }
    Ok(())
}
