use crate::{
    common::error::{EntityKind, LedgerError},
    domain::{
        ledger::Ledger,
        transaction::{Settlement, Transaction, TxKind},
    },
    worker::{
        effects::{Direction, apply_effects, directed_effects},
        settlement,
    },
};

pub fn handle(ledger: &mut Ledger, tx: Transaction) -> Result<(), LedgerError> {
    validate(ledger, &tx)?;

    apply_effects(
        &mut ledger.accounts,
        &directed_effects(&tx, Direction::Apply),
    )?;
    if let Some(link) = &tx.settlement {
        settlement::propagate(ledger, link, Direction::Apply);
    }
    ledger.transactions.push(tx);
    Ok(())
}

fn validate(ledger: &Ledger, tx: &Transaction) -> Result<(), LedgerError> {
    if tx.id.trim().is_empty() {
        return Err(LedgerError::Validation("transaction id is empty".into()));
    }
    if ledger.transaction(&tx.id).is_some() {
        return Err(LedgerError::duplicate(EntityKind::Transaction, &tx.id));
    }
    if !tx.amount.is_positive() {
        return Err(LedgerError::Validation(format!(
            "amount must be positive, got {}",
            tx.amount
        )));
    }
    if let TxKind::Transfer {
        from_account_id,
        to_account_id,
    } = &tx.kind
    {
        if from_account_id == to_account_id {
            return Err(LedgerError::Validation(format!(
                "transfer from and to the same account \"{from_account_id}\""
            )));
        }
    }
    // Effects on a missing account would be dropped, leaving its balance
    // out of step with the log should the id be created later.
    for account_id in tx.account_ids() {
        if ledger.account(account_id).is_none() {
            return Err(LedgerError::Validation(format!(
                "unknown account \"{account_id}\""
            )));
        }
    }
    match &tx.settlement {
        Some(Settlement::Invoice(id)) if ledger.invoice(id).is_none() => Err(
            LedgerError::Validation(format!("unknown invoice \"{id}\"")),
        ),
        Some(Settlement::Bill(id)) if ledger.bill(id).is_none() => {
            Err(LedgerError::Validation(format!("unknown bill \"{id}\"")))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;

    use super::*;
    use crate::{
        common::money::Money,
        domain::{
            account::Account,
            document::DocumentStatus,
            invoice::Invoice,
            transaction::{IncomeSubtype, LoanSubtype},
        },
    };

    // Helper to create Money from a decimal string for tests
    fn money(v: &str) -> Money {
        Money::from_str(v).unwrap()
    }

    fn seed_account(ledger: &mut Ledger, id: &str, balance: &str) {
        ledger
            .accounts
            .insert(id.into(), Account::new(id, id, money(balance)));
    }

    fn tx(id: &str, kind: TxKind, amount: &str) -> Transaction {
        Transaction::new(
            id,
            kind,
            money(amount),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        )
    }

    fn expense(account: &str) -> TxKind {
        TxKind::Expense {
            account_id: account.into(),
        }
    }

    #[test]
    fn expense_debits_account_and_records_tx() {
        let mut ledger = Ledger::new();
        seed_account(&mut ledger, "a", "100");

        handle(&mut ledger, tx("t1", expense("a"), "30")).unwrap();

        assert_eq!(ledger.account("a").unwrap().balance, money("70"));
        let rec = ledger.transaction("t1").expect("tx should be recorded");
        assert_eq!(rec.amount, money("30"));
    }

    #[test]
    fn loan_receive_and_repay_move_balance_both_ways() {
        let mut ledger = Ledger::new();
        seed_account(&mut ledger, "a", "0");

        let receive = TxKind::Loan {
            account_id: "a".into(),
            subtype: LoanSubtype::Receive,
        };
        let repay = TxKind::Loan {
            account_id: "a".into(),
            subtype: LoanSubtype::Repay,
        };
        handle(&mut ledger, tx("t1", receive, "500")).unwrap();
        handle(&mut ledger, tx("t2", repay, "125.5")).unwrap();

        assert_eq!(ledger.account("a").unwrap().balance, money("374.5"));
    }

    #[test]
    fn rejects_non_positive_amount() {
        let mut ledger = Ledger::new();
        seed_account(&mut ledger, "a", "100");

        for amount in ["0", "-5"] {
            let err = handle(&mut ledger, tx("t1", expense("a"), amount)).unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)), "{amount}");
        }
        assert!(ledger.transactions.is_empty());
    }

    #[test]
    fn rejects_transfer_to_same_account() {
        let mut ledger = Ledger::new();
        seed_account(&mut ledger, "a", "100");
        let kind = TxKind::Transfer {
            from_account_id: "a".into(),
            to_account_id: "a".into(),
        };

        let err = handle(&mut ledger, tx("t1", kind, "10")).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_account() {
        let mut ledger = Ledger::new();
        let kind = TxKind::Income {
            account_id: "ghost".into(),
            subtype: IncomeSubtype::Rent,
        };

        let err = handle(&mut ledger, tx("t1", kind, "10")).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Validation("unknown account \"ghost\"".into())
        );
    }

    #[test]
    fn rejects_duplicate_transaction_id() {
        let mut ledger = Ledger::new();
        seed_account(&mut ledger, "a", "100");
        handle(&mut ledger, tx("t1", expense("a"), "10")).unwrap();

        let err = handle(&mut ledger, tx("t1", expense("a"), "10")).unwrap_err();
        assert_eq!(err, LedgerError::duplicate(EntityKind::Transaction, "t1"));
    }

    #[test]
    fn rejects_unknown_settlement_target() {
        let mut ledger = Ledger::new();
        seed_account(&mut ledger, "a", "100");
        let t = tx("t1", expense("a"), "10").settling(Settlement::Bill("b-404".into()));

        let err = handle(&mut ledger, t).unwrap_err();
        assert_eq!(err, LedgerError::Validation("unknown bill \"b-404\"".into()));
    }

    #[test]
    fn settling_income_marks_invoice_paid() {
        let mut ledger = Ledger::new();
        seed_account(&mut ledger, "a", "0");
        ledger.invoices.insert(
            "inv".into(),
            Invoice {
                id: "inv".into(),
                number: "INV-1".into(),
                contact_id: "c1".into(),
                project_id: None,
                amount: money("200"),
                issue_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                due_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
                status: DocumentStatus::Unpaid,
                description: String::new(),
            },
        );
        let kind = TxKind::Income {
            account_id: "a".into(),
            subtype: IncomeSubtype::Installment,
        };

        handle(
            &mut ledger,
            tx("t1", kind, "200").settling(Settlement::Invoice("inv".into())),
        )
        .unwrap();

        assert_eq!(ledger.invoice("inv").unwrap().status, DocumentStatus::Paid);
        assert_eq!(ledger.account("a").unwrap().balance, money("200"));
    }
}
