//! Read-only projections over a ledger snapshot.
//!
//! Nothing here mutates the ledger; these feed exports and dashboards.
//! Every total is accumulated with checked arithmetic, so a ledger whose
//! sums leave the amount range yields [`TotalOverflow`] instead of a panic.
use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::{
    common::{error::TotalOverflow, money::Money},
    domain::{ledger::Ledger, transaction::Transaction},
    worker::effects::effects,
};

/// Income/expense totals for a set of transactions. Transfers and loans are
/// movements of existing money and are not counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub month: String,
    pub total_income: Money,
    pub total_expense: Money,
    pub net_balance: Money,
}

impl MonthlySummary {
    pub fn from_transactions<'a, I>(month: impl Into<String>, txs: I) -> Result<Self, TotalOverflow>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (total_income, total_expense) = income_and_expense(txs)?;
        Ok(Self {
            month: month.into(),
            total_income,
            total_expense,
            net_balance: total_income
                .checked_sub(total_expense)
                .ok_or(TotalOverflow)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTotals {
    pub project_id: String,
    pub name: String,
    pub income: Money,
    pub expense: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTotals {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expense: Money,
}

/// Adds one transaction to a running (income, expense) pair.
fn tally(totals: (Money, Money), tx: &Transaction) -> Result<(Money, Money), TotalOverflow> {
    let (income, expense) = totals;
    if tx.is_income() {
        Ok((income.checked_add(tx.amount).ok_or(TotalOverflow)?, expense))
    } else if tx.is_expense() {
        Ok((income, expense.checked_add(tx.amount).ok_or(TotalOverflow)?))
    } else {
        Ok(totals)
    }
}

fn income_and_expense<'a, I>(txs: I) -> Result<(Money, Money), TotalOverflow>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    txs.into_iter()
        .try_fold((Money::zero(), Money::zero()), tally)
}

/// Transactions dated within the given calendar month, newest first. Ties
/// on date are broken by id so the order is stable.
pub fn transactions_in_month(ledger: &Ledger, year: i32, month: u32) -> Vec<&Transaction> {
    let mut txs: Vec<&Transaction> = ledger
        .transactions
        .iter()
        .filter(|tx| tx.date.year() == year && tx.date.month() == month)
        .collect();
    txs.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    txs
}

/// Summary for one calendar month, labelled like "March 2024".
pub fn monthly_summary(
    ledger: &Ledger,
    year: i32,
    month: u32,
) -> Result<MonthlySummary, TotalOverflow> {
    let label = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"));
    MonthlySummary::from_transactions(label, transactions_in_month(ledger, year, month))
}

pub fn total_balance(ledger: &Ledger) -> Result<Money, TotalOverflow> {
    Money::checked_sum(ledger.accounts.values().map(|a| a.balance)).ok_or(TotalOverflow)
}

/// Income and expense per project, ordered by project name.
pub fn project_totals(ledger: &Ledger) -> Result<Vec<ProjectTotals>, TotalOverflow> {
    let mut rows = ledger
        .projects
        .values()
        .map(|project| {
            let (income, expense) = income_and_expense(
                ledger
                    .transactions
                    .iter()
                    .filter(|tx| tx.project_id.as_deref() == Some(project.id.as_str())),
            )?;
            Ok(ProjectTotals {
                project_id: project.id.clone(),
                name: project.name.clone(),
                income,
                expense,
            })
        })
        .collect::<Result<Vec<_>, TotalOverflow>>()?;
    rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.project_id.cmp(&b.project_id)));
    Ok(rows)
}

/// Income and expense per calendar month, newest month first.
pub fn monthly_totals(ledger: &Ledger) -> Result<Vec<MonthTotals>, TotalOverflow> {
    let mut months: BTreeMap<(i32, u32), (Money, Money)> = BTreeMap::new();
    for tx in &ledger.transactions {
        let entry = months
            .entry((tx.date.year(), tx.date.month()))
            .or_insert((Money::zero(), Money::zero()));
        *entry = tally(*entry, tx)?;
    }
    Ok(months
        .into_iter()
        .rev()
        .map(|((year, month), (income, expense))| MonthTotals {
            year,
            month,
            income,
            expense,
        })
        .collect())
}

/// Rebuilds every account balance from opening balances and the full
/// transaction log, without looking at the cached balances.
///
/// Accounts missing from `opening` start at zero.
pub fn recompute_balances(
    ledger: &Ledger,
    opening: &HashMap<String, Money>,
) -> Result<HashMap<String, Money>, TotalOverflow> {
    let mut balances: HashMap<String, Money> = ledger
        .accounts
        .keys()
        .map(|id| (id.clone(), opening.get(id).copied().unwrap_or_default()))
        .collect();
    for tx in &ledger.transactions {
        for effect in effects(tx) {
            if let Some(balance) = balances.get_mut(&effect.account_id) {
                *balance = balance.checked_add(effect.amount).ok_or(TotalOverflow)?;
            }
        }
    }
    Ok(balances)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::domain::{
        account::Account,
        directory::Project,
        transaction::{IncomeSubtype, TxKind},
    };

    fn money(v: &str) -> Money {
        Money::from_str(v).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(id: &str, amount: &str, date: NaiveDate) -> Transaction {
        Transaction::new(
            id,
            TxKind::Income {
                account_id: "a".into(),
                subtype: IncomeSubtype::Rent,
            },
            money(amount),
            date,
        )
    }

    fn expense(id: &str, amount: &str, date: NaiveDate) -> Transaction {
        Transaction::new(
            id,
            TxKind::Expense {
                account_id: "a".into(),
            },
            money(amount),
            date,
        )
    }

    fn transfer(id: &str, amount: &str, date: NaiveDate) -> Transaction {
        Transaction::new(
            id,
            TxKind::Transfer {
                from_account_id: "a".into(),
                to_account_id: "b".into(),
            },
            money(amount),
            date,
        )
    }

    fn ledger_with(txs: Vec<Transaction>) -> Ledger {
        let mut ledger = Ledger::new();
        for tx in txs {
            ledger.transactions.push(tx);
        }
        ledger
    }

    #[test]
    fn month_filter_sorts_newest_first_and_skips_other_months() {
        let ledger = ledger_with(vec![
            income("t1", "10", day(2024, 3, 2)),
            expense("t2", "5", day(2024, 3, 20)),
            income("t3", "7", day(2024, 4, 1)),
        ]);

        let ids: Vec<&str> = transactions_in_month(&ledger, 2024, 3)
            .iter()
            .map(|tx| tx.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }

    #[test]
    fn summary_ignores_transfers() {
        let ledger = ledger_with(vec![
            income("t1", "100", day(2024, 3, 2)),
            expense("t2", "30.5", day(2024, 3, 3)),
            transfer("t3", "1000", day(2024, 3, 4)),
        ]);

        let summary = monthly_summary(&ledger, 2024, 3).unwrap();
        assert_eq!(summary.month, "March 2024");
        assert_eq!(summary.total_income, money("100"));
        assert_eq!(summary.total_expense, money("30.5"));
        assert_eq!(summary.net_balance, money("69.5"));
    }

    #[test]
    fn project_totals_only_count_tagged_transactions() {
        let mut ledger = ledger_with(vec![
            income("t1", "100", day(2024, 3, 2)).with_project("p1"),
            expense("t2", "40", day(2024, 3, 3)).with_project("p1"),
            expense("t3", "15", day(2024, 3, 3)),
        ]);
        ledger.projects.insert(
            "p1".into(),
            Project {
                id: "p1".into(),
                name: "Flat 1".into(),
            },
        );

        let totals = project_totals(&ledger).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].income, money("100"));
        assert_eq!(totals[0].expense, money("40"));
    }

    #[test]
    fn monthly_totals_newest_first() {
        let ledger = ledger_with(vec![
            income("t1", "10", day(2024, 1, 5)),
            expense("t2", "4", day(2024, 2, 5)),
            income("t3", "1", day(2023, 12, 31)),
        ]);

        let months: Vec<(i32, u32)> = monthly_totals(&ledger)
            .unwrap()
            .iter()
            .map(|m| (m.year, m.month))
            .collect();
        assert_eq!(months, vec![(2024, 2), (2024, 1), (2023, 12)]);
    }

    #[test]
    fn total_balance_sums_accounts() {
        let mut ledger = Ledger::new();
        ledger
            .accounts
            .insert("a".into(), Account::new("a", "Cash", money("10.25")));
        ledger
            .accounts
            .insert("b".into(), Account::new("b", "Bank", money("-0.25")));
        assert_eq!(total_balance(&ledger), Ok(money("10")));
    }

    #[test]
    fn recompute_applies_every_transaction_once() {
        let mut ledger = ledger_with(vec![
            income("t1", "10", day(2024, 1, 5)),
            transfer("t2", "4", day(2024, 2, 5)),
        ]);
        for id in ["a", "b"] {
            ledger
                .accounts
                .insert(id.into(), Account::new(id, id, Money::zero()));
        }

        let opening = HashMap::from([("a".to_string(), money("1"))]);
        let balances = recompute_balances(&ledger, &opening).unwrap();
        assert_eq!(balances["a"], money("7"));
        assert_eq!(balances["b"], money("4"));
    }

    #[test]
    fn totals_report_overflow_instead_of_wrapping() {
        let big = "500000000000000";
        let mut ledger = ledger_with(vec![
            income("t1", big, day(2024, 3, 1)),
            income("t2", big, day(2024, 3, 2)),
        ]);
        for id in ["a", "b"] {
            ledger
                .accounts
                .insert(id.into(), Account::new(id, id, money(big)));
        }

        assert_eq!(total_balance(&ledger), Err(TotalOverflow));
        assert_eq!(monthly_summary(&ledger, 2024, 3), Err(TotalOverflow));
        assert_eq!(monthly_totals(&ledger), Err(TotalOverflow));
        assert_eq!(
            recompute_balances(&ledger, &HashMap::new()),
            Err(TotalOverflow)
        );
    }

    #[test]
    fn net_balance_overflow_is_reported() {
        let ledger = ledger_with(vec![
            income("t1", "900000000000000", day(2024, 3, 1)),
            expense("t2", "-900000000000000", day(2024, 3, 2)),
        ]);
        assert_eq!(monthly_summary(&ledger, 2024, 3), Err(TotalOverflow));
    }
}
