use std::io::Write;

use crate::domain::{
    ledger::Ledger,
    report::MonthlySummary,
    transaction::{Transaction, TxKind},
};

#[derive(serde::Serialize)]
/// Internal CSV output row for account balances.
///
/// Headers written (in this order): `id,name,balance`.
struct AccountRow<'a> {
    id: &'a str,
    name: &'a str,
    balance: String,
}

#[derive(serde::Serialize)]
/// One exported transaction. Foreign ids are replaced by names; an id with no
/// matching entity becomes an empty cell.
struct TransactionRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Subtype")]
    subtype: &'static str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Account")]
    account: &'a str,
    #[serde(rename = "From Account")]
    from_account: &'a str,
    #[serde(rename = "To Account")]
    to_account: &'a str,
    #[serde(rename = "Contact")]
    contact: &'a str,
    #[serde(rename = "Project")]
    project: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
}

#[derive(serde::Serialize)]
struct SummaryRow {
    #[serde(rename = "Item")]
    item: &'static str,
    #[serde(rename = "Value")]
    value: String,
}

/// Writes account balances to a CSV writer.
///
/// The output includes a header row: `id,name,balance`.
/// For deterministic output, accounts are sorted by id ascending before writing.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use finance_ledger::common::money::Money;
/// use finance_ledger::domain::{account::Account, ledger::Ledger};
/// use finance_ledger::io::writer::write_accounts;
///
/// let mut ledger = Ledger::new();
/// ledger.accounts.insert("b".into(), Account::new("b", "Bank", Money::zero()));
/// ledger.accounts.insert("a".into(), Account::new("a", "Cash", Money::new(15000)));
///
/// let mut out = Vec::new();
/// write_accounts(&mut out, &ledger).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert_eq!(s, "id,name,balance\na,Cash,1.5000\nb,Bank,0.0000\n");
/// ```
pub fn write_accounts<W: Write>(writer: W, ledger: &Ledger) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    let mut accounts: Vec<_> = ledger.accounts.values().collect();
    accounts.sort_unstable_by(|a, b| a.id.cmp(&b.id));

    for acc in accounts {
        wtr.serialize(AccountRow {
            id: &acc.id,
            name: &acc.name,
            balance: acc.balance.to_string_4dp(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the given transactions as CSV with the columns
/// `Date,Type,Subtype,Description,Amount,Account,From Account,To Account,Contact,Project,Category`.
///
/// Rows are written in the order given. Fields containing a comma, quote or
/// newline are quoted and embedded quotes doubled. An empty list produces
/// empty output.
pub fn write_transactions<'a, W, I>(
    writer: W,
    txs: I,
    ledger: &Ledger,
) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for tx in txs {
        let (account, from_account, to_account) = match &tx.kind {
            TxKind::Income { account_id, .. }
            | TxKind::Expense { account_id }
            | TxKind::Loan { account_id, .. } => (ledger.account_name(account_id), None, None),
            TxKind::Transfer {
                from_account_id,
                to_account_id,
            } => (
                None,
                ledger.account_name(from_account_id),
                ledger.account_name(to_account_id),
            ),
        };
        wtr.serialize(TransactionRow {
            date: tx.date.format("%Y-%m-%d").to_string(),
            kind: tx.kind_label(),
            subtype: tx.subtype_label().unwrap_or(""),
            description: &tx.description,
            amount: tx.amount.to_string_4dp(),
            account: or_blank(account),
            from_account: or_blank(from_account),
            to_account: or_blank(to_account),
            contact: or_blank(tx.contact_id.as_deref().and_then(|id| ledger.contact_name(id))),
            project: or_blank(tx.project_id.as_deref().and_then(|id| ledger.project_name(id))),
            category: or_blank(
                tx.category_id
                    .as_deref()
                    .and_then(|id| ledger.category_name(id)),
            ),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn or_blank(found: Option<&str>) -> &str {
    found.unwrap_or("")
}

/// Writes a monthly summary as `Item,Value` rows: Month, Total Income,
/// Total Expense, Net Balance.
pub fn write_summary<W: Write>(writer: W, summary: &MonthlySummary) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    let rows = [
        ("Month", summary.month.clone()),
        ("Total Income", summary.total_income.to_string_4dp()),
        ("Total Expense", summary.total_expense.to_string_4dp()),
        ("Net Balance", summary.net_balance.to_string_4dp()),
    ];
    for (item, value) in rows {
        wtr.serialize(SummaryRow { item, value })?;
    }
    wtr.flush()?;
    Ok(())
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
            directory::{Category, CategoryKind, Contact, ContactKind, Project},
            transaction::{IncomeSubtype, LoanSubtype},
        },
    };

    fn money(v: &str) -> Money {
        Money::from_str(v).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    // Helper: exports transactions to a String.
    fn export(txs: &[Transaction], ledger: &Ledger) -> String {
        let mut out = Vec::new();
        write_transactions(&mut out, txs, ledger).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .accounts
            .insert("a".into(), Account::new("a", "Cash", Money::zero()));
        ledger
            .accounts
            .insert("b".into(), Account::new("b", "Bank, Main", Money::zero()));
        ledger.contacts.insert(
            "c1".into(),
            Contact {
                id: "c1".into(),
                name: "Jane \"JJ\" Doe".into(),
                kind: ContactKind::Tenant,
            },
        );
        ledger.projects.insert(
            "p1".into(),
            Project {
                id: "p1".into(),
                name: "Flat 1".into(),
            },
        );
        ledger.categories.insert(
            "cat".into(),
            Category {
                id: "cat".into(),
                name: "Rent".into(),
                kind: CategoryKind::Income,
            },
        );
        ledger
    }

    #[test]
    fn writes_header_and_resolves_names() {
        let tx = Transaction::new(
            "t1",
            TxKind::Income {
                account_id: "a".into(),
                subtype: IncomeSubtype::Rent,
            },
            money("1200"),
            day(),
        )
        .with_description("March rent")
        .with_contact("c1")
        .with_project("p1")
        .with_category("cat");

        let s = export(&[tx], &ledger());
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Type,Subtype,Description,Amount,Account,From Account,To Account,Contact,Project,Category"
        );
        assert_eq!(
            lines[1],
            r#"2024-03-05,Income,Rent,March rent,1200.0000,Cash,,,"Jane ""JJ"" Doe",Flat 1,Rent"#
        );
    }

    #[test]
    fn transfer_fills_from_and_to_and_quotes_commas() {
        let tx = Transaction::new(
            "t1",
            TxKind::Transfer {
                from_account_id: "a".into(),
                to_account_id: "b".into(),
            },
            money("20"),
            day(),
        );

        let s = export(&[tx], &ledger());
        assert_eq!(
            s.lines().nth(1).unwrap(),
            r#"2024-03-05,Transfer,,,20.0000,,Cash,"Bank, Main",,,"#
        );
    }

    #[test]
    fn unknown_ids_export_as_empty() {
        let tx = Transaction::new(
            "t1",
            TxKind::Loan {
                account_id: "gone".into(),
                subtype: LoanSubtype::Receive,
            },
            money("5"),
            day(),
        )
        .with_project("deleted");

        let s = export(&[tx], &ledger());
        assert_eq!(
            s.lines().nth(1).unwrap(),
            "2024-03-05,Loan,Receive Loan,,5.0000,,,,,,"
        );
    }

    #[test]
    fn empty_export_is_empty() {
        assert_eq!(export(&[], &ledger()), "");
    }

    #[test]
    fn summary_writes_one_row_per_field() {
        let summary = MonthlySummary {
            month: "March 2024".into(),
            total_income: money("100"),
            total_expense: money("30"),
            net_balance: money("70"),
        };
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Item,Value\nMonth,March 2024\nTotal Income,100.0000\nTotal Expense,30.0000\nNet Balance,70.0000\n"
        );
    }

    #[test]
    fn accounts_sorted_by_id() {
        let mut out = Vec::new();
        write_accounts(&mut out, &ledger()).unwrap();
        let s = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 3, "expected header + 2 rows");
        assert_eq!(lines[1], "a,Cash,0.0000");
        assert_eq!(lines[2], r#"b,"Bank, Main",0.0000"#);
    }
}
