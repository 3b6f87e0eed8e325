use std::io::BufRead;

use crate::common::command::Command;

/// Reads commands from a JSON-lines source, one command object per line.
///
/// Each line looks like `{"command": "<Name>", "payload": ...}`. Blank lines
/// are skipped. Errors carry the 1-based line number.
///
/// # Examples
///
/// ```
/// use finance_ledger::common::command::Command;
/// use finance_ledger::io::reader::read_commands;
///
/// let data = r#"{"command":"AddAccount","payload":{"id":"a","name":"Cash","balance":"100"}}
///
/// {"command":"DeleteAccount","payload":"a"}
/// "#;
/// let commands: Vec<_> = read_commands(data.as_bytes()).collect();
///
/// assert_eq!(commands.len(), 2);
/// assert!(matches!(commands[0], Ok(Command::AddAccount(_))));
/// assert!(matches!(&commands[1], Ok(Command::DeleteAccount(id)) if id == "a"));
/// ```
pub fn read_commands<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Command, String>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line_no = idx + 1;
            match line {
                Ok(text) if text.trim().is_empty() => None,
                Ok(text) => Some(
                    serde_json::from_str::<Command>(&text)
                        .map_err(|e| format!("line {line_no}: {e}")),
                ),
                Err(e) => Some(Err(format!("line {line_no}: {e}"))),
            }
        })
}
