use std::io::{BufReader, BufWriter, stdout};

use crate::{
    common::error::AppError,
    domain::ledger::Ledger,
    io::{reader, store::JsonFileGateway, writer},
    worker::session::Session,
};

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 2 {
        return Err(AppError::MissingArg);
    }
    let state_path = &args[1];

    let mut session = Session::open(JsonFileGateway::new(state_path), Ledger::new());

    if let Some(commands_path) = args.get(2) {
        let file = std::fs::File::open(commands_path)?;
        for command in reader::read_commands(BufReader::new(file)) {
            let command = command.map_err(AppError::Parse)?;
            // Rejections are logged by the session; keep going with the rest.
            let _ = session.dispatch(command);
        }
    }

    // After processing all commands, write the account balances to stdout
    let stdout = stdout();
    let writer = BufWriter::new(stdout.lock());
    writer::write_accounts(writer, &session.snapshot())?;

    Ok(())
}
