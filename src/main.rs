use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("finance_ledger=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = finance_ledger::app::run(std::env::args()) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
