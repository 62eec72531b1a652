use std::{env, fs::File, path::Path};

use tracing_subscriber::EnvFilter;

use bank_accounts::{
    dlq::StdErrDLQ, engine::Engine, ingestion::CsvReader, output_repository::CsvOutput,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();
    let file_path = args
        .nth(1)
        .ok_or("usage: bank_accounts <operations.csv>")?;
    let file = File::open(Path::new(&file_path))?;

    let ingestion = CsvReader::new(file);
    let output = CsvOutput::stdout();
    let dlq = StdErrDLQ::default();

    let mut engine = Engine::new(ingestion, output, dlq);
    engine.process().await?;
    engine.flush()?;

    Ok(())
}
