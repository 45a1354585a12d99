//! prq - command-line query runner for Presto
//!
//! # Usage
//!
//! ```bash
//! # Run a query, aligned columns
//! prq presto://alice@coordinator:8080/hive/default "SELECT * FROM page_views LIMIT 10"
//!
//! # Query from a file, tab-separated output
//! prq -q report.sql -o tsv presto://coordinator/hive/web
//!
//! # List tables
//! prq --show-tables presto://coordinator/tpch/tiny
//! ```

use clap::Parser;
use std::io;

use presto_cli::{CLIConfiguration, CLIError, CLISession, Result};

mod args;

use args::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env).try_init();

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = CLIConfiguration::load(&cli.config)?;
    let format = cli.output.unwrap_or_else(|| config.resolved_format());
    let timeouts = config.to_timeouts(cli.timeout);

    let mut session = CLISession::new(&cli.data_source, format, timeouts)?;
    let mut stdout = io::stdout().lock();

    if cli.show_tables {
        return session.show_tables(&mut stdout).await;
    }

    let query = match (cli.query_file, cli.query) {
        (Some(file), _) => std::fs::read_to_string(&file).map_err(|e| {
            CLIError::FileError(format!("failed to read query {}: {}", file.display(), e))
        })?,
        (None, Some(query)) => query,
        (None, None) => return Err(CLIError::UsageError("missing required query argument".into())),
    };

    session.execute(&query, &mut stdout).await
}
