use clap::Parser;
use presto_cli::config::DEFAULT_CONFIG_PATH;
use presto_cli::OutputFormat;
use std::path::PathBuf;

/// prq - run a query against a Presto coordinator
#[derive(Parser, Debug)]
#[command(name = "prq")]
#[command(version)]
#[command(about = "Command-line query runner for Presto", long_about = None)]
pub struct Cli {
    /// Data source, e.g. presto://user@coordinator:8080/hive/default
    #[arg(value_name = "DATA_SOURCE")]
    pub data_source: String,

    /// SQL to run
    #[arg(
        value_name = "QUERY",
        required_unless_present_any = ["query_file", "show_tables"]
    )]
    pub query: Option<String>,

    /// Read the query from a file
    #[arg(short = 'q', long = "query-file", value_name = "FILE", conflicts_with = "query")]
    pub query_file: Option<PathBuf>,

    /// Output format (default: tabular, or the config file's ui.format)
    #[arg(short = 'o', long = "output")]
    pub output: Option<OutputFormat>,

    /// List the tables of the data source's catalog and schema
    #[arg(long = "show-tables", conflicts_with_all = ["query", "query_file"])]
    pub show_tables: bool,

    /// HTTP request timeout in seconds (0 = no limit)
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(long = "config", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
