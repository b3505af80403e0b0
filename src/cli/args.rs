use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Serve case records and location logs backed by a Google Sheets spreadsheet",
    long_about = "An HTTP service that lists and overwrites case records stored in a Google Sheets tab and appends geocoded addresses to a second tab.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        env = "GOOGLE_CREDENTIALS",
        value_name = "JSON",
        hide_env_values = true,
        help = "Service account key as a JSON blob"
    )]
    pub credentials: String,

    #[arg(
        long = "log-file",
        env = "CASESHEET_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "api-listen",
        env = "CASESHEET_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:3001",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
