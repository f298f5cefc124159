//! Print the published OpenAPI document as JSON.

use std::process::ExitCode;

use clap::Parser;
use problem_service::doc::api_document;

/// Dump the OpenAPI document served at `/openapi/v1.json`.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump")]
struct Cli {
    /// Public base URL advertised in the server entry.
    #[arg(long)]
    public_url: Option<String>,
    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let document = api_document(cli.public_url.as_deref());
    let rendered = if cli.pretty {
        document.to_pretty_json()
    } else {
        document.to_json()
    };
    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to serialise OpenAPI document: {e}");
            ExitCode::FAILURE
        }
    }
}
