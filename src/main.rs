//! Stockroom - interactive inventory tracker

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = stockroom::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
