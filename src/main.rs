//! Goal Review - weekly goals review for todo.txt users

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = goal_review::cli::run() {
        eprintln!("Error: {:#}", e);
        eprintln!("{}", goal_review::cli::USAGE);
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
