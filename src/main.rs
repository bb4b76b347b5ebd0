use gitwell::workflow::Outcome;
use gitwell::{app, ui};
use std::process::ExitCode;

fn main() -> ExitCode {
    match app::run() {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Aborted(reason)) => {
            ui::print_error(&reason.message());
            ExitCode::FAILURE
        }
        Err(e) => {
            ui::print_error(&format!("Error: {e:#}"));
            ExitCode::FAILURE
        }
    }
}
