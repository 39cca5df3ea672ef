mod cli;
mod infra;
mod report;

use loan_checklist::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
