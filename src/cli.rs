pub mod command;
pub mod run;

pub use run::run_app;

use crate::errors::AppError;
use std::io::{self, BufRead, Write};

pub fn confirm_action(action: &str) -> Result<(), AppError> {
    println!("\nAre you sure you want to {}? (y/n)", action);
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

pub fn read_consent(input: &mut impl BufRead) -> Result<bool, AppError> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
