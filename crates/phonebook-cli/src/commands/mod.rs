//! Command handlers

pub mod person;
pub mod serve;

use anyhow::Result;
use std::io::Write;

/// Ask a yes/no question on the terminal; default is no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
