//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use phonebook_core::Person;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Whether interactive confirmation prompts should be shown
    ///
    /// Quiet mode and non-tty stdin (pipes, scripts) auto-confirm.
    pub fn should_prompt(&self) -> bool {
        !self.is_quiet() && atty::is(atty::Stream::Stdin)
    }

    /// Print a success message (suppressed in quiet and JSON modes)
    pub fn success(&self, message: &str) {
        if matches!(self.format, OutputFormat::Human) {
            println!("{}", message);
        }
    }

    /// Print a single person
    pub fn print_person(&self, person: &Person) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:     {}", person.id);
                println!("Name:   {}", person.name);
                println!("Number: {}", person.number);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(person).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", person.id);
            }
        }
    }

    /// Print a list of persons
    pub fn print_persons(&self, persons: &[Person]) {
        match self.format {
            OutputFormat::Human => {
                if persons.is_empty() {
                    println!("No contacts found.");
                    return;
                }
                for person in persons {
                    println!(
                        "{} | {} | {}",
                        &person.id.to_string()[..8],
                        person.name,
                        person.number
                    );
                }
                println!("\n{} contact(s)", persons.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(persons).unwrap());
            }
            OutputFormat::Quiet => {
                for person in persons {
                    println!("{}", person.id);
                }
            }
        }
    }

    /// Print the /info HTML fragment as plain text
    pub fn print_info(&self, body: &str) {
        let text = body.replace("</p>", "\n").replace("<p>", "");
        print!("{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet wins over json
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_quiet_never_prompts() {
        let output = Output::new(OutputFormat::Quiet);
        assert!(output.is_quiet());
        assert!(!output.should_prompt());
    }
}
