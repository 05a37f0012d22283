//! Validate command - report every problem with an invoice in one pass

use super::InvoiceArgs;
use clap::Args;
use gstinv::core::{validate_invoice, ValidationResult};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    input: InvoiceArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput<'a> {
    number: &'a str,
    error_count: usize,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let invoice = self.input.load()?;
        let result = validate_invoice(&invoice);

        if self.json {
            let output = ValidationOutput {
                number: &invoice.number,
                error_count: result.errors.len(),
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_text(&invoice.number, &result);
        }

        // Exit with code 1 if issues found
        if !result.is_valid {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, number: &str, result: &ValidationResult) {
        println!();
        println!("VALIDATION RESULTS ({})", number);
        println!();

        if result.is_valid {
            println!("\u{2713} No issues found.");
        } else {
            println!("\u{26A0} {} issue(s) found:", result.errors.len());
            println!();
            for (i, message) in result.messages().iter().enumerate() {
                println!("  {}. {}", i + 1, message);
            }
        }
    }
}
