//! Preview command - render the invoice in the terminal

use super::{print_errors, InvoiceArgs};
use clap::Args;
use gstinv::core::validate_invoice;
use gstinv::render::{render_text, write_line_rows_csv};
use std::io;

#[derive(Args, Debug)]
pub struct PreviewCommand {
    #[command(flatten)]
    input: InvoiceArgs,

    /// Output the line items as CSV instead of the full preview
    #[arg(long)]
    csv: bool,
}

impl PreviewCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let invoice = self.input.load()?;

        if self.csv {
            write_line_rows_csv(&invoice, io::stdout())?;
            return Ok(());
        }

        let validation = validate_invoice(&invoice);
        if !validation.is_valid {
            print_errors(&validation.messages());
            println!();
        }
        print!("{}", render_text(&invoice));
        Ok(())
    }
}
