//! Export command - write the invoice as a self-contained HTML page
//!
//! Without `--output` the page is written to the temp directory and opened
//! in the default browser.

use super::{print_errors, InvoiceArgs};
use clap::Args;
use gstinv::core::validate_invoice;
use gstinv::render::render_html;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportCommand {
    #[command(flatten)]
    input: InvoiceArgs,

    /// Output file path (default: opens in browser)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let invoice = self.input.load()?;

        let validation = validate_invoice(&invoice);
        if !validation.is_valid {
            print_errors(&validation.messages());
            anyhow::bail!(
                "Invoice {} has {} error(s), not exporting",
                invoice.number,
                validation.errors.len()
            );
        }

        let html = render_html(&invoice);
        log::info!("Rendered invoice {} ({} bytes)", invoice.number, html.len());

        if let Some(ref output_path) = self.output {
            std::fs::write(output_path, &html)?;
            println!("Invoice written to: {}", output_path.display());
        } else {
            let temp_path = std::env::temp_dir().join(file_name(&invoice.number));
            std::fs::write(&temp_path, &html)?;
            opener::open(&temp_path)?;
            println!("Opened invoice in browser: {}", temp_path.display());
        }

        Ok(())
    }
}

/// File name for an exported invoice, keeping only path-safe characters
fn file_name(number: &str) -> String {
    let safe: String = number
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("invoice-{safe}.html")
}
