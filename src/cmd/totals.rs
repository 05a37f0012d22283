//! Totals command - subtotal, GST and total for an invoice

use super::InvoiceArgs;
use clap::Args;
use gstinv::core::format_aud;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct TotalsCommand {
    #[command(flatten)]
    input: InvoiceArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TotalsOutput {
    number: String,
    is_tax_invoice: bool,
    subtotal: String,
    gst_amount: String,
    total: String,
}

impl TotalsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let invoice = self.input.load()?;
        let calc = invoice.calculations();

        if self.json {
            let output = TotalsOutput {
                number: invoice.number.clone(),
                is_tax_invoice: invoice.is_tax_invoice(),
                subtotal: calc.subtotal.to_string(),
                gst_amount: calc.gst_amount.to_string(),
                total: calc.total.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{} {}", invoice.title(), invoice.number);
            println!("  Subtotal:    {:>14}", format_aud(calc.subtotal));
            println!("  GST (10%):   {:>14}", format_aud(calc.gst_amount));
            println!("  Total (AUD): {:>14}", format_aud(calc.total));
        }
        Ok(())
    }
}
