//! Presentation of assembled invoices.
//!
//! Renderers only format values produced by [`crate::core`]; they never
//! re-derive GST.

pub mod html;
pub mod text;

use crate::core::{format_aud, item_gst, item_total, Invoice, InvoiceItem};
use serde::Serialize;
use tabled::Tabled;

pub use html::render_html;
pub use text::render_text;

pub const GST_FOOTER: &str = "This invoice includes GST where applicable.";
pub const PAYMENT_TERMS: &str = "Payment terms: Net 30 days unless otherwise specified.";

/// Display row for one invoice line
#[derive(Debug, Clone, PartialEq, Eq, Tabled, Serialize)]
pub struct LineRow {
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Qty")]
    pub quantity: String,
    #[tabled(rename = "Unit Price")]
    pub unit_price: String,
    #[tabled(rename = "GST")]
    pub gst: String,
    #[tabled(rename = "Total")]
    pub total: String,
}

impl LineRow {
    fn new(item: &InvoiceItem, invoice: &Invoice) -> Self {
        let mut description = item.description.clone();
        if item.is_gst_free {
            description.push_str(" (GST-Free)");
        }
        LineRow {
            description,
            quantity: item.quantity.normalize().to_string(),
            unit_price: format_aud(item.unit_price),
            gst: format_aud(item_gst(item, &invoice.business)),
            total: format_aud(item_total(item, &invoice.business)),
        }
    }
}

pub fn line_rows(invoice: &Invoice) -> Vec<LineRow> {
    invoice
        .items
        .iter()
        .map(|item| LineRow::new(item, invoice))
        .collect()
}

/// Line rows as CSV with a header row
pub fn write_line_rows_csv<W: std::io::Write>(invoice: &Invoice, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in line_rows(invoice) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Optional contact field with something worth printing
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// GST column and breakdown are only shown for GST-registered businesses
pub fn shows_gst_column(invoice: &Invoice) -> bool {
    invoice.business.is_gst_registered
}

pub fn shows_gst_total(invoice: &Invoice) -> bool {
    invoice.business.is_gst_registered && !invoice.calculations().gst_amount.is_zero()
}

/// Label/value pairs for the totals block
pub fn totals_lines(invoice: &Invoice) -> Vec<(&'static str, String)> {
    let calc = invoice.calculations();
    let mut lines = vec![("Subtotal:", format_aud(calc.subtotal))];
    if shows_gst_total(invoice) {
        lines.push(("GST (10%):", format_aud(calc.gst_amount)));
    }
    lines.push(("Total (AUD):", format_aud(calc.total)));
    lines
}
