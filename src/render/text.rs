//! Plain-text invoice preview for the terminal.

use super::{
    line_rows, present, shows_gst_column, totals_lines, LineRow, GST_FOOTER, PAYMENT_TERMS,
};
use crate::core::{BusinessDetails, Client, Invoice};
use std::fmt::{self, Write};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
    Tabled,
};

const GST_COLUMN: usize = 3;

pub fn render_text(invoice: &Invoice) -> String {
    Preview(invoice).to_string()
}

struct Preview<'a>(&'a Invoice);

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preview(f, self.0)
    }
}

fn write_preview(out: &mut impl Write, invoice: &Invoice) -> fmt::Result {
    writeln!(out, "{}", invoice.title())?;
    writeln!(out, "Invoice #: {}", invoice.number)?;
    if let Some(date) = invoice.date {
        writeln!(out, "Date: {}", date.format("%Y-%m-%d"))?;
    }
    if let Some(due) = invoice.due_date {
        writeln!(out, "Due Date: {}", due.format("%Y-%m-%d"))?;
    }
    writeln!(out)?;

    write_business(out, &invoice.business)?;
    writeln!(out)?;
    write_client(out, &invoice.client)?;
    writeln!(out)?;

    writeln!(out, "{}", items_table(invoice))?;
    writeln!(out)?;

    let totals = totals_lines(invoice);
    let width = totals.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    for (label, value) in &totals {
        writeln!(out, "{:<14}{:>width$}", label, value, width = width)?;
    }

    if let Some(notes) = &invoice.notes {
        writeln!(out)?;
        writeln!(out, "Notes:")?;
        writeln!(out, "{notes}")?;
    }

    if let Some(bank) = invoice.business.bank_account.as_ref().filter(|b| b.is_complete()) {
        writeln!(out)?;
        writeln!(out, "Payment Details:")?;
        writeln!(out, "Account Name: {}", bank.account_name)?;
        writeln!(out, "BSB: {}", bank.bsb)?;
        writeln!(out, "Account Number: {}", bank.account_number)?;
    }

    writeln!(out)?;
    if invoice.business.is_gst_registered {
        writeln!(out, "{GST_FOOTER}")?;
    }
    writeln!(out, "{PAYMENT_TERMS}")
}

fn write_business(out: &mut impl Write, business: &BusinessDetails) -> fmt::Result {
    writeln!(out, "From:")?;
    writeln!(out, "{}", business.name)?;
    writeln!(out, "ABN: {}", business.abn)?;
    writeln!(out, "{}", business.address.street)?;
    writeln!(
        out,
        "{}, {} {}",
        business.address.city, business.address.state, business.address.postcode
    )?;
    if let Some(phone) = present(&business.phone) {
        writeln!(out, "Phone: {phone}")?;
    }
    if let Some(email) = present(&business.email) {
        writeln!(out, "Email: {email}")?;
    }
    Ok(())
}

fn write_client(out: &mut impl Write, client: &Client) -> fmt::Result {
    writeln!(out, "Bill To:")?;
    writeln!(out, "{}", client.name)?;
    writeln!(out, "{}", client.address.street)?;
    let locality = client.address.locality();
    if !locality.is_empty() {
        writeln!(out, "{locality}")?;
    }
    if let Some(email) = present(&client.email) {
        writeln!(out, "Email: {email}")?;
    }
    if let Some(phone) = present(&client.phone) {
        writeln!(out, "Phone: {phone}")?;
    }
    Ok(())
}

fn items_table(invoice: &Invoice) -> String {
    let with_gst = shows_gst_column(invoice);

    let mut builder = Builder::default();
    builder.push_record(visible(LineRow::headers(), with_gst).map(|h| h.into_owned()));
    for row in line_rows(invoice) {
        builder.push_record(visible(row.fields(), with_gst).map(|f| f.into_owned()));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

fn visible<T>(cells: Vec<T>, with_gst: bool) -> impl Iterator<Item = T> {
    cells
        .into_iter()
        .enumerate()
        .filter(move |(i, _)| with_gst || *i != GST_COLUMN)
        .map(|(_, cell)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Address, BankAccount, InvoiceDetails, InvoiceItem};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn invoice(registered: bool, bank: Option<BankAccount>) -> Invoice {
        let business = BusinessDetails {
            name: "Harbour Plumbing".to_string(),
            abn: "51824753556".to_string(),
            address: Address {
                street: "12 Pitt St".to_string(),
                city: "Sydney".to_string(),
                state: "NSW".to_string(),
                postcode: "2000".to_string(),
                country: "Australia".to_string(),
            },
            phone: None,
            email: Some("accounts@harbour.com.au".to_string()),
            is_gst_registered: registered,
            bank_account: bank,
        };
        let client = Client {
            name: "Jane Citizen".to_string(),
            address: Address {
                street: "4 Collins St".to_string(),
                city: "Melbourne".to_string(),
                ..Address::default()
            },
            email: None,
            phone: Some("0400 000 000".to_string()),
        };
        let details = InvoiceDetails {
            number: "INV-202610-000042".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 18),
            due_date: NaiveDate::from_ymd_opt(2026, 11, 17),
            notes: Some("Thanks!".to_string()),
        };
        let items = vec![InvoiceItem {
            id: "1".to_string(),
            description: "Blocked drain".to_string(),
            quantity: dec!(2),
            unit_price: dec!(100),
            gst_included: false,
            is_gst_free: false,
        }];
        Invoice::assemble(details, business, client, items)
    }

    #[test]
    fn tax_invoice_preview() {
        let text = render_text(&invoice(true, None));
        assert!(text.starts_with("TAX INVOICE\n"));
        assert!(text.contains("Invoice #: INV-202610-000042"));
        assert!(text.contains("Due Date: 2026-11-17"));
        assert!(text.contains("Sydney, NSW 2000"));
        assert!(text.contains("Email: accounts@harbour.com.au"));
        assert!(!text.contains("Phone: \n"));
        assert!(text.contains("Melbourne"));
        assert!(text.contains("Phone: 0400 000 000"));
        assert!(text.contains("GST │"));
        assert!(text.contains("GST (10%):"));
        assert!(text.contains("$220.00"));
        assert!(text.contains("Notes:\nThanks!"));
        assert!(text.contains(GST_FOOTER));
        assert!(!text.contains("Payment Details:"));
    }

    #[test]
    fn plain_invoice_has_no_gst_column() {
        let text = render_text(&invoice(false, None));
        assert!(text.starts_with("INVOICE\n"));
        assert!(!text.contains("GST (10%):"));
        assert!(!text.contains("GST │"));
        assert!(!text.contains(GST_FOOTER));
        assert!(text.contains("$200.00"));
        assert!(text.contains(PAYMENT_TERMS));
    }

    #[test]
    fn payment_details_only_when_complete() {
        let bank = BankAccount {
            account_name: "Harbour Plumbing".to_string(),
            bsb: "062-000".to_string(),
            account_number: "12345678".to_string(),
        };
        let text = render_text(&invoice(true, Some(bank.clone())));
        assert!(text.contains("Payment Details:"));
        assert!(text.contains("BSB: 062-000"));

        let partial = BankAccount {
            account_number: String::new(),
            ..bank
        };
        let text = render_text(&invoice(true, Some(partial)));
        assert!(!text.contains("Payment Details:"));
    }
}
