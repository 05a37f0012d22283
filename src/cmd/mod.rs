pub mod export;
pub mod number;
pub mod preview;
pub mod schema;
pub mod totals;
pub mod validate;

use clap::Args;
use gstinv::core::{
    append_items, generate_invoice_number, read_invoice_json, read_items_csv, Invoice,
    InvoiceForm, InvoiceInput,
};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Invoice input shared by every command that works on an invoice
#[derive(Args, Debug)]
pub struct InvoiceArgs {
    /// JSON file containing the invoice ("-" reads stdin)
    #[arg(short, long)]
    invoice: PathBuf,

    /// CSV file of extra line items (description,quantity,unit_price,gst_included,is_gst_free)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Override the business GST registration from the input
    #[arg(long)]
    gst_registered: Option<bool>,
}

impl InvoiceArgs {
    /// Load the input files and assemble an invoice snapshot
    pub fn load(&self) -> anyhow::Result<Invoice> {
        Ok(self.load_form()?.generate_invoice())
    }

    fn load_form(&self) -> anyhow::Result<InvoiceForm> {
        let mut input = if self.invoice.as_os_str() == "-" {
            read_from_stdin()?
        } else {
            read_from_file(&self.invoice)?
        };

        if input.number.is_none() {
            let number = generate_invoice_number();
            log::info!("No invoice number given, using {number}");
            input.number = Some(number);
        }

        let mut form = input.into_form()?;
        if let Some(path) = &self.items {
            let records = read_items_csv(File::open(path)?)?;
            form = append_items(form, records);
        }
        if let Some(registered) = self.gst_registered {
            form = form.with_gst_registered(registered);
        }
        Ok(form)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<InvoiceInput> {
    let file = File::open(path)?;
    Ok(read_invoice_json(BufReader::new(file))?)
}

fn read_from_stdin() -> anyhow::Result<InvoiceInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    Ok(read_invoice_json(io::Cursor::new(buffer))?)
}

/// Print validation problems the way every command reports them
pub fn print_errors(messages: &[String]) {
    println!("Please correct the following errors:");
    for message in messages {
        println!("  - {message}");
    }
}
