//! Schema command - print expected input formats

use clap::Args;
use gstinv::core::InvoiceInput;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the invoice input
    JsonSchema,
    /// CSV header row for line items
    CsvHeader,
    /// CSV column descriptions for line items
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(InvoiceInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        let columns: Vec<&str> = CSV_FIELDS.iter().map(|(name, _, _)| *name).collect();
        println!("{}", columns.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Line Item CSV Format");
        println!("====================");
        println!();
        for (name, required, description) in CSV_FIELDS {
            let req = if *required { "required" } else { "optional" };
            println!("{:14} ({:8})  {}", name, req, description);
        }
        println!();
        println!("GST rate is fixed at 10%. Amounts are in AUD.");
        Ok(())
    }
}

const CSV_FIELDS: &[(&str, bool, &str)] = &[
    ("description", true, "What was supplied"),
    ("quantity", true, "Number of units, must be greater than zero"),
    ("unit_price", true, "Price per unit in AUD, must not be negative"),
    (
        "gst_included",
        false,
        "true if unit_price already includes GST (default false)",
    ),
    (
        "is_gst_free",
        false,
        "true if the supply is GST-free (default false)",
    ),
];
