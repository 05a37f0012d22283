use clap::{Parser, Subcommand};

mod cmd;

/// Australian GST invoice calculator and validator
#[derive(Parser, Debug)]
#[command(name = "gstinv", version, about)]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate subtotal, GST and total
    Totals(cmd::totals::TotalsCommand),
    /// Check an invoice for missing or invalid details
    Validate(cmd::validate::ValidateCommand),
    /// Show the invoice in the terminal
    Preview(cmd::preview::PreviewCommand),
    /// Export the invoice as HTML
    Export(cmd::export::ExportCommand),
    /// Print the expected input formats
    Schema(cmd::schema::SchemaCommand),
    /// Suggest a new invoice number
    Number(cmd::number::NumberCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();
    log::debug!("{opts:?}");

    match opts.command {
        Command::Totals(totals) => totals.exec(),
        Command::Validate(validate) => validate.exec(),
        Command::Preview(preview) => preview.exec(),
        Command::Export(export) => export.exec(),
        Command::Schema(schema) => schema.exec(),
        Command::Number(number) => number.exec(),
    }
}
