//! Number command - suggest a fresh invoice number

use chrono::{NaiveDate, Utc};
use clap::Args;
use gstinv::core::{generate_invoice_number, invoice_number_for};

#[derive(Args, Debug)]
pub struct NumberCommand {
    /// Issue date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,
}

impl NumberCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let number = match self.date {
            Some(date) => {
                let millis = Utc::now().timestamp_millis().unsigned_abs();
                invoice_number_for(date, millis)
            }
            None => generate_invoice_number(),
        };
        println!("{number}");
        Ok(())
    }
}
