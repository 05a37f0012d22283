use chrono::{Datelike, Local, NaiveDate, Utc};

/// Suggest an invoice number from today's date and the current time.
///
/// Advisory only: uniqueness is not guaranteed.
pub fn generate_invoice_number() -> String {
    let millis = Utc::now().timestamp_millis().unsigned_abs();
    invoice_number_for(Local::now().date_naive(), millis)
}

/// `INV-<YYYY><MM>-<NNNNNN>` using the last six digits of `suffix`
pub fn invoice_number_for(date: NaiveDate, suffix: u64) -> String {
    format!(
        "INV-{:04}{:02}-{:06}",
        date.year(),
        date.month(),
        suffix % 1_000_000
    )
}
