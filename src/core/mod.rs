pub mod form;
pub mod format;
pub mod gst;
pub mod input;
pub mod model;
pub mod numbering;
pub mod validation;

// Flat public surface for domain types and functions.
pub use form::{AddressUpdate, InvoiceForm, ItemUpdate};
pub use format::format_aud;
pub use gst::{
    checked_invoice_total, checked_item_total, invoice_totals, item_gst, item_total, round_money,
    should_apply_gst, GST_RATE,
};
pub use input::{
    append_items, read_invoice_json, read_items_csv, InputError, InvoiceInput, ItemRecord,
};
pub use model::{
    Address, AustralianState, BankAccount, BusinessDetails, Client, Invoice,
    InvoiceCalculations, InvoiceDetails, InvoiceItem,
};
pub use numbering::{generate_invoice_number, invoice_number_for};
pub use validation::{
    validate_abn, validate_bsb, validate_business_details, validate_client, validate_email,
    validate_invoice, validate_postcode, validate_state, ValidationError, ValidationResult,
};
