//! Validation rules for business, client and invoice data.
//!
//! Every rule runs; violations accumulate in rule order and nothing short-circuits.

use super::gst::{checked_invoice_total, checked_item_total};
use super::model::{AustralianState, BankAccount, BusinessDetails, Client, Invoice};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

const ABN_WEIGHTS: [i64; 11] = [10, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19];

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Business name is required")]
    BusinessNameRequired,
    #[error("Valid ABN is required (11 digits)")]
    InvalidAbn,
    #[error("Business street address is required")]
    BusinessStreetRequired,
    #[error("Business city is required")]
    BusinessCityRequired,
    #[error("Valid Australian state is required")]
    InvalidBusinessState,
    #[error("Valid postcode is required (4 digits)")]
    InvalidBusinessPostcode,
    #[error("Valid email format required if provided")]
    InvalidEmail,
    #[error("Account name is required when providing bank details")]
    AccountNameRequired,
    #[error("BSB is required when providing bank details")]
    BsbRequired,
    #[error("Valid BSB format required (XXX-XXX or XXXXXX)")]
    InvalidBsb,
    #[error("Account number is required when providing bank details")]
    AccountNumberRequired,
    #[error("Client name is required")]
    ClientNameRequired,
    #[error("Client address is required")]
    ClientAddressRequired,
    #[error("Valid postcode format required (4 digits) if provided")]
    InvalidClientPostcode,
    #[error("Invoice number is required")]
    InvoiceNumberRequired,
    #[error("Invoice date is required")]
    InvoiceDateRequired,
    #[error("At least one invoice item is required")]
    NoItems,
    #[error("Item {position}: Description is required")]
    ItemDescriptionRequired { position: usize },
    #[error("Item {position}: Quantity must be greater than 0")]
    ItemQuantityNotPositive { position: usize },
    #[error("Item {position}: Unit price must be greater than 0")]
    ItemUnitPriceNotPositive { position: usize },
    #[error("Item {position}: Amount is too large")]
    ItemAmountTooLarge { position: usize },
    #[error("Invoice total is too large")]
    InvoiceTotalTooLarge,
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Error messages in rule-evaluation order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// ABN: 11 digits (whitespace ignored) passing the modulus 89 checksum
pub fn validate_abn(abn: &str) -> bool {
    let clean: String = abn.chars().filter(|c| !c.is_whitespace()).collect();
    if clean.len() != 11 || !clean.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: i64 = clean
        .bytes()
        .map(|b| i64::from(b - b'0'))
        .enumerate()
        .map(|(i, digit)| if i == 0 { digit - 1 } else { digit })
        .zip(ABN_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();

    sum % 89 == 0
}

/// `local@domain.tld`: no whitespace, a single `@`, and a dot inside the domain
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn validate_postcode(postcode: &str) -> bool {
    is_digits(postcode, 4)
}

pub fn validate_state(state: &str) -> bool {
    AustralianState::from_code(state).is_some()
}

/// BSB: six digits, optionally written `XXX-XXX`
pub fn validate_bsb(bsb: &str) -> bool {
    match bsb.split_once('-') {
        Some((branch, account)) => is_digits(branch, 3) && is_digits(account, 3),
        None => is_digits(bsb, 6),
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn validate_business_details(business: &BusinessDetails) -> ValidationResult {
    let mut errors = Vec::new();

    if is_blank(&business.name) {
        errors.push(ValidationError::BusinessNameRequired);
    }
    if !validate_abn(&business.abn) {
        errors.push(ValidationError::InvalidAbn);
    }
    if is_blank(&business.address.street) {
        errors.push(ValidationError::BusinessStreetRequired);
    }
    if is_blank(&business.address.city) {
        errors.push(ValidationError::BusinessCityRequired);
    }
    if !validate_state(&business.address.state) {
        errors.push(ValidationError::InvalidBusinessState);
    }
    if !validate_postcode(&business.address.postcode) {
        errors.push(ValidationError::InvalidBusinessPostcode);
    }
    // phone is optional and free-form
    if let Some(email) = business.email.as_deref().filter(|e| !is_blank(e)) {
        if !validate_email(email) {
            errors.push(ValidationError::InvalidEmail);
        }
    }
    if let Some(bank) = &business.bank_account {
        errors.extend(bank_account_errors(bank));
    }

    ValidationResult::from_errors(errors)
}

fn bank_account_errors(bank: &BankAccount) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !bank.has_any_field() {
        return errors;
    }

    if is_blank(&bank.account_name) {
        errors.push(ValidationError::AccountNameRequired);
    }
    if is_blank(&bank.bsb) {
        errors.push(ValidationError::BsbRequired);
    } else if !validate_bsb(&bank.bsb) {
        errors.push(ValidationError::InvalidBsb);
    }
    if is_blank(&bank.account_number) {
        errors.push(ValidationError::AccountNumberRequired);
    }
    errors
}

pub fn validate_client(client: &Client) -> ValidationResult {
    let mut errors = Vec::new();

    if is_blank(&client.name) {
        errors.push(ValidationError::ClientNameRequired);
    }
    if is_blank(&client.address.street) {
        errors.push(ValidationError::ClientAddressRequired);
    }
    if !client.address.postcode.is_empty() && !validate_postcode(&client.address.postcode) {
        errors.push(ValidationError::InvalidClientPostcode);
    }
    if let Some(email) = client.email.as_deref().filter(|e| !e.is_empty()) {
        if !validate_email(email) {
            errors.push(ValidationError::InvalidEmail);
        }
    }

    ValidationResult::from_errors(errors)
}

/// Invoice fields and items first, then business errors, then client errors.
pub fn validate_invoice(invoice: &Invoice) -> ValidationResult {
    let mut errors = Vec::new();

    if is_blank(&invoice.number) {
        errors.push(ValidationError::InvoiceNumberRequired);
    }
    if invoice.date.is_none() {
        errors.push(ValidationError::InvoiceDateRequired);
    }
    if invoice.items.is_empty() {
        errors.push(ValidationError::NoItems);
    }

    for (index, item) in invoice.items.iter().enumerate() {
        let position = index + 1;
        if is_blank(&item.description) {
            errors.push(ValidationError::ItemDescriptionRequired { position });
        }
        if item.quantity <= Decimal::ZERO {
            errors.push(ValidationError::ItemQuantityNotPositive { position });
        }
        if item.unit_price <= Decimal::ZERO {
            errors.push(ValidationError::ItemUnitPriceNotPositive { position });
        }
        if checked_item_total(item, &invoice.business).is_none() {
            errors.push(ValidationError::ItemAmountTooLarge { position });
        }
    }
    let lines_in_range = invoice
        .items
        .iter()
        .all(|item| checked_item_total(item, &invoice.business).is_some());
    if lines_in_range && checked_invoice_total(&invoice.items, &invoice.business).is_none() {
        errors.push(ValidationError::InvoiceTotalTooLarge);
    }

    errors.extend(validate_business_details(&invoice.business).errors);
    errors.extend(validate_client(&invoice.client).errors);

    let result = ValidationResult::from_errors(errors);
    log::debug!(
        "Validated invoice '{}': {} error(s)",
        invoice.number,
        result.errors.len()
    );
    result
}
