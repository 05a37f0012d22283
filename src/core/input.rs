use super::form::{InvoiceForm, ItemUpdate};
use super::model::{
    deserialize_optional_date, BusinessDetails, Client, InvoiceDetails, InvoiceItem,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid invoice JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid items CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate item id: {0}")]
    DuplicateItemId(String),
}

/// Input root for invoice JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct InvoiceInput {
    /// `None` when the key is absent; an explicit blank is kept for validation
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    #[schemars(with = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    #[schemars(with = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub business: BusinessDetails,
    #[serde(default)]
    pub client: Client,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

impl InvoiceInput {
    /// Turn the input into a form snapshot, assigning ids to lines without one
    pub fn into_form(self) -> Result<InvoiceForm, InputError> {
        let mut seen = HashSet::new();
        let mut keyed = Vec::with_capacity(self.items.len());
        let mut unkeyed = Vec::new();
        for item in self.items {
            if item.id.trim().is_empty() {
                unkeyed.push(item);
            } else if seen.insert(item.id.clone()) {
                keyed.push(item);
            } else {
                return Err(InputError::DuplicateItemId(item.id));
            }
        }

        let details = InvoiceDetails {
            number: self.number.unwrap_or_default(),
            date: self.date,
            due_date: self.due_date,
            notes: self.notes,
        };
        let mut form = InvoiceForm::from_parts(self.business, self.client, keyed, details);
        for item in unkeyed {
            form = form.add_item_with(ItemRecord::from(item).into());
        }
        Ok(form)
    }
}

/// One row of an items CSV file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub gst_included: Option<bool>,
    #[serde(default)]
    pub is_gst_free: Option<bool>,
}

impl From<InvoiceItem> for ItemRecord {
    fn from(item: InvoiceItem) -> Self {
        ItemRecord {
            description: item.description,
            quantity: item.quantity,
            unit_price: item.unit_price,
            gst_included: Some(item.gst_included),
            is_gst_free: Some(item.is_gst_free),
        }
    }
}

impl From<ItemRecord> for ItemUpdate {
    fn from(record: ItemRecord) -> Self {
        ItemUpdate {
            description: Some(record.description),
            quantity: Some(record.quantity),
            unit_price: Some(record.unit_price),
            gst_included: Some(record.gst_included.unwrap_or(false)),
            is_gst_free: Some(record.is_gst_free.unwrap_or(false)),
        }
    }
}

pub fn read_invoice_json<R: Read>(reader: R) -> Result<InvoiceInput, InputError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_items_csv<R: Read>(reader: R) -> Result<Vec<ItemRecord>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: ItemRecord = result?;
        records.push(record);
    }
    log::info!("Read {} item csv records", records.len());
    Ok(records)
}

/// Append CSV item rows to a form, each with a fresh id
pub fn append_items(form: InvoiceForm, records: Vec<ItemRecord>) -> InvoiceForm {
    records
        .into_iter()
        .fold(form, |form, record| form.add_item_with(record.into()))
}
