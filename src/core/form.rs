//! Invoice form state as immutable snapshots.
//!
//! Each edit consumes the current form and returns the next one, so an
//! invoice is only ever assembled from a complete, consistent snapshot.

use super::model::{
    Address, BusinessDetails, Client, Invoice, InvoiceDetails, InvoiceItem,
};
use super::numbering::generate_invoice_number;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

/// Field changes for an address; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct AddressUpdate {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

impl AddressUpdate {
    fn apply(self, mut address: Address) -> Address {
        if let Some(street) = self.street {
            address.street = street;
        }
        if let Some(city) = self.city {
            address.city = city;
        }
        if let Some(state) = self.state {
            address.state = state;
        }
        if let Some(postcode) = self.postcode {
            address.postcode = postcode;
        }
        if let Some(country) = self.country {
            address.country = country;
        }
        address
    }
}

/// Field changes for an invoice line; the id cannot be changed
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub gst_included: Option<bool>,
    pub is_gst_free: Option<bool>,
}

impl ItemUpdate {
    fn apply(self, mut item: InvoiceItem) -> InvoiceItem {
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(unit_price) = self.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(gst_included) = self.gst_included {
            item.gst_included = gst_included;
        }
        if let Some(is_gst_free) = self.is_gst_free {
            item.is_gst_free = is_gst_free;
        }
        item
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceForm {
    business: BusinessDetails,
    client: Client,
    items: Vec<InvoiceItem>,
    details: InvoiceDetails,
    next_item_id: u64,
}

impl Default for InvoiceForm {
    fn default() -> Self {
        InvoiceForm::new(Local::now().date_naive())
    }
}

impl InvoiceForm {
    /// Fresh form dated `today` with a suggested number and one blank line
    pub fn new(today: NaiveDate) -> Self {
        InvoiceForm {
            business: BusinessDetails::default(),
            client: Client::default(),
            items: vec![InvoiceItem::blank("1")],
            details: fresh_details(today),
            next_item_id: 2,
        }
    }

    /// Build a form from already-loaded parts, keeping their item ids
    pub fn from_parts(
        business: BusinessDetails,
        client: Client,
        items: Vec<InvoiceItem>,
        details: InvoiceDetails,
    ) -> Self {
        let next_item_id = items
            .iter()
            .filter_map(|item| item.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        InvoiceForm {
            business,
            client,
            items,
            details,
            next_item_id,
        }
    }

    pub fn business(&self) -> &BusinessDetails {
        &self.business
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    pub fn details(&self) -> &InvoiceDetails {
        &self.details
    }

    pub fn with_business(self, business: BusinessDetails) -> Self {
        InvoiceForm { business, ..self }
    }

    pub fn with_client(self, client: Client) -> Self {
        InvoiceForm { client, ..self }
    }

    pub fn with_details(self, details: InvoiceDetails) -> Self {
        InvoiceForm { details, ..self }
    }

    pub fn with_gst_registered(mut self, registered: bool) -> Self {
        self.business.is_gst_registered = registered;
        self
    }

    pub fn update_business_address(mut self, update: AddressUpdate) -> Self {
        self.business.address = update.apply(self.business.address);
        self
    }

    pub fn update_client_address(mut self, update: AddressUpdate) -> Self {
        self.client.address = update.apply(self.client.address);
        self
    }

    /// Append a blank line with a fresh id
    pub fn add_item(self) -> Self {
        let id = self.next_item_id.to_string();
        self.push_item(InvoiceItem::blank(id))
    }

    /// Append a line, replacing its id with a fresh one
    pub fn add_item_with(self, update: ItemUpdate) -> Self {
        let id = self.next_item_id.to_string();
        self.push_item(update.apply(InvoiceItem::blank(id)))
    }

    fn push_item(mut self, item: InvoiceItem) -> Self {
        self.items.push(item);
        self.next_item_id += 1;
        self
    }

    pub fn remove_item(mut self, id: &str) -> Self {
        self.items.retain(|item| item.id != id);
        self
    }

    /// Apply `update` to the line with `id`; unknown ids leave the form unchanged
    pub fn update_item(mut self, id: &str, update: ItemUpdate) -> Self {
        if let Some(pos) = self.items.iter().position(|item| item.id == id) {
            let item = self.items.remove(pos);
            self.items.insert(pos, update.apply(item));
        } else {
            log::warn!("No invoice item with id {id}");
        }
        self
    }

    /// Clear the items and metadata; business and client details are kept
    pub fn reset(self, today: NaiveDate) -> Self {
        InvoiceForm {
            items: vec![InvoiceItem::blank("1")],
            details: fresh_details(today),
            next_item_id: 2,
            ..self
        }
    }

    /// Assemble an invoice snapshot with freshly derived calculations
    pub fn generate_invoice(&self) -> Invoice {
        Invoice::assemble(
            self.details.clone(),
            self.business.clone(),
            self.client.clone(),
            self.items.clone(),
        )
    }
}

fn fresh_details(today: NaiveDate) -> InvoiceDetails {
    InvoiceDetails {
        number: generate_invoice_number(),
        date: Some(today),
        due_date: None,
        notes: None,
    }
}
