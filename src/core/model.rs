use super::gst::invoice_totals;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_COUNTRY: &str = "Australia";

/// Australian state or territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AustralianState {
    Nsw,
    Vic,
    Qld,
    Wa,
    Sa,
    Tas,
    Act,
    Nt,
}

impl AustralianState {
    pub const ALL: [AustralianState; 8] = [
        AustralianState::Nsw,
        AustralianState::Vic,
        AustralianState::Qld,
        AustralianState::Wa,
        AustralianState::Sa,
        AustralianState::Tas,
        AustralianState::Act,
        AustralianState::Nt,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AustralianState::Nsw => "NSW",
            AustralianState::Vic => "VIC",
            AustralianState::Qld => "QLD",
            AustralianState::Wa => "WA",
            AustralianState::Sa => "SA",
            AustralianState::Tas => "TAS",
            AustralianState::Act => "ACT",
            AustralianState::Nt => "NT",
        }
    }

    /// Exact, case-sensitive match against the state codes
    pub fn from_code(code: &str) -> Option<AustralianState> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl std::fmt::Display for AustralianState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Postal address. Format rules are checked by the validation engine, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    /// State code: NSW, VIC, QLD, WA, SA, TAS, ACT or NT
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for Address {
    fn default() -> Self {
        Address {
            street: String::new(),
            city: String::new(),
            state: String::new(),
            postcode: String::new(),
            country: default_country(),
        }
    }
}

impl Address {
    /// City, state and postcode joined for display, skipping blanks
    pub fn locality(&self) -> String {
        [&self.city, &self.state, &self.postcode]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Bank account for payment details. Either all fields are supplied or none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BankAccount {
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub bsb: String,
    #[serde(default)]
    pub account_number: String,
}

impl BankAccount {
    pub fn has_any_field(&self) -> bool {
        [&self.account_name, &self.bsb, &self.account_number]
            .iter()
            .any(|f| !f.trim().is_empty())
    }

    pub fn is_complete(&self) -> bool {
        [&self.account_name, &self.bsb, &self.account_number]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BusinessDetails {
    #[serde(default)]
    pub name: String,
    /// Australian Business Number, 11 digits (spaces allowed)
    #[serde(default)]
    pub abn: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_gst_registered: bool,
    #[serde(default)]
    pub bank_account: Option<BankAccount>,
}

impl Default for BusinessDetails {
    fn default() -> Self {
        BusinessDetails {
            name: String::new(),
            abn: String::new(),
            address: Address {
                state: AustralianState::Nsw.code().to_string(),
                ..Address::default()
            },
            phone: None,
            email: None,
            is_gst_registered: false,
            bank_account: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Client {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A single invoice line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InvoiceItem {
    /// Identifier, unique within an invoice
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[schemars(with = "f64")]
    pub quantity: Decimal,
    #[schemars(with = "f64")]
    pub unit_price: Decimal,
    /// Unit price already includes GST
    #[serde(default)]
    pub gst_included: bool,
    /// Exempt from GST (e.g. medical or education services)
    #[serde(default)]
    pub is_gst_free: bool,
}

impl InvoiceItem {
    /// A blank line with quantity 1 and no price
    pub fn blank(id: impl Into<String>) -> Self {
        InvoiceItem {
            id: id.into(),
            description: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            gst_included: false,
            is_gst_free: false,
        }
    }

    /// Quantity times unit price, saturating at the bounds of [`Decimal`]
    pub fn base_amount(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_price)
    }
}

/// Aggregate money values, each rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct InvoiceCalculations {
    #[schemars(with = "f64")]
    pub subtotal: Decimal,
    #[schemars(with = "f64")]
    pub gst_amount: Decimal,
    #[schemars(with = "f64")]
    pub total: Decimal,
}

/// Invoice metadata edited alongside the parties and items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InvoiceDetails {
    #[serde(default)]
    pub number: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    #[schemars(with = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    #[schemars(with = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Assembled invoice snapshot. Calculations are derived on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub number: String,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub business: BusinessDetails,
    pub client: Client,
    pub items: Vec<InvoiceItem>,
    calculations: InvoiceCalculations,
    pub notes: Option<String>,
    is_tax_invoice: bool,
}

impl Invoice {
    pub fn assemble(
        details: InvoiceDetails,
        business: BusinessDetails,
        client: Client,
        items: Vec<InvoiceItem>,
    ) -> Self {
        let calculations = invoice_totals(&items, &business);
        let is_tax_invoice =
            business.is_gst_registered && calculations.gst_amount > Decimal::ZERO;
        Invoice {
            number: details.number,
            date: details.date,
            due_date: details.due_date,
            business,
            client,
            items,
            calculations,
            notes: details.notes.filter(|n| !n.trim().is_empty()),
            is_tax_invoice,
        }
    }

    pub fn calculations(&self) -> &InvoiceCalculations {
        &self.calculations
    }

    /// True iff the business is GST registered and GST was charged
    pub fn is_tax_invoice(&self) -> bool {
        self.is_tax_invoice
    }

    pub fn title(&self) -> &'static str {
        if self.is_tax_invoice {
            "TAX INVOICE"
        } else {
            "INVOICE"
        }
    }
}

/// Dates are `YYYY-MM-DD`; a missing or blank string means no date.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{s}': {e}"))),
    }
}
