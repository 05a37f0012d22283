//! GST calculations for invoice lines and invoice totals.
//!
//! Amounts are exact decimals. Aggregates are rounded to cents using
//! round-half-away-from-zero, each figure independently.

use super::model::{BusinessDetails, InvoiceCalculations, InvoiceItem};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Australian GST rate (10%)
pub const GST_RATE: Decimal = dec!(0.10);

/// The single gating rule for charging GST on a line
pub fn should_apply_gst(business: &BusinessDetails, item: &InvoiceItem) -> bool {
    business.is_gst_registered && !item.is_gst_free
}

/// Line total including any GST
pub fn item_total(item: &InvoiceItem, business: &BusinessDetails) -> Decimal {
    let base = item.base_amount();
    if !should_apply_gst(business, item) || item.gst_included {
        base
    } else {
        base.saturating_mul(Decimal::ONE + GST_RATE)
    }
}

/// Line total, or `None` when it exceeds the range of [`Decimal`]
pub fn checked_item_total(item: &InvoiceItem, business: &BusinessDetails) -> Option<Decimal> {
    let base = item.quantity.checked_mul(item.unit_price)?;
    if !should_apply_gst(business, item) || item.gst_included {
        Some(base)
    } else {
        base.checked_mul(Decimal::ONE + GST_RATE)
    }
}

/// Sum of line totals, or `None` when any line or the sum overflows
pub fn checked_invoice_total(items: &[InvoiceItem], business: &BusinessDetails) -> Option<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        total.checked_add(checked_item_total(item, business)?)
    })
}

/// GST component of a line
pub fn item_gst(item: &InvoiceItem, business: &BusinessDetails) -> Decimal {
    let base = item.base_amount();
    if !should_apply_gst(business, item) {
        Decimal::ZERO
    } else if item.gst_included {
        base - base / (Decimal::ONE + GST_RATE)
    } else {
        base * GST_RATE
    }
}

/// Sum lines in order, then round subtotal, GST and total independently.
///
/// Amounts beyond the range of [`Decimal`] saturate; [`checked_invoice_total`]
/// detects them.
pub fn invoice_totals(items: &[InvoiceItem], business: &BusinessDetails) -> InvoiceCalculations {
    let (subtotal, gst_amount, total) = items.iter().fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(subtotal, gst_amount, total), item| {
            let line_total = item_total(item, business);
            let line_gst = item_gst(item, business);
            log::debug!(
                "Item {} total={}, gst={}, gst_applied={}",
                item.id,
                line_total,
                line_gst,
                should_apply_gst(business, item)
            );
            (
                subtotal.saturating_add(line_total.saturating_sub(line_gst)),
                gst_amount.saturating_add(line_gst),
                total.saturating_add(line_total),
            )
        },
    );

    let calculations = InvoiceCalculations {
        subtotal: round_money(subtotal),
        gst_amount: round_money(gst_amount),
        total: round_money(total),
    };
    log::debug!(
        "Invoice totals: items={}, subtotal={}, gst={}, total={}",
        items.len(),
        calculations.subtotal,
        calculations.gst_amount,
        calculations.total
    );
    calculations
}

/// Round to cents, half away from zero, always with two decimal places.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
